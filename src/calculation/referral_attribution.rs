//! Referral attribution splitting.
//!
//! The profile store keeps a single accumulated referral figure covering
//! both signup referrals and referrals that led to a hire. This module
//! reconstructs the two categories from an independently fetched hired
//! count. The split is always recomputed on read, never stored.

use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Points credited per referred user who was hired.
pub const POINTS_PER_HIRE: u64 = 20;

/// How a referral split was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralAttribution {
    /// Split using the hired count from referral history.
    Reconciled,
    /// Hired count unavailable; every referral point treated as placement.
    AllPlacementFallback,
}

/// The result of splitting referral points, including the audit step.
#[derive(Debug, Clone)]
pub struct ReferralSplit {
    /// Points attributed to referrals that resulted in a hire.
    pub placement_points: u64,
    /// Points attributed to referral signups.
    pub signup_points: u64,
    /// Whether the split was reconciled or degraded.
    pub attribution: ReferralAttribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl ReferralSplit {
    /// Returns true if the hired count was unavailable.
    pub fn is_degraded(&self) -> bool {
        self.attribution == ReferralAttribution::AllPlacementFallback
    }
}

/// Splits a total referral figure into placement and signup points.
///
/// With a hired count, placement points are `hired * 20` and signup points
/// are whatever remains (never below zero). Without one, the whole total is
/// treated as placement points and the split is flagged as degraded rather
/// than guessed.
///
/// # Arguments
///
/// * `total_referral_reward_points` - The undifferentiated referral total
/// * `hired_referral_count` - Hired count from referral history, if it could be fetched
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::split_referral_points;
///
/// let split = split_referral_points(140, Some(3), 1);
/// assert_eq!(split.placement_points, 60);
/// assert_eq!(split.signup_points, 80);
///
/// let degraded = split_referral_points(140, None, 1);
/// assert_eq!(degraded.placement_points, 140);
/// assert_eq!(degraded.signup_points, 0);
/// assert!(degraded.is_degraded());
/// ```
pub fn split_referral_points(
    total_referral_reward_points: u64,
    hired_referral_count: Option<u64>,
    step_number: u32,
) -> ReferralSplit {
    let (placement_points, signup_points, attribution, reasoning) = match hired_referral_count {
        Some(hired) => {
            let placement = hired.saturating_mul(POINTS_PER_HIRE);
            let signup = total_referral_reward_points.saturating_sub(placement);
            (
                placement,
                signup,
                ReferralAttribution::Reconciled,
                format!(
                    "{} hires x {} = {} placement points; {} - {} = {} signup points",
                    hired,
                    POINTS_PER_HIRE,
                    placement,
                    total_referral_reward_points,
                    placement,
                    signup
                ),
            )
        }
        None => (
            total_referral_reward_points,
            0,
            ReferralAttribution::AllPlacementFallback,
            format!(
                "Hired count unavailable; all {} referral points treated as placement points",
                total_referral_reward_points
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "referral_attribution".to_string(),
        rule_name: "Referral Attribution Split".to_string(),
        input: serde_json::json!({
            "total_referral_reward_points": total_referral_reward_points,
            "hired_referral_count": hired_referral_count
        }),
        output: serde_json::json!({
            "placement_points": placement_points,
            "signup_points": signup_points,
            "attribution": attribution
        }),
        reasoning,
    };

    ReferralSplit {
        placement_points,
        signup_points,
        attribution,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_hires_out_of_140() {
        let split = split_referral_points(140, Some(3), 1);
        assert_eq!(split.placement_points, 60);
        assert_eq!(split.signup_points, 80);
        assert_eq!(split.attribution, ReferralAttribution::Reconciled);
        assert!(!split.is_degraded());
    }

    #[test]
    fn test_no_hires_is_all_signup() {
        let split = split_referral_points(90, Some(0), 1);
        assert_eq!(split.placement_points, 0);
        assert_eq!(split.signup_points, 90);
    }

    #[test]
    fn test_placement_exceeding_total_clamps_signup_to_zero() {
        let split = split_referral_points(40, Some(5), 1);
        assert_eq!(split.placement_points, 100);
        assert_eq!(split.signup_points, 0);
    }

    #[test]
    fn test_split_reconstructs_total_exactly() {
        for hired in 0..=7 {
            let split = split_referral_points(140, Some(hired), 1);
            assert_eq!(split.placement_points + split.signup_points, 140);
        }
    }

    #[test]
    fn test_unavailable_hired_count_falls_back_to_all_placement() {
        let split = split_referral_points(140, None, 1);
        assert_eq!(split.placement_points, 140);
        assert_eq!(split.signup_points, 0);
        assert_eq!(split.attribution, ReferralAttribution::AllPlacementFallback);
        assert!(split.is_degraded());
        assert!(split.audit_step.reasoning.contains("unavailable"));
    }

    #[test]
    fn test_huge_hired_count_does_not_overflow() {
        let split = split_referral_points(10, Some(u64::MAX), 1);
        assert_eq!(split.placement_points, u64::MAX);
        assert_eq!(split.signup_points, 0);
    }

    #[test]
    fn test_audit_step_records_inputs_and_outputs() {
        let split = split_referral_points(140, Some(3), 7);
        assert_eq!(split.audit_step.step_number, 7);
        assert_eq!(split.audit_step.input["hired_referral_count"], 3);
        assert_eq!(split.audit_step.output["placement_points"], 60);
        assert_eq!(split.audit_step.output["attribution"], "reconciled");

        let degraded = split_referral_points(140, None, 1);
        assert!(degraded.audit_step.input["hired_referral_count"].is_null());
        assert_eq!(
            degraded.audit_step.output["attribution"],
            "all_placement_fallback"
        );
    }
}
