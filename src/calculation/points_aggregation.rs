//! Reward point aggregation.
//!
//! Combines base points (earned through profile completion), activity
//! sources and referral points into a gross total, then applies
//! administrative deductions once against the combined figure.
//!
//! A server-computed balance from the profile store always wins over the
//! local recomputation; [`resolve_available_points`] makes that choice
//! explicit and records which path was taken.

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, RewardComponents};

/// Points every member starts with.
pub const BASE_POINTS: u64 = 50;

/// Points earned per percentage point of profile completion.
pub const POINTS_PER_COMPLETION_PERCENT: u64 = 2;

/// The result of aggregating point sources, including the audit step.
#[derive(Debug, Clone)]
pub struct PointsBreakdown {
    /// Points from profile completion: `50 + percentage * 2`.
    pub base_points: u64,
    /// Base points plus activity sources and signup referral points.
    pub activity_points: u64,
    /// Activity points plus placement referral points.
    pub total_points: u64,
    /// Deductions applied against the total.
    pub deducted_points: u64,
    /// Total points after deductions, never below zero.
    pub available_points: u64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Where an available balance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSource {
    /// The profile store's server-computed balance.
    Authoritative,
    /// Recomputed locally from the profile's point components.
    LocalRecomputation,
}

/// The balance chosen between the authoritative and local figures.
#[derive(Debug, Clone)]
pub struct ResolvedBalance {
    /// The available points to show and spend.
    pub available_points: u64,
    /// Which figure was used.
    pub source: BalanceSource,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Returns the base points earned for a completion percentage.
///
/// Percentages above 100 are capped, so the ceiling is 250 points.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::base_points;
///
/// assert_eq!(base_points(0), 50);
/// assert_eq!(base_points(50), 150);
/// assert_eq!(base_points(100), 250);
/// ```
pub fn base_points(completion_percentage: u32) -> u64 {
    BASE_POINTS + u64::from(completion_percentage.min(100)) * POINTS_PER_COMPLETION_PERCENT
}

/// Aggregates all point sources into gross and available totals.
///
/// Deductions are applied once, to the combined total, so they cannot zero
/// out one category while leaving the others untouched.
///
/// # Arguments
///
/// * `completion_percentage` - Profile completion percentage (0-100)
/// * `rewards` - Activity point components from the profile
/// * `deducted_points` - Administrative deductions
/// * `placement_points` - Referral points attributed to hires
/// * `signup_points` - Referral points attributed to signups
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::aggregate_points;
/// use rewards_engine::models::RewardComponents;
///
/// let rewards = RewardComponents {
///     apply_for_jobs: 20,
///     rm_service: 100,
///     social_media_bonus: 10,
///     referral_reward_points: 140,
/// };
///
/// let points = aggregate_points(50, &rewards, 30, 60, 80, 1);
/// assert_eq!(points.base_points, 150);
/// assert_eq!(points.activity_points, 360);
/// assert_eq!(points.total_points, 420);
/// assert_eq!(points.available_points, 390);
/// ```
pub fn aggregate_points(
    completion_percentage: u32,
    rewards: &RewardComponents,
    deducted_points: u64,
    placement_points: u64,
    signup_points: u64,
    step_number: u32,
) -> PointsBreakdown {
    let base_points = base_points(completion_percentage);

    let activity_points = base_points
        .saturating_add(rewards.apply_for_jobs)
        .saturating_add(rewards.rm_service)
        .saturating_add(rewards.social_media_bonus)
        .saturating_add(signup_points);
    let total_points = activity_points.saturating_add(placement_points);
    let available_points = total_points.saturating_sub(deducted_points);

    let audit_step = AuditStep {
        step_number,
        rule_id: "points_aggregation".to_string(),
        rule_name: "Points Aggregation".to_string(),
        input: serde_json::json!({
            "completion_percentage": completion_percentage,
            "apply_for_jobs": rewards.apply_for_jobs,
            "rm_service": rewards.rm_service,
            "social_media_bonus": rewards.social_media_bonus,
            "signup_points": signup_points,
            "placement_points": placement_points,
            "deducted_points": deducted_points
        }),
        output: serde_json::json!({
            "base_points": base_points,
            "activity_points": activity_points,
            "total_points": total_points,
            "available_points": available_points
        }),
        reasoning: format!(
            "base {} + jobs {} + rm {} + social {} + signup {} = {} activity; + placement {} = {} total; - deducted {} = {} available",
            base_points,
            rewards.apply_for_jobs,
            rewards.rm_service,
            rewards.social_media_bonus,
            signup_points,
            activity_points,
            placement_points,
            total_points,
            deducted_points,
            available_points
        ),
    };

    PointsBreakdown {
        base_points,
        activity_points,
        total_points,
        deducted_points,
        available_points,
        audit_step,
    }
}

/// Chooses the balance to use, preferring the server-computed figure.
///
/// The local recomputation is only used when the profile store did not
/// provide a balance.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::{aggregate_points, resolve_available_points, BalanceSource};
/// use rewards_engine::models::RewardComponents;
///
/// let local = aggregate_points(100, &RewardComponents::default(), 0, 0, 0, 1);
///
/// let resolved = resolve_available_points(Some(410), &local, 2);
/// assert_eq!(resolved.available_points, 410);
/// assert_eq!(resolved.source, BalanceSource::Authoritative);
///
/// let resolved = resolve_available_points(None, &local, 2);
/// assert_eq!(resolved.available_points, 250);
/// assert_eq!(resolved.source, BalanceSource::LocalRecomputation);
/// ```
pub fn resolve_available_points(
    authoritative_points: Option<u64>,
    local: &PointsBreakdown,
    step_number: u32,
) -> ResolvedBalance {
    let (available_points, source, reasoning) = match authoritative_points {
        Some(points) => (
            points,
            BalanceSource::Authoritative,
            if points == local.available_points {
                format!("Using server-computed balance of {} points", points)
            } else {
                format!(
                    "Using server-computed balance of {} points (local recomputation gives {})",
                    points, local.available_points
                )
            },
        ),
        None => (
            local.available_points,
            BalanceSource::LocalRecomputation,
            format!(
                "Server-computed balance unavailable; using local recomputation of {} points",
                local.available_points
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "balance_resolution".to_string(),
        rule_name: "Balance Source Resolution".to_string(),
        input: serde_json::json!({
            "authoritative_points": authoritative_points,
            "local_available_points": local.available_points
        }),
        output: serde_json::json!({
            "available_points": available_points,
            "source": source
        }),
        reasoning,
    };

    ResolvedBalance {
        available_points,
        source,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards(apply_for_jobs: u64, rm_service: u64, social_media_bonus: u64) -> RewardComponents {
        RewardComponents {
            apply_for_jobs,
            rm_service,
            social_media_bonus,
            referral_reward_points: 0,
        }
    }

    #[test]
    fn test_base_points_bounds() {
        assert_eq!(base_points(0), 50);
        assert_eq!(base_points(100), 250);
        assert_eq!(base_points(150), 250);
    }

    #[test]
    fn test_base_points_for_half_complete_profile() {
        assert_eq!(base_points(50), 150);
    }

    #[test]
    fn test_activity_excludes_placement_but_total_includes_it() {
        let points = aggregate_points(50, &rewards(20, 100, 10), 0, 60, 80, 1);
        assert_eq!(points.activity_points, 150 + 20 + 100 + 10 + 80);
        assert_eq!(points.total_points, points.activity_points + 60);
        assert_eq!(points.available_points, points.total_points);
    }

    #[test]
    fn test_deduction_applied_to_combined_total() {
        // The deduction exceeds every individual component but not the total.
        let points = aggregate_points(0, &rewards(30, 40, 10), 120, 20, 0, 1);
        assert_eq!(points.total_points, 150);
        assert_eq!(points.available_points, 30);
    }

    #[test]
    fn test_deduction_never_drives_balance_negative() {
        let points = aggregate_points(0, &RewardComponents::default(), 10_000, 0, 0, 1);
        assert_eq!(points.total_points, 50);
        assert_eq!(points.available_points, 0);
    }

    #[test]
    fn test_referral_total_on_components_is_not_counted_directly() {
        let mut components = rewards(0, 0, 0);
        components.referral_reward_points = 500;
        let points = aggregate_points(0, &components, 0, 0, 0, 1);
        assert_eq!(points.total_points, 50);
    }

    #[test]
    fn test_audit_step_explains_each_stage() {
        let points = aggregate_points(50, &rewards(20, 100, 10), 30, 60, 80, 3);
        assert_eq!(points.audit_step.step_number, 3);
        assert_eq!(points.audit_step.rule_id, "points_aggregation");
        assert_eq!(points.audit_step.output["available_points"], 390);
        assert!(points.audit_step.reasoning.contains("360 activity"));
        assert!(points.audit_step.reasoning.contains("420 total"));
    }

    #[test]
    fn test_authoritative_balance_preferred() {
        let local = aggregate_points(100, &rewards(20, 0, 0), 0, 0, 0, 1);
        let resolved = resolve_available_points(Some(95), &local, 2);
        assert_eq!(resolved.available_points, 95);
        assert_eq!(resolved.source, BalanceSource::Authoritative);
        assert!(resolved.audit_step.reasoning.contains("local recomputation gives 270"));
    }

    #[test]
    fn test_authoritative_zero_is_still_authoritative() {
        let local = aggregate_points(100, &RewardComponents::default(), 0, 0, 0, 1);
        let resolved = resolve_available_points(Some(0), &local, 2);
        assert_eq!(resolved.available_points, 0);
        assert_eq!(resolved.source, BalanceSource::Authoritative);
    }

    #[test]
    fn test_local_fallback_when_authoritative_missing() {
        let local = aggregate_points(100, &RewardComponents::default(), 20, 0, 0, 1);
        let resolved = resolve_available_points(None, &local, 2);
        assert_eq!(resolved.available_points, 230);
        assert_eq!(resolved.source, BalanceSource::LocalRecomputation);
        assert_eq!(resolved.audit_step.output["source"], "local_recomputation");
    }
}
