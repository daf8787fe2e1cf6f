//! Audit trace models for the Rewards Engine.
//!
//! Every rule application records an [`AuditStep`] with its inputs, outputs
//! and a human-readable explanation. Degradations (cached data, missing
//! collaborator responses) are recorded as [`AuditWarning`]s so the caller
//! can tell a best-effort figure from an authoritative one.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use rewards_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "referral_attribution".to_string(),
///     rule_name: "Referral Attribution Split".to_string(),
///     input: serde_json::json!({"total_referral_reward_points": 140, "hired_referral_count": 3}),
///     output: serde_json::json!({"placement_points": 60, "signup_points": 80}),
///     reasoning: "3 hires x 20 = 60 placement points; 140 - 60 = 80 signup points".to_string(),
/// };
/// assert_eq!(step.output["signup_points"], 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// How serious a warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; figures are still exact.
    Low,
    /// Figures are best-effort and may be out of date.
    Medium,
    /// Figures should not be relied upon for decisions.
    High,
}

/// A warning generated during calculation.
///
/// Warnings indicate degraded inputs that did not prevent the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// The profile came from the local cache instead of the profile store.
    pub const PROFILE_FROM_CACHE: &'static str = "PROFILE_FROM_CACHE";
    /// The hired-referral count could not be fetched.
    pub const REFERRAL_HISTORY_UNAVAILABLE: &'static str = "REFERRAL_HISTORY_UNAVAILABLE";
    /// No server-computed balance was available; a local recomputation was used.
    pub const AUTHORITATIVE_BALANCE_UNAVAILABLE: &'static str =
        "AUTHORITATIVE_BALANCE_UNAVAILABLE";

    /// Creates a new warning.
    pub fn new(code: &str, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_step(step_number: u32) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "base_points".to_string(),
            rule_name: "Base Points".to_string(),
            input: serde_json::json!({"percentage": 50}),
            output: serde_json::json!({"base_points": 150}),
            reasoning: "50 + 50% x 2 = 150".to_string(),
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let json = serde_json::to_string(&sample_step(1)).unwrap();
        assert!(json.contains("\"stepNumber\":1"));
        assert!(json.contains("\"ruleId\":\"base_points\""));
        assert!(json.contains("\"base_points\":150"));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new(
            AuditWarning::REFERRAL_HISTORY_UNAVAILABLE,
            "Referral history unavailable",
            WarningSeverity::Medium,
        );
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"REFERRAL_HISTORY_UNAVAILABLE\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_audit_trace_has_warning() {
        let trace = AuditTrace {
            steps: vec![sample_step(1), sample_step(2)],
            warnings: vec![AuditWarning::new(
                AuditWarning::PROFILE_FROM_CACHE,
                "cached",
                WarningSeverity::High,
            )],
            duration_us: 42,
        };
        assert!(trace.has_warning(AuditWarning::PROFILE_FROM_CACHE));
        assert!(!trace.has_warning(AuditWarning::REFERRAL_HISTORY_UNAVAILABLE));
    }

    #[test]
    fn test_audit_trace_round_trip() {
        let trace = AuditTrace {
            steps: vec![sample_step(1)],
            warnings: vec![],
            duration_us: 1000,
        };
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"durationUs\":1000"));
        let back: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
