//! Result types produced by the [`super::RewardsEngine`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{
    BalanceSource, CheckoutTotals, CheckoutValidation, ReferralAttribution,
};
use crate::models::{AuditTrace, Snapshot, SubjectType, Tier};

/// Profile completion figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    /// Number of complete checklist entries.
    pub completed_count: u32,
    /// Completion percentage.
    pub percentage: u32,
    /// Keys of the missing checklist entries.
    pub missing_fields: Vec<String>,
}

/// Referral attribution figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSummary {
    /// Hired count from referral history, if it could be fetched.
    pub hired_referral_count: Option<u64>,
    /// Points attributed to hires.
    pub placement_points: u64,
    /// Points attributed to signups.
    pub signup_points: u64,
    /// Whether the split was reconciled or degraded.
    pub attribution: ReferralAttribution,
}

/// Point balance figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSummary {
    /// Points from profile completion.
    pub base_points: u64,
    /// Base plus activity sources and signup points.
    pub activity_points: u64,
    /// Activity plus placement points.
    pub total_points: u64,
    /// Administrative deductions.
    pub deducted_points: u64,
    /// Locally recomputed balance after deductions.
    pub local_available_points: u64,
    /// The balance in effect (authoritative when available).
    pub available_points: u64,
    /// Which figure `available_points` came from.
    pub balance_source: BalanceSource,
}

/// The complete rewards picture for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsSummary {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The user the summary is for.
    pub user_id: String,
    /// Which tier rule set was applied.
    pub subject: SubjectType,
    /// Profile completion.
    pub completion: CompletionSummary,
    /// Referral attribution.
    pub referral: ReferralSummary,
    /// Point balances.
    pub points: PointsSummary,
    /// Assigned tier.
    pub tier: Tier,
    /// The tier above the assigned one, if any.
    pub next_tier: Option<Tier>,
    /// The available balance with its provenance.
    pub balance: Snapshot<u64>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// The outcome of preparing a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDecision {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The purchasing user.
    pub user_id: String,
    /// Cart totals.
    pub totals: CheckoutTotals,
    /// Whether the cart is affordable.
    pub validation: CheckoutValidation,
    /// True if the AED total must go through the currency payment step.
    pub requires_currency_settlement: bool,
    /// The fresh balance the decision was made against.
    pub balance: Snapshot<u64>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
