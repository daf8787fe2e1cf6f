//! Calculation logic for the Rewards Engine.
//!
//! This module contains the pure calculation functions of the engine:
//! profile completion scoring, referral attribution splitting, point
//! aggregation with balance source resolution, jobseeker and employer tier
//! classification, and hybrid checkout totals with affordability checks.

mod hybrid_checkout;
mod points_aggregation;
mod profile_completion;
mod referral_attribution;
mod tier_classification;

pub use hybrid_checkout::{
    CheckoutComputation, CheckoutRejection, CheckoutTotals, CheckoutValidation,
    compute_checkout_totals, validate_checkout,
};
pub use points_aggregation::{
    BASE_POINTS, BalanceSource, POINTS_PER_COMPLETION_PERCENT, PointsBreakdown, ResolvedBalance,
    aggregate_points, base_points, resolve_available_points,
};
pub use profile_completion::{
    COMPLETION_CHECKLIST_SIZE, ProfileCompletion, completion_checklist, completion_percentage,
    score_profile_completion,
};
pub use referral_attribution::{
    POINTS_PER_HIRE, ReferralAttribution, ReferralSplit, split_referral_points,
};
pub use tier_classification::{
    PLATINUM_POINTS_THRESHOLD, TierDecision, classify_employer, classify_jobseeker,
    parse_team_size,
};
