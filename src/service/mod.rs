//! Orchestration over external collaborators.
//!
//! The [`RewardsEngine`] fetches the profile and referral history through
//! the traits in this module, runs the pure calculations and returns a
//! summary or checkout decision with a complete audit trace. Degraded
//! sources are reported as warnings in the trace rather than as errors,
//! except where a purchase would be authorized from stale data.

mod engine;
mod sources;
mod summary;

pub use engine::RewardsEngine;
pub use sources::{InMemorySnapshotCache, ProfileStore, ReferralHistorySource, SnapshotCache};
pub use summary::{
    CheckoutDecision, CompletionSummary, PointsSummary, ReferralSummary, RewardsSummary,
};
