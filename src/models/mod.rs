//! Core data models for the Rewards Engine.
//!
//! This module contains the read-only snapshots consumed from other services
//! (profiles, referral history, carts) and the shared audit types.

mod audit;
mod cart;
mod profile;
mod referral;
mod snapshot;
mod tier;

pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use cart::{CartLineItem, HybridPayment, LineSettlement, PaymentMethod};
pub use profile::{
    Education, JobPreferences, ProfessionalExperience, Profile, RewardComponents, SocialLinks,
    is_filled,
};
pub use referral::{ReferralHistory, ReferralStats};
pub use snapshot::{Freshness, Snapshot};
pub use tier::{SubjectType, Tier};
