//! Referral history model.
//!
//! The referral-history service reports per-status counts for the users a
//! member has referred. Only the `hired` count is consumed by the engine.

use serde::{Deserialize, Serialize};

/// Per-status referral counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    /// All referrals.
    #[serde(default)]
    pub total: u64,
    /// Referrals not yet reviewed.
    #[serde(default)]
    pub pending: u64,
    /// Referrals shortlisted by an employer.
    #[serde(default)]
    pub shortlisted: u64,
    /// Referrals with an interview booked.
    #[serde(default)]
    pub interview_scheduled: u64,
    /// Referrals that resulted in a hire.
    #[serde(default)]
    pub hired: u64,
    /// Referrals that were rejected.
    #[serde(default)]
    pub rejected: u64,
}

/// The response body of the referral-history service.
///
/// # Example
///
/// ```
/// use rewards_engine::models::ReferralHistory;
///
/// let history: ReferralHistory = serde_json::from_str(
///     r#"{"stats": {"total": 9, "pending": 2, "shortlisted": 1, "interview_scheduled": 1, "hired": 3, "rejected": 2}}"#,
/// ).unwrap();
/// assert_eq!(history.stats.hired, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralHistory {
    /// Aggregated counts.
    pub stats: ReferralStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts_default_to_zero() {
        let history: ReferralHistory = serde_json::from_str(r#"{"stats": {"hired": 2}}"#).unwrap();
        assert_eq!(history.stats.hired, 2);
        assert_eq!(history.stats.total, 0);
        assert_eq!(history.stats.interview_scheduled, 0);
    }

    #[test]
    fn test_missing_stats_is_an_error() {
        assert!(serde_json::from_str::<ReferralHistory>("{}").is_err());
    }
}
