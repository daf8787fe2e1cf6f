//! Membership tier and subject type.

use serde::{Deserialize, Serialize};

/// Ordered membership tier.
///
/// Jobseekers and employers are classified by different rules but land on
/// the same four tiers. Platinum is terminal.
///
/// # Example
///
/// ```
/// use rewards_engine::models::Tier;
///
/// assert!(Tier::Blue < Tier::Silver);
/// assert!(Tier::Gold < Tier::Platinum);
/// assert_eq!(Tier::Gold.next(), Some(Tier::Platinum));
/// assert_eq!(Tier::Platinum.next(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Entry tier.
    Blue,
    /// Second tier.
    Silver,
    /// Third tier.
    Gold,
    /// Top tier.
    Platinum,
}

impl Tier {
    /// Returns the tier directly above this one, or `None` for Platinum.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Blue => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Blue => "Blue",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

/// The kind of account being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    /// A job seeker account.
    Jobseeker,
    /// An employer account.
    Employer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_ordered() {
        let mut tiers = vec![Tier::Platinum, Tier::Blue, Tier::Gold, Tier::Silver];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![Tier::Blue, Tier::Silver, Tier::Gold, Tier::Platinum]
        );
    }

    #[test]
    fn test_next_walks_up_to_platinum() {
        let mut tier = Tier::Blue;
        let mut steps = 0;
        while let Some(next) = tier.next() {
            assert!(next > tier);
            tier = next;
            steps += 1;
        }
        assert_eq!(tier, Tier::Platinum);
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(serde_json::to_string(&Tier::Platinum).unwrap(), "\"platinum\"");
        let tier: Tier = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(tier, Tier::Silver);
    }

    #[test]
    fn test_subject_type_serialization() {
        assert_eq!(
            serde_json::to_string(&SubjectType::Jobseeker).unwrap(),
            "\"jobseeker\""
        );
        let subject: SubjectType = serde_json::from_str("\"employer\"").unwrap();
        assert_eq!(subject, SubjectType::Employer);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tier::Blue.label(), "Blue");
        assert_eq!(Tier::Platinum.label(), "Platinum");
    }
}
