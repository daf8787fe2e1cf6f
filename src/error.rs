//! Error types for the Rewards Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only contract violations and unavailable collaborators are errors;
//! recoverable degradations (missing profile data, a missing hired count,
//! insufficient points) are reported through normal return values.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for the Rewards Engine.
///
/// # Example
///
/// ```
/// use rewards_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/program.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/program.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A cart line item does not carry the amounts its payment method requires.
    #[error("Invalid cart item '{title}': {message}")]
    InvalidCartItem {
        /// The title of the offending line item.
        title: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// The requested points discount is larger than the available balance.
    #[error("Points discount of {requested} exceeds available balance of {available}")]
    DiscountExceedsBalance {
        /// The discount the caller asked for.
        requested: u64,
        /// The balance available at the time of the request.
        available: u64,
    },

    /// Adding a cart item's AED amount overflowed the decimal range.
    #[error("AED total overflows when adding cart item '{title}'")]
    AmountOverflow {
        /// The title of the line item whose amount could not be added.
        title: String,
    },

    /// A cached balance was offered where a freshly fetched one is required.
    #[error("Point balance fetched at {fetched_at} is a cached fallback, not a fresh snapshot")]
    StaleBalance {
        /// When the cached balance was originally fetched.
        fetched_at: DateTime<Utc>,
    },

    /// An external collaborator could not be reached.
    #[error("Source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        /// The collaborator that failed (e.g. "profile_store").
        source_name: String,
        /// A description of the failure.
        message: String,
    },

    /// No fresh profile could be fetched and no cached snapshot exists.
    #[error("Profile unavailable for user '{user_id}'")]
    ProfileUnavailable {
        /// The user whose profile could not be obtained.
        user_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/program.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/program.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_cart_item_displays_title_and_message() {
        let error = EngineError::InvalidCartItem {
            title: "CV Review".to_string(),
            message: "payment method 'points' requires a points amount".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid cart item 'CV Review': payment method 'points' requires a points amount"
        );
    }

    #[test]
    fn test_discount_exceeds_balance_displays_both_figures() {
        let error = EngineError::DiscountExceedsBalance {
            requested: 300,
            available: 200,
        };
        assert_eq!(
            error.to_string(),
            "Points discount of 300 exceeds available balance of 200"
        );
    }

    #[test]
    fn test_amount_overflow_displays_title() {
        let error = EngineError::AmountOverflow {
            title: "Executive Search".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "AED total overflows when adding cart item 'Executive Search'"
        );
    }

    #[test]
    fn test_stale_balance_displays_fetch_time() {
        let fetched_at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        let error = EngineError::StaleBalance { fetched_at };
        assert!(error.to_string().contains("2026-01-15 09:30:00"));
        assert!(error.to_string().contains("cached fallback"));
    }

    #[test]
    fn test_source_unavailable_displays_source_and_message() {
        let error = EngineError::SourceUnavailable {
            source_name: "referral_history".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Source 'referral_history' unavailable: connection refused"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_profile_unavailable() -> EngineResult<()> {
            Err(EngineError::ProfileUnavailable {
                user_id: "user_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_profile_unavailable()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
