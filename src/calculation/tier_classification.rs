//! Membership tier classification.
//!
//! Jobseekers and employers are classified by separate rule sets that land
//! on the same [`Tier`] scale. Rules are evaluated top to bottom and the
//! first match wins.
//!
//! Two boundary quirks are kept exactly as the product defines them today
//! and are pinned by tests:
//! - a jobseeker with exactly 5 years matches both the Gold and the Silver
//!   rule; Gold is evaluated first and wins;
//! - an employer with more than 1000 staff, fewer than 500 points and no
//!   allowlist match falls through to Blue.

use crate::config::TopCompanyAllowlist;
use crate::models::{AuditStep, Tier};

/// Points at which any member reaches Platinum.
pub const PLATINUM_POINTS_THRESHOLD: u64 = 500;

/// The result of a tier classification, including the audit step.
#[derive(Debug, Clone)]
pub struct TierDecision {
    /// The assigned tier.
    pub tier: Tier,
    /// Identifier of the rule that produced the tier.
    pub matched_rule: &'static str,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Parses an employer team-size string into a representative head count.
///
/// Accepts `"N+"`, `"N-M"` (lower bound is used) and bare integers, with
/// surrounding whitespace and thousands separators ignored. Anything else
/// yields 0.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::parse_team_size;
///
/// assert_eq!(parse_team_size("1000+"), 1000);
/// assert_eq!(parse_team_size("201-500"), 201);
/// assert_eq!(parse_team_size("75"), 75);
/// assert_eq!(parse_team_size("a few"), 0);
/// ```
pub fn parse_team_size(team_size: &str) -> u64 {
    let cleaned = team_size.trim().replace(',', "");
    let lower = match cleaned.split_once('-') {
        Some((lower, _)) => lower,
        None => cleaned.strip_suffix('+').unwrap_or(&cleaned),
    };
    lower.trim().parse().unwrap_or(0)
}

/// Classifies a jobseeker.
///
/// Rules, in order:
/// 1. nationality contains "emirati" (any case) → Platinum
/// 2. points ≥ 500 → Platinum
/// 3. years ≥ 5 → Gold
/// 4. 2 ≤ years ≤ 5 → Silver
/// 5. otherwise → Blue
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::classify_jobseeker;
/// use rewards_engine::models::Tier;
///
/// assert_eq!(classify_jobseeker(0, 0, Some("Emirati"), 1).tier, Tier::Platinum);
/// assert_eq!(classify_jobseeker(499, 5, None, 1).tier, Tier::Gold);
/// assert_eq!(classify_jobseeker(100, 3, Some("Indian"), 1).tier, Tier::Silver);
/// assert_eq!(classify_jobseeker(100, 1, None, 1).tier, Tier::Blue);
/// ```
pub fn classify_jobseeker(
    points: u64,
    years_of_experience: u64,
    nationality: Option<&str>,
    step_number: u32,
) -> TierDecision {
    let is_emirati = nationality.is_some_and(|n| n.to_lowercase().contains("emirati"));

    let (tier, matched_rule, reasoning) = if is_emirati {
        (
            Tier::Platinum,
            "nationality_override",
            "Emirati nationality qualifies for Platinum".to_string(),
        )
    } else if points >= PLATINUM_POINTS_THRESHOLD {
        (
            Tier::Platinum,
            "points_threshold",
            format!(
                "{} points meets the {} point Platinum threshold",
                points, PLATINUM_POINTS_THRESHOLD
            ),
        )
    } else if years_of_experience >= 5 {
        (
            Tier::Gold,
            "experience_gold",
            format!("{} years of experience (>= 5) qualifies for Gold", years_of_experience),
        )
    } else if (2..=5).contains(&years_of_experience) {
        (
            Tier::Silver,
            "experience_silver",
            format!(
                "{} years of experience (2-5) qualifies for Silver",
                years_of_experience
            ),
        )
    } else {
        (
            Tier::Blue,
            "default",
            format!(
                "{} points and {} years of experience meet no higher tier",
                points, years_of_experience
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_jobseeker".to_string(),
        rule_name: "Jobseeker Tier Classification".to_string(),
        input: serde_json::json!({
            "points": points,
            "years_of_experience": years_of_experience,
            "nationality": nationality
        }),
        output: serde_json::json!({
            "tier": tier,
            "matched_rule": matched_rule
        }),
        reasoning,
    };

    TierDecision {
        tier,
        matched_rule,
        audit_step,
    }
}

/// Classifies an employer.
///
/// Rules, in order:
/// 1. points ≥ 500 → Platinum
/// 2. team size ≤ 100 → Blue
/// 3. team size 101–500 → Silver
/// 4. team size 501–1000, or company name on the allowlist → Gold
/// 5. otherwise → Blue
///
/// A missing or unparseable team size counts as 0.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::classify_employer;
/// use rewards_engine::config::TopCompanyAllowlist;
/// use rewards_engine::models::Tier;
///
/// let allowlist = TopCompanyAllowlist::new(vec!["Emirates Group".to_string()]);
///
/// assert_eq!(classify_employer(500, Some("0-10"), None, &allowlist, 1).tier, Tier::Platinum);
/// assert_eq!(classify_employer(0, Some("201-500"), None, &allowlist, 1).tier, Tier::Silver);
/// assert_eq!(
///     classify_employer(0, Some("5000+"), Some("emirates group"), &allowlist, 1).tier,
///     Tier::Gold
/// );
/// ```
pub fn classify_employer(
    points: u64,
    team_size: Option<&str>,
    company_name: Option<&str>,
    top_companies: &TopCompanyAllowlist,
    step_number: u32,
) -> TierDecision {
    let head_count = team_size.map(parse_team_size).unwrap_or(0);
    let on_allowlist = company_name.is_some_and(|name| top_companies.contains(name));

    let (tier, matched_rule, reasoning) = if points >= PLATINUM_POINTS_THRESHOLD {
        (
            Tier::Platinum,
            "points_threshold",
            format!(
                "{} points meets the {} point Platinum threshold",
                points, PLATINUM_POINTS_THRESHOLD
            ),
        )
    } else if head_count <= 100 {
        (
            Tier::Blue,
            "team_size_blue",
            format!("Team size {} (<= 100) is Blue", head_count),
        )
    } else if head_count <= 500 {
        (
            Tier::Silver,
            "team_size_silver",
            format!("Team size {} (101-500) is Silver", head_count),
        )
    } else if head_count <= 1000 || on_allowlist {
        let reasoning = if head_count <= 1000 {
            format!("Team size {} (501-1000) is Gold", head_count)
        } else {
            format!("Team size {} with a top-company allowlist match is Gold", head_count)
        };
        (Tier::Gold, "team_size_or_top_company_gold", reasoning)
    } else {
        (
            Tier::Blue,
            "fallback",
            format!(
                "Team size {} above 1000 with no allowlist match falls back to Blue",
                head_count
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_employer".to_string(),
        rule_name: "Employer Tier Classification".to_string(),
        input: serde_json::json!({
            "points": points,
            "team_size": team_size,
            "parsed_team_size": head_count,
            "company_name": company_name,
            "on_top_company_allowlist": on_allowlist
        }),
        output: serde_json::json!({
            "tier": tier,
            "matched_rule": matched_rule
        }),
        reasoning,
    };

    TierDecision {
        tier,
        matched_rule,
        audit_step,
    }
}
