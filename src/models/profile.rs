//! Profile snapshot model and related types.
//!
//! The profile is owned by the external profile store and arrives as a
//! loosely-typed JSON document. Every field is optional, and a value of the
//! wrong JSON type is treated as absent instead of failing the whole
//! snapshot, so a single malformed field can only ever make the profile
//! look less complete.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes any value into `Some(T)`, or `None` if it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes any value into `T`, falling back to `T::default()`.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Accepts strings as-is and numbers in their decimal rendering.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Reads a non-negative whole number from a JSON number or numeric string.
///
/// Fractions are truncated and a trailing `+` is ignored ("5+" reads as 5).
fn number_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => s.trim().trim_end_matches('+').trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn lenient_points<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0))
}

/// A single professional experience entry.
///
/// Only the first entry of [`Profile::professional_experience`] takes part
/// in completion scoring and tier classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalExperience {
    /// The role currently held.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    /// The employer for this role.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Total years of experience.
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u64>,
    /// The industry the role is in.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// A single education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Highest degree attained.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub highest_degree: Option<String>,
    /// The awarding institution.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Field of study.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    /// Year of graduation.
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u64>,
}

/// The job seeker's stated job preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    /// Job titles the user is looking for.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub preferred_job_titles: Vec<String>,
    /// Locations the user is willing to work in.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub preferred_locations: Vec<String>,
    /// Employment type (e.g. "full_time", "contract").
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    /// Expected salary, free-form.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<String>,
}

impl JobPreferences {
    /// Returns true if at least one preference has been filled in.
    pub fn is_populated(&self) -> bool {
        !self.preferred_job_titles.is_empty()
            || !self.preferred_locations.is_empty()
            || is_filled(&self.job_type)
            || is_filled(&self.expected_salary)
    }
}

/// Social media links on the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    /// LinkedIn profile URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    /// Instagram handle or URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    /// Twitter / X handle or URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub twitter_x: Option<String>,
}

/// Independently-sourced point contributions recorded on the profile.
///
/// `referral_reward_points` is a single accumulated figure covering both
/// signup and placement referrals; it must be split with
/// [`crate::calculation::split_referral_points`] before use.
///
/// # Example
///
/// ```
/// use rewards_engine::models::RewardComponents;
///
/// let rewards: RewardComponents = serde_json::from_str(
///     r#"{"applyForJobs": 20, "rmService": 100, "socialMediaBonus": 10, "referralRewardPoints": 140}"#,
/// ).unwrap();
/// assert_eq!(rewards.rm_service, 100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardComponents {
    /// Points earned by applying for jobs on behalf of referred users.
    #[serde(default, deserialize_with = "lenient_points")]
    pub apply_for_jobs: u64,
    /// Points from a relationship-manager service purchase.
    #[serde(default, deserialize_with = "lenient_points")]
    pub rm_service: u64,
    /// Flat bonus for following the platform's social channels.
    #[serde(default, deserialize_with = "lenient_points")]
    pub social_media_bonus: u64,
    /// Undifferentiated signup + placement referral total.
    #[serde(default, deserialize_with = "lenient_points")]
    pub referral_reward_points: u64,
}

/// A read-only snapshot of a user profile from the profile store.
///
/// # Example
///
/// ```
/// use rewards_engine::models::Profile;
///
/// let profile: Profile = serde_json::from_str(r#"{
///     "fullName": "Aisha Al Mansoori",
///     "email": 42,
///     "professionalExperience": [{"yearsOfExperience": "5+"}]
/// }"#).unwrap();
///
/// assert_eq!(profile.full_name.as_deref(), Some("Aisha Al Mansoori"));
/// assert_eq!(profile.years_of_experience(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Full name.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Contact email.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Date of birth, as stored by the profile service.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Gender.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Nationality.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Current city or emirate.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    /// Profile picture URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Short professional summary.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    /// Experience entries, most recent first.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub professional_experience: Vec<ProfessionalExperience>,
    /// Education entries, highest first.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub education: Vec<Education>,
    /// Listed skills.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub skills: Vec<String>,
    /// Job preferences.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub job_preferences: Option<JobPreferences>,
    /// Listed certifications.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub certifications: Vec<String>,
    /// Uploaded resume URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// Social media links.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub social_links: SocialLinks,
    /// Point contributions from activity sources.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub rewards: RewardComponents,
    /// Points removed by administrators.
    #[serde(default, deserialize_with = "lenient_points")]
    pub deducted_points: u64,
    /// Server-computed point balance, when the profile store provides one.
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub points: Option<u64>,
    /// Employer team size, e.g. "51-200", "1000+" or "250".
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    /// Employer company name.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Profile {
    /// Returns the first (most recent) experience entry, if any.
    pub fn primary_experience(&self) -> Option<&ProfessionalExperience> {
        self.professional_experience.first()
    }

    /// Returns the first education entry, if any.
    pub fn primary_education(&self) -> Option<&Education> {
        self.education.first()
    }

    /// Years of experience from the primary experience entry, 0 if unknown.
    pub fn years_of_experience(&self) -> u64 {
        self.primary_experience()
            .and_then(|e| e.years_of_experience)
            .unwrap_or(0)
    }
}

/// Returns true if an optional text field holds a non-empty string.
pub fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
