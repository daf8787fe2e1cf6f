//! Profile completion scoring.
//!
//! A profile is scored against a fixed 24-entry checklist. An entry is
//! complete when the field is present and non-empty; content quality is
//! never judged.

use crate::models::{AuditStep, Profile, is_filled};

/// Number of entries in the completion checklist.
pub const COMPLETION_CHECKLIST_SIZE: u32 = 24;

/// The result of scoring a profile, including the audit step.
#[derive(Debug, Clone)]
pub struct ProfileCompletion {
    /// Number of checklist entries that are complete.
    pub completed_count: u32,
    /// Completion percentage, 0 to 100.
    pub percentage: u32,
    /// Keys of the checklist entries still missing, in checklist order.
    pub missing_fields: Vec<&'static str>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Evaluates every checklist entry against the profile.
///
/// The order is fixed: personal info, primary experience, primary
/// education, presence checks, social links.
pub fn completion_checklist(profile: &Profile) -> [(&'static str, bool); 24] {
    let experience = profile.primary_experience();
    let education = profile.primary_education();
    let social = &profile.social_links;

    [
        ("fullName", is_filled(&profile.full_name)),
        ("email", is_filled(&profile.email)),
        ("phoneNumber", is_filled(&profile.phone_number)),
        ("dateOfBirth", is_filled(&profile.date_of_birth)),
        ("gender", is_filled(&profile.gender)),
        ("nationality", is_filled(&profile.nationality)),
        ("currentLocation", is_filled(&profile.current_location)),
        ("profilePicture", is_filled(&profile.profile_picture)),
        ("professionalSummary", is_filled(&profile.professional_summary)),
        (
            "experience.currentRole",
            experience.is_some_and(|e| is_filled(&e.current_role)),
        ),
        (
            "experience.company",
            experience.is_some_and(|e| is_filled(&e.company)),
        ),
        (
            "experience.yearsOfExperience",
            experience.is_some_and(|e| e.years_of_experience.is_some()),
        ),
        (
            "experience.industry",
            experience.is_some_and(|e| is_filled(&e.industry)),
        ),
        (
            "education.highestDegree",
            education.is_some_and(|e| is_filled(&e.highest_degree)),
        ),
        (
            "education.institution",
            education.is_some_and(|e| is_filled(&e.institution)),
        ),
        (
            "education.fieldOfStudy",
            education.is_some_and(|e| is_filled(&e.field_of_study)),
        ),
        (
            "education.graduationYear",
            education.is_some_and(|e| e.graduation_year.is_some()),
        ),
        ("skills", !profile.skills.is_empty()),
        (
            "jobPreferences",
            profile
                .job_preferences
                .as_ref()
                .is_some_and(|p| p.is_populated()),
        ),
        ("certifications", !profile.certifications.is_empty()),
        ("resume", is_filled(&profile.resume)),
        ("socialLinks.linkedIn", is_filled(&social.linked_in)),
        ("socialLinks.instagram", is_filled(&social.instagram)),
        ("socialLinks.twitterX", is_filled(&social.twitter_x)),
    ]
}

/// Converts a completed-entry count into a percentage, rounding half up.
///
/// Counts above the checklist size are capped at 100%.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::completion_percentage;
///
/// assert_eq!(completion_percentage(12), 50);
/// assert_eq!(completion_percentage(3), 13); // 12.5 rounds up
/// assert_eq!(completion_percentage(24), 100);
/// ```
pub fn completion_percentage(completed_count: u32) -> u32 {
    let completed = completed_count.min(COMPLETION_CHECKLIST_SIZE);
    // round(completed / size * 100) in integers: (2 * 100 * c + size) / (2 * size)
    (200 * completed + COMPLETION_CHECKLIST_SIZE) / (2 * COMPLETION_CHECKLIST_SIZE)
}

/// Scores a profile's completion.
///
/// Never fails: absent or malformed fields simply count as incomplete.
///
/// # Arguments
///
/// * `profile` - The profile snapshot to score
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::score_profile_completion;
/// use rewards_engine::models::Profile;
///
/// let profile = Profile {
///     full_name: Some("Mariam".to_string()),
///     email: Some("mariam@example.com".to_string()),
///     skills: vec!["design".to_string()],
///     ..Default::default()
/// };
///
/// let result = score_profile_completion(&profile, 1);
/// assert_eq!(result.completed_count, 3);
/// assert_eq!(result.percentage, 13);
/// ```
pub fn score_profile_completion(profile: &Profile, step_number: u32) -> ProfileCompletion {
    let checklist = completion_checklist(profile);

    let completed_count = checklist.iter().filter(|(_, done)| *done).count() as u32;
    let missing_fields: Vec<&'static str> = checklist
        .iter()
        .filter(|(_, done)| !*done)
        .map(|(key, _)| *key)
        .collect();
    let percentage = completion_percentage(completed_count);

    let audit_step = AuditStep {
        step_number,
        rule_id: "profile_completion".to_string(),
        rule_name: "Profile Completion Score".to_string(),
        input: serde_json::json!({
            "checklist_size": COMPLETION_CHECKLIST_SIZE,
            "missing_fields": missing_fields,
        }),
        output: serde_json::json!({
            "completed_count": completed_count,
            "percentage": percentage
        }),
        reasoning: format!(
            "{} of {} checklist fields complete = {}%",
            completed_count, COMPLETION_CHECKLIST_SIZE, percentage
        ),
    };

    ProfileCompletion {
        completed_count,
        percentage,
        missing_fields,
        audit_step,
    }
}
