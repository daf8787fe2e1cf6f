//! Configuration types for the rewards program.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

/// Metadata about the rewards program.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgramMetadata {
    /// Short program code (e.g., "JOBBOARD_REWARDS").
    pub code: String,
    /// The human-readable name of the program.
    pub name: String,
    /// The version or effective date of the rules.
    pub version: String,
    /// ISO currency code for currency-priced services.
    pub currency: String,
}

/// Top companies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TopCompaniesConfig {
    /// Company names that qualify an employer for an elevated tier.
    pub top_companies: Vec<String>,
}

/// Curated list of large or well-known employers.
///
/// Matching is case-insensitive but otherwise exact.
///
/// # Example
///
/// ```
/// use rewards_engine::config::TopCompanyAllowlist;
///
/// let allowlist = TopCompanyAllowlist::new(vec!["Emirates Group".to_string()]);
/// assert!(allowlist.contains("EMIRATES GROUP"));
/// assert!(!allowlist.contains("Emirates"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopCompanyAllowlist {
    /// Lowercased company names.
    names: Vec<String>,
}

impl TopCompanyAllowlist {
    /// Creates an allowlist from company names.
    pub fn new(names: Vec<String>) -> Self {
        let mut names: Vec<String> = names.into_iter().map(|n| n.to_lowercase()).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Returns true if the company name is on the allowlist.
    pub fn contains(&self, company_name: &str) -> bool {
        self.names
            .binary_search(&company_name.to_lowercase())
            .is_ok()
    }

    /// Number of distinct companies on the allowlist.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the allowlist is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The complete rewards configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RewardsConfig {
    /// Program metadata.
    metadata: ProgramMetadata,
    /// Top-company allowlist for employer tiers.
    top_companies: TopCompanyAllowlist,
}

impl RewardsConfig {
    /// Creates a new RewardsConfig from its component parts.
    pub fn new(metadata: ProgramMetadata, top_companies: TopCompanyAllowlist) -> Self {
        Self {
            metadata,
            top_companies,
        }
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Returns the top-company allowlist.
    pub fn top_companies(&self) -> &TopCompanyAllowlist {
        &self.top_companies
    }
}
