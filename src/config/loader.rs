//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rewards
//! program configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ProgramMetadata, RewardsConfig, TopCompaniesConfig, TopCompanyAllowlist};

/// Loads and provides access to rewards configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/rewards/
/// ├── program.yaml        # Program metadata
/// └── top_companies.yaml  # Employer tier allowlist
/// ```
///
/// # Example
///
/// ```no_run
/// use rewards_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rewards").unwrap();
/// println!("Loaded program: {}", loader.program().name);
/// assert!(loader.top_companies().contains("ADNOC"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RewardsConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/rewards")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ProgramMetadata>(&path.join("program.yaml"))?;
        let top_companies = Self::load_yaml::<TopCompaniesConfig>(&path.join("top_companies.yaml"))?;

        let allowlist = TopCompanyAllowlist::new(top_companies.top_companies);
        debug!(
            program = %metadata.code,
            version = %metadata.version,
            top_companies = allowlist.len(),
            "Loaded rewards configuration"
        );

        Ok(Self {
            config: RewardsConfig::new(metadata, allowlist),
        })
    }

    /// Builds configuration in memory without touching the filesystem.
    pub fn from_parts(metadata: ProgramMetadata, top_companies: Vec<String>) -> Self {
        Self {
            config: RewardsConfig::new(metadata, TopCompanyAllowlist::new(top_companies)),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rewards configuration.
    pub fn config(&self) -> &RewardsConfig {
        &self.config
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        self.config.program()
    }

    /// Returns the top-company allowlist.
    pub fn top_companies(&self) -> &TopCompanyAllowlist {
        self.config.top_companies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/rewards"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rewards-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.program().code, "JOBBOARD_REWARDS");
        assert_eq!(loader.program().currency, "AED");
    }

    #[test]
    fn test_shipped_allowlist_contains_known_companies() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.top_companies().contains("ADNOC"));
        assert!(loader.top_companies().contains("emirates group"));
        assert!(!loader.top_companies().contains("Unknown Trading LLC"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("program.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(
            dir.join("program.yaml"),
            "code: X\nname: Y\nversion: Z\ncurrency: AED\n",
        )
        .unwrap();
        fs::write(dir.join("top_companies.yaml"), "top_companies: [unclosed\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("top_companies.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_field_returns_parse_error() {
        let dir = scratch_dir("missing-field");
        fs::write(dir.join("program.yaml"), "code: X\nname: Y\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("version"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_parts() {
        let loader = ConfigLoader::from_parts(
            ProgramMetadata {
                code: "TEST".to_string(),
                name: "Test Program".to_string(),
                version: "2026-01-01".to_string(),
                currency: "AED".to_string(),
            },
            vec!["Acme".to_string()],
        );
        assert_eq!(loader.program().name, "Test Program");
        assert!(loader.top_companies().contains("ACME"));
    }
}
