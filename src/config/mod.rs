//! Configuration loading and management for the Rewards Engine.
//!
//! This module loads the rewards program configuration from YAML files:
//! program metadata and the top-company allowlist used by employer tiers.
//!
//! # Example
//!
//! ```no_run
//! use rewards_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rewards").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ProgramMetadata, RewardsConfig, TopCompaniesConfig, TopCompanyAllowlist};
