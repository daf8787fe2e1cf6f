//! Rewards Ledger & Tier Engine for the job-board platform
//!
//! This crate computes profile completion, reward point balances, referral
//! attribution, membership tiers and hybrid (points + AED) checkout totals
//! from read-only snapshots supplied by the surrounding services.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
