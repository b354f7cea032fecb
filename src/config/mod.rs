//! Configuration module for Spendcap
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Application preferences

pub mod paths;
pub mod settings;

pub use paths::SpendcapPaths;
pub use settings::Settings;
