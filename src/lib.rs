//! Spendcap - Budget tracking with windowed spending limits
//!
//! This library provides the core functionality for the Spendcap budgeting
//! application. Each budget caps one spending category over a monthly or
//! yearly window, and spend is aggregated from recorded transactions to
//! show how much of each limit is used.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (budgets, transactions, money, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `cli`: Command-line interface handlers
//! - `display`: Terminal output formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use spendcap::config::{paths::SpendcapPaths, settings::Settings};
//!
//! let paths = SpendcapPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::SpendcapError;
