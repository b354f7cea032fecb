//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, detail views, and status indicators.

pub mod budget;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list, format_portfolio_summary};
pub use transaction::format_transaction_list;
