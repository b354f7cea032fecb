//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{SpendcapError, SpendcapResult};

/// Parse a date argument using the configured date format
pub fn parse_date(input: &str, format: &str) -> SpendcapResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), format).map_err(|_| {
        SpendcapError::Validation(format!(
            "Invalid date '{}' (expected format {})",
            input, format
        ))
    })
}
