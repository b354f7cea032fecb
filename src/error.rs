//! Custom error types for Spendcap
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::budget::BudgetValidationError;
use crate::models::money::MoneyParseError;
use crate::models::period::PeriodParseError;
use crate::models::transaction::TransactionValidationError;

/// The main error type for Spendcap operations
#[derive(Error, Debug)]
pub enum SpendcapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected amounts (non-positive, malformed, too many decimals)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rejected period inputs
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A budget for the same category and period kind already covers the window
    #[error("A {period} budget for '{category}' already covers this window: '{blocking_name}' ({blocking_id})")]
    BudgetOverlap {
        category: String,
        period: String,
        blocking_name: String,
        blocking_id: String,
    },

    /// Spend aggregation failures; callers may retry, totals are never guessed
    #[error("Spend aggregation failed: {0}")]
    Aggregation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendcapError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create an overlap error identifying the budget that blocks the window
    pub fn budget_overlap(
        category: impl Into<String>,
        period: impl Into<String>,
        blocking_name: impl Into<String>,
        blocking_id: impl Into<String>,
    ) -> Self {
        Self::BudgetOverlap {
            category: category.into(),
            period: period.into(),
            blocking_name: blocking_name.into(),
            blocking_id: blocking_id.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidAmount(_) | Self::InvalidPeriod(_)
        )
    }

    /// Check if this is an overlap conflict
    pub fn is_overlap(&self) -> bool {
        matches!(self, Self::BudgetOverlap { .. })
    }

    /// Check if retrying the operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Aggregation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendcapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendcapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<MoneyParseError> for SpendcapError {
    fn from(err: MoneyParseError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}

impl From<PeriodParseError> for SpendcapError {
    fn from(err: PeriodParseError) -> Self {
        Self::InvalidPeriod(err.to_string())
    }
}

impl From<BudgetValidationError> for SpendcapError {
    fn from(err: BudgetValidationError) -> Self {
        match err {
            BudgetValidationError::NonPositiveAmount(_) => Self::InvalidAmount(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

impl From<TransactionValidationError> for SpendcapError {
    fn from(err: TransactionValidationError) -> Self {
        match err {
            TransactionValidationError::NonPositiveAmount(_) => {
                Self::InvalidAmount(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

/// Result type alias for Spendcap operations
pub type SpendcapResult<T> = Result<T, SpendcapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_error_display() {
        let err = SpendcapError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = SpendcapError::budget_not_found("bgt-12345678");
        assert_eq!(err.to_string(), "Budget not found: bgt-12345678");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_overlap_error() {
        let err = SpendcapError::budget_overlap("Groceries", "monthly", "March food", "bgt-12345678");
        assert_eq!(
            err.to_string(),
            "A monthly budget for 'Groceries' already covers this window: 'March food' (bgt-12345678)"
        );
        assert!(err.is_overlap());
        assert!(!err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_aggregation_is_retryable() {
        let err = SpendcapError::Aggregation("transaction store unavailable".into());
        assert!(err.is_retryable());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let spendcap_err: SpendcapError = io_err.into();
        assert!(matches!(spendcap_err, SpendcapError::Io(_)));
    }

    #[test]
    fn test_validation_mapping() {
        let err: SpendcapError = BudgetValidationError::NonPositiveAmount(Money::zero()).into();
        assert!(matches!(err, SpendcapError::InvalidAmount(_)));
        assert!(err.is_validation());

        let err: SpendcapError = BudgetValidationError::EmptyName.into();
        assert!(matches!(err, SpendcapError::Validation(_)));
    }
}
