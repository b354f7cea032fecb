//! Transaction model
//!
//! Financial activity records. Budgets only ever aggregate active,
//! expense-kind transactions; income records are stored for completeness but
//! never count against a spending limit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Whether a transaction adds to or draws from the user's funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    #[default]
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

fn default_active() -> bool {
    true
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub user_id: UserId,

    /// Income or expense
    pub kind: TransactionKind,

    /// Amount as a positive magnitude; direction comes from `kind`
    pub amount: Money,

    /// Expense category label this transaction is recorded under
    pub category: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Soft-delete flag; inactive transactions never count toward spend
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        user_id: UserId,
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            user_id,
            kind,
            amount,
            category: category.into(),
            date,
            is_active: true,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an expense transaction
    pub fn expense(
        user_id: UserId,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(user_id, TransactionKind::Expense, amount, category, date)
    }

    /// Create an income transaction
    pub fn income(
        user_id: UserId,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(user_id, TransactionKind::Income, amount, category, date)
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Soft-delete this transaction
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive (got {})", amount)
            }
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new()
    }

    #[test]
    fn test_new_transaction() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date);

        assert_eq!(txn.user_id, user_id);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount, Money::from_cents(5000));
        assert_eq!(txn.category, "Groceries");
        assert!(txn.is_active);
    }

    #[test]
    fn test_income_never_counts_as_expense() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::income(user_id, Money::from_cents(250000), "Salary", date);

        assert!(!txn.is_expense());
    }

    #[test]
    fn test_deactivate() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date);

        txn.deactivate();
        assert!(!txn.is_active);
    }

    #[test]
    fn test_validation() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date);
        assert!(txn.validate().is_ok());

        let zero = Transaction::expense(user_id, Money::zero(), "Groceries", date);
        assert!(matches!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        let blank = Transaction::expense(user_id, Money::from_cents(100), "  ", date);
        assert_eq!(
            blank.validate(),
            Err(TransactionValidationError::EmptyCategory)
        );
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Expense).unwrap(),
            "\"expense\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            "\"income\""
        );
    }

    #[test]
    fn test_serialization() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date);

        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert_eq!(txn.amount, deserialized.amount);
        assert_eq!(txn.category, deserialized.category);
        assert!(deserialized.is_active);
    }

    #[test]
    fn test_display() {
        let user_id = test_user_id();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date);

        assert_eq!(format!("{}", txn), "2025-01-15 expense Groceries $50.00");
    }
}
