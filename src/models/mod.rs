//! Core data models for Spendcap
//!
//! This module contains the data structures that represent the budgeting
//! domain: budgets, transactions, period windows, and money.

pub mod budget;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetStatus, BudgetView};
pub use ids::{BudgetId, TransactionId, UserId};
pub use money::Money;
pub use period::Period;
pub use transaction::{Transaction, TransactionKind};
