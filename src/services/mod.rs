//! Service layer for Spendcap
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod budget;
pub mod spend;
pub mod summary;
pub mod transaction;

pub use budget::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
pub use spend::SpendService;
pub use summary::{PortfolioSummary, SummaryService};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
