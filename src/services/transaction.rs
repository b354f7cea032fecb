//! Transaction service
//!
//! Provides business logic for recording and listing transactions. Expenses
//! recorded here are what the spend aggregation sums against budgets.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind, UserId};
use crate::storage::Storage;

/// Filter for transaction queries
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub include_inactive: bool,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by start date
    pub fn from(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Filter by end date
    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Include deactivated transactions
    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub memo: Option<String>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> SpendcapResult<Transaction> {
        let mut txn = Transaction::new(
            input.user_id,
            input.kind,
            input.amount,
            input.category.trim(),
            input.date,
        );

        if let Some(memo) = input.memo {
            txn.memo = memo;
        }

        txn.validate()?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} {}", txn.date, txn.category)),
            &txn,
        )?;

        self.storage.updates.bump(input.user_id)?;
        self.storage.updates.save()?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> SpendcapResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by short ID or full ID
    pub fn find(&self, identifier: &str) -> SpendcapResult<Option<Transaction>> {
        let needle = identifier.trim();

        if let Ok(id) = needle.parse::<TransactionId>() {
            if let Some(txn) = self.storage.transactions.get(id)? {
                return Ok(Some(txn));
            }
        }

        // Fall back to the short display form
        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .find(|txn| txn.id.to_string() == needle))
    }

    /// List a user's transactions with optional filtering
    pub fn list(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> SpendcapResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_by_user(user_id)?;

        if let Some(category) = &filter.category {
            transactions.retain(|t| t.category.eq_ignore_ascii_case(category));
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if !filter.include_inactive {
            transactions.retain(|t| t.is_active);
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Deactivate a transaction so it no longer counts toward budgets
    pub fn deactivate(&self, id: TransactionId) -> SpendcapResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| SpendcapError::transaction_not_found(id.to_string()))?;

        if !txn.is_active {
            return Err(SpendcapError::Validation(
                "Transaction is already deactivated".into(),
            ));
        }

        let before = txn.clone();
        txn.deactivate();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        // No explicit summary; the log derives one from the two records
        self.storage.log_deactivate(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} {}", txn.date, txn.category)),
            &before,
            &txn,
            None,
        )?;

        self.storage.updates.bump(txn.user_id)?;
        self.storage.updates.save()?;

        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendcapPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendcapPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn expense_input(user_id: UserId, cents: i64, day: u32) -> CreateTransactionInput {
        CreateTransactionInput {
            user_id,
            kind: TransactionKind::Expense,
            amount: Money::from_cents(cents),
            category: "Groceries".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            memo: None,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service.create(expense_input(user_id, 2500, 5)).unwrap();

        assert!(txn.is_active);
        assert_eq!(txn.amount, Money::from_cents(2500));
        assert_eq!(storage.transactions.count().unwrap(), 1);
        assert_eq!(storage.updates.current(user_id).unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_nonpositive_amount() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut input = expense_input(UserId::new(), 0, 5);
        input.amount = Money::zero();

        let err = service.create(input).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_blank_category() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut input = expense_input(UserId::new(), 2500, 5);
        input.category = "   ".to_string();

        let err = service.create(input).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        service.create(expense_input(user_id, 1000, 5)).unwrap();
        service.create(expense_input(user_id, 2000, 20)).unwrap();
        let mut dining = expense_input(user_id, 3000, 10);
        dining.category = "Dining".to_string();
        service.create(dining).unwrap();

        let groceries = service
            .list(user_id, TransactionFilter::new().category("groceries"))
            .unwrap();
        assert_eq!(groceries.len(), 2);

        let after_mid_month = service
            .list(
                user_id,
                TransactionFilter::new().from(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()),
            )
            .unwrap();
        assert_eq!(after_mid_month.len(), 1);

        let limited = service.list(user_id, TransactionFilter::new().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_deactivate_removes_from_default_listing() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service.create(expense_input(user_id, 2500, 5)).unwrap();
        let deactivated = service.deactivate(txn.id).unwrap();
        assert!(!deactivated.is_active);

        let active = service.list(user_id, TransactionFilter::new()).unwrap();
        assert!(active.is_empty());

        let all = service
            .list(user_id, TransactionFilter::new().include_inactive())
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_deactivate_logs_derived_diff() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service.create(expense_input(user_id, 2500, 5)).unwrap();
        service.deactivate(txn.id).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let deactivation = entries.last().unwrap();
        let diff = deactivation.diff_summary.as_deref().unwrap();
        assert!(diff.contains("is_active: true -> false"));
    }

    #[test]
    fn test_deactivate_twice_fails() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service.create(expense_input(user_id, 2500, 5)).unwrap();
        service.deactivate(txn.id).unwrap();

        let err = service.deactivate(txn.id).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_deactivate_missing_fails() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.deactivate(TransactionId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(expense_input(UserId::new(), 2500, 5))
            .unwrap();

        let found = service.find(&txn.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, txn.id);
    }
}
