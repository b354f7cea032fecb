//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, and answers
//! the windowed spend queries budgets are measured against.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Money, Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Aggregated spend for one category window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpendTotal {
    /// Sum of matching expense amounts
    pub total: Money,
    /// Number of transactions behind the sum
    pub count: usize,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> SpendcapResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            by_user.entry(txn.user_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> SpendcapResult<()> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> SpendcapResult<Option<Transaction>> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> SpendcapResult<Vec<Transaction>> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get all transactions for a user, newest first
    pub fn get_by_user(&self, user_id: UserId) -> SpendcapResult<Vec<Transaction>> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id).cloned())
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Sum active expense transactions for one category inside a window.
    ///
    /// Both window ends are inclusive. Income and deactivated transactions
    /// never count. A window with no matches sums to zero, which is a valid
    /// answer, not an error.
    pub fn sum_expenses_in_window(
        &self,
        user_id: UserId,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SpendcapResult<SpendTotal> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);

        let mut total = Money::zero();
        let mut count = 0;
        for txn in ids.iter().filter_map(|id| data.get(id)) {
            if txn.is_active
                && txn.is_expense()
                && txn.category == category
                && txn.date >= start
                && txn.date <= end
            {
                total += txn.amount;
                count += 1;
            }
        }

        Ok(SpendTotal { total, count })
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> SpendcapResult<()> {
        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        // Remove from the old index entry if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_user.entry(txn.user_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> SpendcapResult<usize> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user_id = UserId::new();
        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", day(2025, 1, 15));
        let id = txn.id;

        repo.upsert(txn).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
    }

    #[test]
    fn test_get_by_user() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user1 = UserId::new();
        let user2 = UserId::new();
        let date = day(2025, 1, 15);

        repo.upsert(Transaction::expense(user1, Money::from_cents(100), "A", date)).unwrap();
        repo.upsert(Transaction::expense(user1, Money::from_cents(200), "B", date)).unwrap();
        repo.upsert(Transaction::expense(user2, Money::from_cents(300), "A", date)).unwrap();

        assert_eq!(repo.get_by_user(user1).unwrap().len(), 2);
        assert_eq!(repo.get_by_user(user2).unwrap().len(), 1);
    }

    #[test]
    fn test_sum_filters_kind_and_activity() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user_id = UserId::new();
        let date = day(2025, 3, 10);

        repo.upsert(Transaction::expense(user_id, Money::from_cents(5000), "Groceries", date)).unwrap();
        repo.upsert(Transaction::expense(user_id, Money::from_cents(2500), "Groceries", date)).unwrap();
        // Income in the same category never counts
        repo.upsert(Transaction::income(user_id, Money::from_cents(90000), "Groceries", date)).unwrap();
        // Deactivated expenses never count
        let mut voided = Transaction::expense(user_id, Money::from_cents(4000), "Groceries", date);
        voided.deactivate();
        repo.upsert(voided).unwrap();
        // Other categories never count
        repo.upsert(Transaction::expense(user_id, Money::from_cents(9999), "Dining", date)).unwrap();

        let spend = repo
            .sum_expenses_in_window(user_id, "Groceries", day(2025, 3, 1), day(2025, 3, 31))
            .unwrap();

        assert_eq!(spend.total.cents(), 7500);
        assert_eq!(spend.count, 2);
    }

    #[test]
    fn test_sum_window_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user_id = UserId::new();

        repo.upsert(Transaction::expense(user_id, Money::from_cents(100), "Groceries", day(2025, 3, 1))).unwrap();
        repo.upsert(Transaction::expense(user_id, Money::from_cents(200), "Groceries", day(2025, 3, 31))).unwrap();
        repo.upsert(Transaction::expense(user_id, Money::from_cents(400), "Groceries", day(2025, 2, 28))).unwrap();
        repo.upsert(Transaction::expense(user_id, Money::from_cents(800), "Groceries", day(2025, 4, 1))).unwrap();

        let spend = repo
            .sum_expenses_in_window(user_id, "Groceries", day(2025, 3, 1), day(2025, 3, 31))
            .unwrap();

        assert_eq!(spend.total.cents(), 300);
        assert_eq!(spend.count, 2);
    }

    #[test]
    fn test_sum_with_no_matches_is_zero() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let spend = repo
            .sum_expenses_in_window(UserId::new(), "Groceries", day(2025, 3, 1), day(2025, 3, 31))
            .unwrap();

        assert_eq!(spend, SpendTotal::default());
    }

    #[test]
    fn test_sum_scoped_to_user() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user1 = UserId::new();
        let user2 = UserId::new();
        let date = day(2025, 3, 10);

        repo.upsert(Transaction::expense(user1, Money::from_cents(5000), "Groceries", date)).unwrap();
        repo.upsert(Transaction::expense(user2, Money::from_cents(7000), "Groceries", date)).unwrap();

        let spend = repo
            .sum_expenses_in_window(user1, "Groceries", day(2025, 3, 1), day(2025, 3, 31))
            .unwrap();

        assert_eq!(spend.total.cents(), 5000);
        assert_eq!(spend.count, 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user_id = UserId::new();
        let txn = Transaction::expense(user_id, Money::from_cents(5000), "Groceries", day(2025, 1, 15));
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        // Create new repo and load
        let path = temp_dir.path().join("transactions.json");
        let repo2 = TransactionRepository::new(path);
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
        assert_eq!(retrieved.category, "Groceries");
    }
}
