//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json. Window-overlap
//! enforcement lives here: the conflict scan and the write happen under the
//! same lock guard, so two concurrent inserts cannot both pass the check.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Budget, BudgetId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence with overlap enforcement
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
    /// Index: user_id -> budget_ids
    by_user: RwLock<HashMap<UserId, Vec<BudgetId>>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk and build indexes
    pub fn load(&self) -> SpendcapResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_user.clear();

        for budget in file_data.budgets {
            by_user.entry(budget.user_id).or_default().push(budget.id);
            data.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> SpendcapResult<()> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| {
            b.start_date
                .cmp(&a.start_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        let file_data = BudgetData { budgets };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> SpendcapResult<Option<Budget>> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all budgets for a user, newest window first
    pub fn get_by_user(&self, user_id: UserId) -> SpendcapResult<Vec<Budget>> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut budgets: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id).cloned())
            .collect();
        budgets.sort_by(|a, b| {
            b.start_date
                .cmp(&a.start_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(budgets)
    }

    /// Insert a new budget, rejecting it if an active budget for the same
    /// user, category, and period kind already covers any day of its window.
    pub fn insert_checked(&self, budget: Budget) -> SpendcapResult<()> {
        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Self::check_conflicts(&data, &by_user, &budget)?;

        by_user.entry(budget.user_id).or_default().push(budget.id);
        data.insert(budget.id, budget);
        Ok(())
    }

    /// Replace an existing budget, re-running the overlap check against all
    /// other active budgets under the same guard as the write.
    pub fn update_checked(&self, budget: Budget) -> SpendcapResult<()> {
        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if !data.contains_key(&budget.id) {
            return Err(SpendcapError::budget_not_found(budget.id.to_string()));
        }

        Self::check_conflicts(&data, &by_user, &budget)?;

        // Remove from the old index entry, then reindex
        if let Some(old) = data.get(&budget.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != budget.id);
            }
        }
        by_user.entry(budget.user_id).or_default().push(budget.id);
        data.insert(budget.id, budget);
        Ok(())
    }

    /// Soft-delete a budget, returning the updated record
    pub fn deactivate(&self, id: BudgetId) -> SpendcapResult<Budget> {
        let mut data = self.data.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let budget = data
            .get_mut(&id)
            .ok_or_else(|| SpendcapError::budget_not_found(id.to_string()))?;
        budget.deactivate();
        Ok(budget.clone())
    }

    /// Count budgets
    pub fn count(&self) -> SpendcapResult<usize> {
        let data = self.data.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    /// Scan a user's active budgets for a window conflict with the candidate.
    /// Called with both write guards held; inactive candidates never conflict.
    fn check_conflicts(
        data: &HashMap<BudgetId, Budget>,
        by_user: &HashMap<UserId, Vec<BudgetId>>,
        candidate: &Budget,
    ) -> SpendcapResult<()> {
        if !candidate.is_active {
            return Ok(());
        }

        let ids = by_user
            .get(&candidate.user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        for existing in ids.iter().filter_map(|id| data.get(id)) {
            if existing.is_active && existing.conflicts_with(candidate) {
                return Err(SpendcapError::budget_overlap(
                    candidate.category.clone(),
                    candidate.period.to_string(),
                    existing.name.clone(),
                    existing.id.to_string(),
                ));
            }
        }

        Ok(())
    }
}
