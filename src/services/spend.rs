//! Spend aggregation service
//!
//! Sums expense transactions against budget windows. Batch lookups group
//! budgets that share a window so each distinct window is scanned once.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Budget, UserId};
use crate::storage::{SpendTotal, Storage};

/// Service for summing spend against budget windows
pub struct SpendService<'a> {
    storage: &'a Storage,
}

impl<'a> SpendService<'a> {
    /// Create a new spend service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Sum the active expense transactions inside one budget's window
    ///
    /// A window with no matching transactions sums to zero. A failed scan is
    /// reported as an aggregation error so the caller can retry instead of
    /// mistaking the failure for an empty window.
    pub fn spend_for_budget(&self, budget: &Budget) -> SpendcapResult<SpendTotal> {
        self.storage
            .transactions
            .sum_expenses_in_window(
                budget.user_id,
                &budget.category,
                budget.start_date,
                budget.end_date,
            )
            .map_err(|e| SpendcapError::Aggregation(e.to_string()))
    }

    /// Sum spend for a batch of budgets, one scan per distinct window
    ///
    /// Budgets sharing a category and window reuse the same total. Results
    /// come back in the same order as the input.
    pub fn spend_for_budgets(&self, budgets: &[Budget]) -> SpendcapResult<Vec<SpendTotal>> {
        let mut cache: HashMap<(UserId, String, NaiveDate, NaiveDate), SpendTotal> =
            HashMap::new();
        let mut totals = Vec::with_capacity(budgets.len());

        for budget in budgets {
            let key = (
                budget.user_id,
                budget.category.clone(),
                budget.start_date,
                budget.end_date,
            );
            let total = match cache.get(&key) {
                Some(total) => *total,
                None => {
                    let total = self.spend_for_budget(budget)?;
                    cache.insert(key, total);
                    total
                }
            };
            totals.push(total);
        }

        Ok(totals)
    }
}
