//! Budget service
//!
//! Provides business logic for budget lifecycle management: creation with
//! window derivation and overlap checking, edits, and soft deletion.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Budget, BudgetId, Money, Period, UserId};
use crate::storage::Storage;

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub user_id: UserId,
    pub category: String,
    pub name: String,
    pub amount: Money,
    pub period: Period,
    pub start_date: NaiveDate,
    pub alert_threshold: Option<u8>,
    pub notes: Option<String>,
}

/// Input for editing an existing budget
///
/// Only the provided fields change. A new period or start date moves the
/// whole window, and the end date is recomputed from it.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub period: Option<Period>,
    pub start_date: Option<NaiveDate>,
    pub alert_threshold: Option<u8>,
    pub notes: Option<String>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget
    ///
    /// The window end is derived from the start date and period, and the
    /// conflict scan against the user's other active budgets happens inside
    /// the repository insert so no overlapping budget can slip in between
    /// the check and the write.
    pub fn create(&self, input: CreateBudgetInput) -> SpendcapResult<Budget> {
        let mut budget = Budget::new(
            input.user_id,
            input.category.trim(),
            input.name.trim(),
            input.amount,
            input.period,
            input.start_date,
        );

        if let Some(threshold) = input.alert_threshold {
            budget.alert_threshold = threshold;
        }

        if let Some(notes) = input.notes {
            budget.notes = notes;
        }

        budget.validate()?;

        self.storage.budgets.insert_checked(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;

        self.storage.updates.bump(input.user_id)?;
        self.storage.updates.save()?;

        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> SpendcapResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Get a budget by ID, failing if it does not exist
    pub fn require(&self, id: BudgetId) -> SpendcapResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| SpendcapError::budget_not_found(id.to_string()))
    }

    /// Find a budget by name, short ID, or full ID
    pub fn find(&self, user_id: UserId, identifier: &str) -> SpendcapResult<Option<Budget>> {
        let needle = identifier.trim();

        // Try by name first, then the short display form
        for budget in self.storage.budgets.get_by_user(user_id)? {
            if budget.name.eq_ignore_ascii_case(needle) || budget.id.to_string() == needle {
                return Ok(Some(budget));
            }
        }

        // Try parsing as ID
        if let Ok(id) = needle.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        Ok(None)
    }

    /// List a user's budgets, optionally restricted to one period type
    pub fn list(
        &self,
        user_id: UserId,
        period: Option<Period>,
        include_inactive: bool,
    ) -> SpendcapResult<Vec<Budget>> {
        let mut budgets = self.storage.budgets.get_by_user(user_id)?;

        if let Some(period) = period {
            budgets.retain(|b| b.period == period);
        }

        if !include_inactive {
            budgets.retain(|b| b.is_active);
        }

        Ok(budgets)
    }

    /// Edit a budget
    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> SpendcapResult<Budget> {
        let mut budget = self.require(id)?;

        if !budget.is_active {
            return Err(SpendcapError::Validation(
                "Cannot edit a deactivated budget".into(),
            ));
        }

        let before = budget.clone();

        if let Some(name) = input.name {
            budget.set_name(name.trim());
        }

        if let Some(amount) = input.amount {
            budget.set_amount(amount);
        }

        // A new period or start date moves the window and re-derives its end
        if input.period.is_some() || input.start_date.is_some() {
            let period = input.period.unwrap_or(budget.period);
            let start = input.start_date.unwrap_or(budget.start_date);
            budget.set_window(period, start);
        }

        if let Some(threshold) = input.alert_threshold {
            budget.set_alert_threshold(threshold);
        }

        if let Some(notes) = input.notes {
            budget.set_notes(notes);
        }

        budget.validate()?;

        // The conflict re-scan and the write share one lock acquisition
        self.storage.budgets.update_checked(budget.clone())?;
        self.storage.budgets.save()?;

        // Build diff summary
        let mut changes = Vec::new();
        if before.name != budget.name {
            changes.push(format!("name: '{}' -> '{}'", before.name, budget.name));
        }
        if before.amount != budget.amount {
            changes.push(format!("amount: {} -> {}", before.amount, budget.amount));
        }
        if before.period != budget.period {
            changes.push(format!("period: {} -> {}", before.period, budget.period));
        }
        if before.start_date != budget.start_date {
            changes.push(format!(
                "window: {} to {} -> {} to {}",
                before.start_date, before.end_date, budget.start_date, budget.end_date
            ));
        }
        if before.alert_threshold != budget.alert_threshold {
            changes.push(format!(
                "alert_threshold: {} -> {}",
                before.alert_threshold, budget.alert_threshold
            ));
        }
        if before.notes != budget.notes {
            changes.push("notes changed".to_string());
        }

        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &before,
            &budget,
            diff,
        )?;

        self.storage.updates.bump(budget.user_id)?;
        self.storage.updates.save()?;

        Ok(budget)
    }

    /// Deactivate a budget
    ///
    /// Deactivation is one way. The record stays on disk for history but no
    /// longer blocks new budgets or appears in summaries.
    pub fn deactivate(&self, id: BudgetId) -> SpendcapResult<Budget> {
        let before = self.require(id)?;

        if !before.is_active {
            return Err(SpendcapError::Validation(
                "Budget is already deactivated".into(),
            ));
        }

        let budget = self.storage.budgets.deactivate(id)?;
        self.storage.budgets.save()?;

        self.storage.log_deactivate(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &before,
            &budget,
            Some("is_active: true -> false".to_string()),
        )?;

        self.storage.updates.bump(budget.user_id)?;
        self.storage.updates.save()?;

        Ok(budget)
    }
}
