//! Budget model
//!
//! A budget caps spending for one category over one monthly or yearly
//! window. The window end is always derived from the start date and period,
//! never stored independently by callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use super::money::Money;
use super::period::Period;

/// Maximum length for budget names
pub const MAX_NAME_LENGTH: usize = 50;

fn default_alert_threshold() -> u8 {
    80
}

fn default_active() -> bool {
    true
}

/// A spending cap for a category over a period window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The user this budget belongs to
    pub user_id: UserId,

    /// Expense category label this budget caps
    pub category: String,

    /// Display name
    pub name: String,

    /// Spending limit for the window
    pub amount: Money,

    /// Period kind (monthly or yearly)
    pub period: Period,

    /// First day of the budget window
    pub start_date: NaiveDate,

    /// Last day of the budget window, derived from `start_date` and `period`
    pub end_date: NaiveDate,

    /// Percentage of the limit at which the budget starts warning (0-100)
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,

    /// Soft-delete flag; inactive budgets are hidden and never block new ones
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Notes
    #[serde(default)]
    pub notes: String,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget; the window end is derived from the start and period
    pub fn new(
        user_id: UserId,
        category: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        period: Period,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category: category.into(),
            name: name.into(),
            amount,
            period,
            start_date,
            end_date: period.end_of_window(start_date),
            alert_threshold: default_alert_threshold(),
            is_active: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the spending limit
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Set the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Set the alert threshold
    pub fn set_alert_threshold(&mut self, threshold: u8) {
        self.alert_threshold = threshold;
        self.updated_at = Utc::now();
    }

    /// Set the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.updated_at = Utc::now();
    }

    /// Move the budget to a new window; the end date is recomputed
    pub fn set_window(&mut self, period: Period, start_date: NaiveDate) {
        self.period = period;
        self.start_date = start_date;
        self.end_date = period.end_of_window(start_date);
        self.updated_at = Utc::now();
    }

    /// Soft-delete this budget
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Check whether a date falls inside the window (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Check whether two windows share at least one day
    pub fn window_overlaps(&self, other: &Budget) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }

    /// Check whether another budget blocks this one: same user, same
    /// category, same period kind, overlapping windows. A budget never
    /// conflicts with itself, so updates can move within their own window.
    pub fn conflicts_with(&self, other: &Budget) -> bool {
        self.id != other.id
            && self.user_id == other.user_id
            && self.category == other.category
            && self.period == other.period
            && self.window_overlaps(other)
    }

    /// Human-readable title for the window ("March 2025", "2025")
    pub fn window_title(&self) -> String {
        self.period.window_title(self.start_date)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > MAX_NAME_LENGTH {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if self.alert_threshold > 100 {
            return Err(BudgetValidationError::ThresholdOutOfRange(
                self.alert_threshold,
            ));
        }

        // End dates are derived, but records loaded from disk are re-checked
        if self.end_date < self.start_date {
            return Err(BudgetValidationError::WindowInverted);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} to {})",
            self.name,
            self.amount,
            self.period,
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    EmptyName,
    NameTooLong(usize),
    EmptyCategory,
    ThresholdOutOfRange(u8),
    WindowInverted,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive (got {})", amount)
            }
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Budget name too long ({} chars, max {})",
                len, MAX_NAME_LENGTH
            ),
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::ThresholdOutOfRange(t) => {
                write!(f, "Alert threshold must be between 0 and 100 (got {})", t)
            }
            Self::WindowInverted => write!(f, "Budget window ends before it starts"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// How a budget stands relative to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Under the alert threshold
    Good,
    /// At or past the alert threshold but not over the limit
    Warning,
    /// Spending exceeds the limit
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// A budget together with its aggregated spend and derived health fields
#[derive(Debug, Clone)]
pub struct BudgetView {
    /// The underlying budget
    pub budget: Budget,

    /// Total active expense spend inside the window
    pub spent: Money,

    /// Number of transactions that produced `spent`
    pub transaction_count: usize,

    /// Amount left to spend, clamped at zero for display
    pub remaining: Money,

    /// Spend as a whole percentage of the limit, rounded half-up
    pub percentage_used: u32,

    /// True when spend exceeds the limit (computed before clamping)
    pub is_over_budget: bool,

    /// True when usage has reached the alert threshold but not 100%
    pub is_near_limit: bool,

    /// Classified status
    pub status: BudgetStatus,
}

impl BudgetView {
    /// Derive all health fields from a budget and its aggregated spend
    pub fn build(budget: Budget, spent: Money, transaction_count: usize) -> Self {
        let raw_remaining = budget.amount - spent;
        let remaining = if raw_remaining.is_negative() {
            Money::zero()
        } else {
            raw_remaining
        };

        // Overspend is judged on the raw difference, not the clamped one
        let is_over_budget = spent > budget.amount;

        let percentage_used = spent.percent_of(budget.amount);
        let is_near_limit =
            percentage_used >= u32::from(budget.alert_threshold) && percentage_used < 100;

        let status = if is_over_budget {
            BudgetStatus::Over
        } else if is_near_limit {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Good
        };

        Self {
            budget,
            spent,
            transaction_count,
            remaining,
            percentage_used,
            is_over_budget,
            is_near_limit,
            status,
        }
    }

    /// Human-readable title for the budget's window
    pub fn window_title(&self) -> String {
        self.budget.window_title()
    }
}

impl fmt::Display for BudgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Budgeted: {} | Spent: {} | Remaining: {} ({}%)",
            self.budget.amount, self.spent, self.remaining, self.percentage_used
        )
    }
}
