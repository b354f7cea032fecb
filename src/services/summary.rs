//! Summary service
//!
//! Joins budgets with their aggregated spend to produce per-budget views
//! and the portfolio-level rollup.

use serde::Serialize;

use crate::error::SpendcapResult;
use crate::models::{BudgetId, BudgetStatus, BudgetView, Money, Period, UserId};
use crate::services::{BudgetService, SpendService};
use crate::storage::Storage;

/// Portfolio-level totals across a user's active budgets
///
/// The three status counts partition `budget_count`, and `total_remaining`
/// sums the per-budget clamped remainders so overspent budgets do not drag
/// it negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub budget_count: usize,
    pub over_budget_count: usize,
    pub warning_count: usize,
    pub good_count: usize,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            total_budgeted: Money::zero(),
            total_spent: Money::zero(),
            total_remaining: Money::zero(),
            budget_count: 0,
            over_budget_count: 0,
            warning_count: 0,
            good_count: 0,
        }
    }
}

/// Service for budget views and portfolio summaries
pub struct SummaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SummaryService<'a> {
    /// Create a new summary service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build the spend view for a single budget
    pub fn view(&self, id: BudgetId) -> SpendcapResult<BudgetView> {
        let budget = BudgetService::new(self.storage).require(id)?;
        let total = SpendService::new(self.storage).spend_for_budget(&budget)?;
        Ok(BudgetView::build(budget, total.total, total.count))
    }

    /// List a user's budgets with their aggregated spend
    ///
    /// Budgets sharing a window are aggregated in one pass. The result
    /// keeps the repository ordering, newest window first.
    pub fn list_with_spend(
        &self,
        user_id: UserId,
        period: Option<Period>,
        include_inactive: bool,
    ) -> SpendcapResult<Vec<BudgetView>> {
        let budgets = BudgetService::new(self.storage).list(user_id, period, include_inactive)?;
        let totals = SpendService::new(self.storage).spend_for_budgets(&budgets)?;

        Ok(budgets
            .into_iter()
            .zip(totals)
            .map(|(budget, total)| BudgetView::build(budget, total.total, total.count))
            .collect())
    }

    /// Roll a user's active budgets up into portfolio totals
    pub fn portfolio(
        &self,
        user_id: UserId,
        period: Option<Period>,
    ) -> SpendcapResult<PortfolioSummary> {
        let views = self.list_with_spend(user_id, period, false)?;

        let mut summary = PortfolioSummary {
            budget_count: views.len(),
            ..Default::default()
        };

        for view in &views {
            summary.total_budgeted += view.budget.amount;
            summary.total_spent += view.spent;
            summary.total_remaining += view.remaining;
            match view.status {
                BudgetStatus::Over => summary.over_budget_count += 1,
                BudgetStatus::Warning => summary.warning_count += 1,
                BudgetStatus::Good => summary.good_count += 1,
            }
        }

        Ok(summary)
    }
}
