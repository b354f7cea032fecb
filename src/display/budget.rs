//! Budget display formatting
//!
//! Formats budgets and portfolio summaries for terminal output in table
//! and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{BudgetStatus, BudgetView};
use crate::services::PortfolioSummary;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&BudgetView> for BudgetRow {
    fn from(view: &BudgetView) -> Self {
        let name = if view.budget.is_active {
            view.budget.name.clone()
        } else {
            format!("{} (inactive)", view.budget.name)
        };

        Self {
            name,
            category: view.budget.category.clone(),
            window: view.budget.window_title(),
            budgeted: view.budget.amount.to_string(),
            spent: view.spent.to_string(),
            remaining: view.remaining.to_string(),
            used: format!("{}%", view.percentage_used),
            status: status_marker(view).to_string(),
        }
    }
}

fn status_marker(view: &BudgetView) -> &'static str {
    match view.status {
        BudgetStatus::Over => "over",
        BudgetStatus::Warning => "warning",
        BudgetStatus::Good => "good",
    }
}

/// Format a list of budgets with their spend as a table
pub fn format_budget_list(views: &[BudgetView]) -> String {
    if views.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows: Vec<BudgetRow> = views.iter().map(BudgetRow::from).collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(3..=6)).with(Alignment::right()))
        .to_string()
}

/// Format a single budget's details with its spend
pub fn format_budget_details(view: &BudgetView) -> String {
    let budget = &view.budget;

    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:        {}\n", budget.id));
    output.push_str(&format!("  Category:  {}\n", budget.category));
    output.push_str(&format!("  Period:    {}\n", budget.period));
    output.push_str(&format!(
        "  Window:    {} to {} ({})\n",
        budget.start_date,
        budget.end_date,
        budget.window_title()
    ));
    output.push_str(&format!("  Budgeted:  {}\n", budget.amount));
    output.push_str(&format!("  Alert at:  {}%\n", budget.alert_threshold));
    output.push_str(&format!(
        "  Active:    {}\n",
        if budget.is_active { "Yes" } else { "No" }
    ));

    if !budget.notes.is_empty() {
        output.push_str(&format!("  Notes:     {}\n", budget.notes));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Spent:        {} across {} transaction(s)\n",
        view.spent, view.transaction_count
    ));
    output.push_str(&format!("  Remaining:    {}\n", view.remaining));
    output.push_str(&format!(
        "  Used:         {}% ({})\n",
        view.percentage_used,
        status_marker(view)
    ));

    if view.is_over_budget {
        let over_by = view.spent - budget.amount;
        output.push_str(&format!("\n  ⚠️  Over budget by {}\n", over_by));
    } else if view.is_near_limit {
        output.push_str(&format!(
            "\n  ⚠️  Approaching the limit (alert threshold is {}%)\n",
            budget.alert_threshold
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        budget.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        budget.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Format portfolio totals across active budgets
pub fn format_portfolio_summary(summary: &PortfolioSummary) -> String {
    if summary.budget_count == 0 {
        return "No active budgets to summarize.".to_string();
    }

    let mut output = String::new();

    output.push_str(&format!(
        "  {:<16} {:>12}\n",
        "Budgeted:", summary.total_budgeted.to_string()
    ));
    output.push_str(&format!(
        "  {:<16} {:>12}\n",
        "Spent:", summary.total_spent.to_string()
    ));
    output.push_str(&format!(
        "  {:<16} {:>12}\n",
        "Remaining:", summary.total_remaining.to_string()
    ));

    output.push('\n');
    output.push_str(&format!(
        "  {} budget(s): {} good, {} warning, {} over\n",
        summary.budget_count,
        summary.good_count,
        summary.warning_count,
        summary.over_budget_count
    ));

    if summary.over_budget_count > 0 {
        output.push_str(&format!(
            "\n  ⚠️  {} budget(s) overspent. Run 'spendcap budget list' for details.\n",
            summary.over_budget_count
        ));
    } else if summary.warning_count > 0 {
        output.push_str(&format!(
            "\n  ⚠️  {} budget(s) approaching their limit.\n",
            summary.warning_count
        ));
    } else {
        output.push_str("\n  ✅ All budgets on track.\n");
    }

    output
}
