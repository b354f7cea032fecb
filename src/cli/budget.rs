//! Budget CLI commands
//!
//! Implements CLI commands for budget management: creating spending limits,
//! listing them with aggregated spend, and the portfolio summary.

use chrono::Local;
use clap::Subcommand;

use crate::cli::parse_date;
use crate::config::settings::Settings;
use crate::display::{format_budget_details, format_budget_list, format_portfolio_summary};
use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Money, Period};
use crate::services::{BudgetService, CreateBudgetInput, SummaryService, UpdateBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Add {
        /// Spending category the budget caps
        category: String,
        /// Spending limit (e.g., "600" or "600.00")
        amount: String,
        /// Budget name (defaults to "<category> <window>")
        #[arg(short, long)]
        name: Option<String>,
        /// Budget period (monthly or yearly)
        #[arg(short, long)]
        period: Option<String>,
        /// Window start date (defaults to the current window)
        #[arg(short, long)]
        start: Option<String>,
        /// Alert threshold percentage (0-100)
        #[arg(short = 't', long)]
        threshold: Option<u8>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List budgets with their aggregated spend
    List {
        /// Restrict to one period type (monthly or yearly)
        #[arg(short, long)]
        period: Option<String>,
        /// Include deactivated budgets
        #[arg(short, long)]
        all: bool,
    },
    /// Show one budget with its aggregated spend
    Show {
        /// Budget name or ID
        budget: String,
    },
    /// Edit a budget
    Edit {
        /// Budget name or ID
        budget: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New spending limit
        #[arg(short, long)]
        amount: Option<String>,
        /// New period (monthly or yearly)
        #[arg(short, long)]
        period: Option<String>,
        /// New window start date
        #[arg(short, long)]
        start: Option<String>,
        /// New alert threshold percentage (0-100)
        #[arg(short = 't', long)]
        threshold: Option<u8>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Deactivate a budget
    Deactivate {
        /// Budget name or ID
        budget: String,
    },
    /// Show portfolio totals across active budgets
    Summary {
        /// Restrict to one period type (monthly or yearly)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendcapResult<()> {
    let service = BudgetService::new(storage);
    let user_id = settings.user_id;

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            name,
            period,
            start,
            threshold,
            notes,
        } => {
            let amount = Money::parse(&amount)?;
            let period = match period {
                Some(p) => Period::parse(&p)?,
                None => settings.default_period,
            };
            let start_date = match start {
                Some(s) => parse_date(&s, &settings.date_format)?,
                None => period.start_of_window(Local::now().date_naive()),
            };
            let name = name
                .unwrap_or_else(|| format!("{} {}", category.trim(), period.window_title(start_date)));

            let budget = service.create(CreateBudgetInput {
                user_id,
                category,
                name,
                amount,
                period,
                start_date,
                alert_threshold: threshold.or(Some(settings.default_alert_threshold)),
                notes,
            })?;

            println!("Created budget: {}", budget.name);
            println!("  Category:  {}", budget.category);
            println!("  Limit:     {} {}", budget.amount, budget.period);
            println!("  Window:    {} to {}", budget.start_date, budget.end_date);
            println!("  Alert at:  {}%", budget.alert_threshold);
            println!("  ID:        {}", budget.id);
        }

        BudgetCommands::List { period, all } => {
            let period = period.map(|p| Period::parse(&p)).transpose()?;
            let views = SummaryService::new(storage).list_with_spend(user_id, period, all)?;
            println!("{}", format_budget_list(&views));
        }

        BudgetCommands::Show { budget } => {
            let found = service
                .find(user_id, &budget)?
                .ok_or_else(|| SpendcapError::budget_not_found(&budget))?;

            let view = SummaryService::new(storage).view(found.id)?;
            print!("{}", format_budget_details(&view));
        }

        BudgetCommands::Edit {
            budget,
            name,
            amount,
            period,
            start,
            threshold,
            notes,
        } => {
            let found = service
                .find(user_id, &budget)?
                .ok_or_else(|| SpendcapError::budget_not_found(&budget))?;

            let input = UpdateBudgetInput {
                name,
                amount: amount.map(|a| Money::parse(&a)).transpose()?,
                period: period.map(|p| Period::parse(&p)).transpose()?,
                start_date: start
                    .map(|s| parse_date(&s, &settings.date_format))
                    .transpose()?,
                alert_threshold: threshold,
                notes,
            };

            let updated = service.update(found.id, input)?;

            println!("Updated budget: {}", updated.name);
            println!("  Limit:     {} {}", updated.amount, updated.period);
            println!("  Window:    {} to {}", updated.start_date, updated.end_date);
            println!("  Alert at:  {}%", updated.alert_threshold);
        }

        BudgetCommands::Deactivate { budget } => {
            let found = service
                .find(user_id, &budget)?
                .ok_or_else(|| SpendcapError::budget_not_found(&budget))?;

            let deactivated = service.deactivate(found.id)?;
            println!("Deactivated budget: {}", deactivated.name);
            println!("Its window no longer blocks new budgets for '{}'.", deactivated.category);
        }

        BudgetCommands::Summary { period } => {
            let period = period.map(|p| Period::parse(&p)).transpose()?;
            let summary = SummaryService::new(storage).portfolio(user_id, period)?;

            match period {
                Some(p) => println!("Budget Summary ({})", p),
                None => println!("Budget Summary"),
            }
            println!("{}", "=".repeat(40));
            print!("{}", format_portfolio_summary(&summary));
        }
    }

    Ok(())
}
