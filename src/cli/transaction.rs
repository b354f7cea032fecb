//! Transaction CLI commands
//!
//! Implements CLI commands for recording and listing transactions.

use chrono::Local;
use clap::Subcommand;

use crate::cli::parse_date;
use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Money, TransactionKind};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Spending category
        category: String,
        /// Amount (e.g., "42.50")
        amount: String,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List transactions
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Only transactions on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Only transactions on or before this date
        #[arg(long)]
        until: Option<String>,
        /// Include deactivated transactions
        #[arg(short, long)]
        all: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Deactivate a transaction so it no longer counts toward budgets
    Deactivate {
        /// Transaction ID
        transaction: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SpendcapResult<()> {
    let service = TransactionService::new(storage);
    let user_id = settings.user_id;

    match cmd {
        TransactionCommands::Add {
            category,
            amount,
            date,
            income,
            memo,
        } => {
            let amount = Money::parse(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d, &settings.date_format)?,
                None => Local::now().date_naive(),
            };
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let txn = service.create(CreateTransactionInput {
                user_id,
                kind,
                amount,
                category,
                date,
                memo,
            })?;

            println!("Recorded {}: {} on {}", txn.kind, txn.amount, txn.date);
            println!("  Category: {}", txn.category);
            println!("  ID:       {}", txn.id);
        }

        TransactionCommands::List {
            category,
            from,
            until,
            all,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(from) = from {
                filter = filter.from(parse_date(&from, &settings.date_format)?);
            }
            if let Some(until) = until {
                filter = filter.until(parse_date(&until, &settings.date_format)?);
            }
            if all {
                filter = filter.include_inactive();
            }

            let transactions = service.list(user_id, filter)?;
            print!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Deactivate { transaction } => {
            let found = service
                .find(&transaction)?
                .ok_or_else(|| SpendcapError::transaction_not_found(&transaction))?;

            let deactivated = service.deactivate(found.id)?;
            println!(
                "Deactivated transaction {} ({} {} on {})",
                deactivated.id, deactivated.kind, deactivated.amount, deactivated.date
            );
            println!("It no longer counts toward any budget.");
        }
    }

    Ok(())
}
