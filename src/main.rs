use anyhow::Result;
use clap::{Parser, Subcommand};

use spendcap::cli::{handle_budget_command, handle_transaction_command};
use spendcap::config::{paths::SpendcapPaths, settings::Settings};
use spendcap::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendcap",
    author = "Kaylee Beyene",
    version,
    about = "Track spending limits per category from the command line",
    long_about = "Spendcap tracks budgets as spending caps. Each budget limits one \
                  category over a monthly or yearly window, and recorded expenses \
                  are summed against it so you can see how much of each limit is \
                  used before the window closes."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand)]
    Budget(spendcap::cli::BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(spendcap::cli::TransactionCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize data files
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendcapPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // First run generates the user identity; persist it so every later run
    // keys data to the same user
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            } else {
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        Some(Commands::Init) => {
            println!("Initializing Spendcap at: {}", paths.data_dir().display());
            spendcap::storage::init::initialize_storage(&paths)?;
            let mut settings = settings;
            settings.setup_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Your user ID is {}.", settings.user_id);
            println!();
            println!("Next steps:");
            println!("  spendcap budget add Groceries 600     Cap a category for this month");
            println!("  spendcap txn add Groceries 42.50      Record an expense against it");
            println!("  spendcap budget list                  See spend against every cap");
        }
        Some(Commands::Config) => {
            println!("Spendcap Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  User ID:                 {}", settings.user_id);
            println!("  Default period:          {}", settings.default_period);
            println!("  Default alert threshold: {}%", settings.default_alert_threshold);
            println!("  Currency symbol:         {}", settings.currency_symbol);
            println!("  Date format:             {}", settings.date_format);
            println!(
                "  Setup completed:         {}",
                if settings.setup_completed { "Yes" } else { "No" }
            );
            println!();
            println!(
                "Data version: {}",
                storage.updates.current(settings.user_id)?
            );
        }
        None => {
            println!("Spendcap - Spending limits per category");
            println!();
            println!("Run 'spendcap --help' for usage information.");
            println!("Run 'spendcap init' to set up data files.");
        }
    }

    Ok(())
}
