use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendguard::cli::{
    handle_add, handle_demo, handle_export_command, handle_import, handle_list, handle_report,
    handle_settings_command, handle_status, AddArgs, DemoArgs, ExportCommands, ImportArgs,
    ListArgs, ReportArgs, SettingsCommands, StatusArgs,
};
use spendguard::config::paths::SpendGuardPaths;
use spendguard::session::Session;
use spendguard::storage::JsonStorage;

/// Environment variable holding the log filter (e.g. "debug", "spendguard=info")
const LOG_ENV: &str = "SPENDGUARD_LOG";

#[derive(Parser)]
#[command(
    name = "spendguard",
    version,
    about = "Expense tracker with a rolling daily allowance",
    long_about = "SpendGuard tracks daily spending against a rolling allowance. \
                  Unspent budget carries forward to later days of the month, \
                  overspending shrinks tomorrow's allowance, and a monthly limit \
                  caps the total."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add(AddArgs),

    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show today's allowance and what is left
    Status(StatusArgs),

    /// Monthly spending report
    Report(ReportArgs),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import a JSON export, replacing every expense
    Import(ImportArgs),

    /// Fill the ledger with demo data
    Demo(DemoArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = SpendGuardPaths::new()?;
    let mut session = Session::open(JsonStorage::new(paths.clone())?)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add(&mut session, args)?,
        Some(Commands::List(args)) => handle_list(&session, args)?,
        Some(Commands::Status(args)) => handle_status(&session, args)?,
        Some(Commands::Report(args)) => handle_report(&session, args)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&mut session, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&session, cmd)?,
        Some(Commands::Import(args)) => handle_import(&mut session, args)?,
        Some(Commands::Demo(args)) => handle_demo(&mut session, args)?,
        Some(Commands::Config) => {
            println!("SpendGuard Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Exports:         {}", paths.exports_dir().display());
            println!();
            println!("Expenses:        {}", session.ledger().len());
            println!("Policy:          {}", session.settings().enforcement);
        }
        None => {
            println!("SpendGuard - rolling daily allowance expense tracker");
            println!();
            println!("Run 'spendguard --help' for usage information.");
            println!("Run 'spendguard status' to see today's allowance.");
        }
    }

    Ok(())
}
