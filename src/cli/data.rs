//! CLI commands for data export, import and demo seeding

use clap::{Args, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::expense::parse_date_or_today;
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::session::Session;
use crate::storage::{write_atomic, Persistence};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export settings and expenses as JSON (the import format)
    Json {
        /// Output file path, or "-" for stdout
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export expenses as CSV
    Csv {
        /// Output file path, or "-" for stdout
        output: PathBuf,
    },
}

/// Arguments for `import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON export to import; replaces every expense
    pub file: PathBuf,
}

/// Arguments for `demo`
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Number of days of demo data, ending today
    #[arg(long, default_value = "365")]
    pub days: u32,
    /// Last day of demo data (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub today: Option<String>,
    /// Replace existing expenses
    #[arg(long)]
    pub force: bool,
}

/// Handle export commands
pub fn handle_export_command<P: Persistence>(
    session: &Session<P>,
    cmd: ExportCommands,
) -> SpendGuardResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            let json = session.export_json(pretty)?;
            write_output(&output, json.as_bytes())?;
            report_written(&output, session.ledger().len());
        }
        ExportCommands::Csv { output } => {
            let mut buffer = Vec::new();
            let count = session.export_csv(&mut buffer)?;
            write_output(&output, &buffer)?;
            report_written(&output, count);
        }
    }
    Ok(())
}

/// Handle `import`
pub fn handle_import<P: Persistence>(
    session: &mut Session<P>,
    args: ImportArgs,
) -> SpendGuardResult<()> {
    let json = std::fs::read_to_string(&args.file).map_err(|e| {
        SpendGuardError::Import(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let summary = session.import_json(&json)?;
    println!(
        "Imported {} expenses from {} (replaced {}).",
        summary.expenses,
        args.file.display(),
        summary.replaced
    );
    Ok(())
}

/// Handle `demo`
pub fn handle_demo<P: Persistence>(session: &mut Session<P>, args: DemoArgs) -> SpendGuardResult<()> {
    let today = parse_date_or_today(args.today.as_deref())?;
    let count = session.seed_demo(args.days, today, args.force, &mut rand::rng())?;
    println!(
        "Seeded {} demo expenses over {} days ending {}.",
        count, args.days, today
    );
    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn write_output(path: &Path, bytes: &[u8]) -> SpendGuardResult<()> {
    if is_stdout(path) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|_| stdout.flush())
            .map_err(|e| SpendGuardError::Export(e.to_string()))
    } else {
        write_atomic(path, bytes)
    }
}

fn report_written(path: &Path, count: usize) {
    // Keep stdout clean when it carries the export itself
    if !is_stdout(path) {
        println!("Exported {} expenses to {}", count, path.display());
    }
}
