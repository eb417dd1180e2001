//! Report CLI commands

use clap::Args;

use super::expense::{parse_date_or_today, parse_month};
use crate::display::{format_daily_series, format_monthly_report};
use crate::error::SpendGuardResult;
use crate::models::Category;
use crate::reports::daily_series;
use crate::session::Session;
use crate::storage::Persistence;

/// Arguments for `report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Month to report on (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,
    /// Reference day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub today: Option<String>,
    /// Also show per-day spending for this many days ending at the reference day
    #[arg(long)]
    pub days: Option<u32>,
    /// Restrict the per-day series to one category
    #[arg(short = 'C', long, requires = "days")]
    pub category: Option<String>,
    /// Print the category breakdown as CSV instead
    #[arg(long)]
    pub csv: bool,
}

/// Handle `report`
pub fn handle_report<P: Persistence>(session: &Session<P>, args: ReportArgs) -> SpendGuardResult<()> {
    let today = parse_date_or_today(args.today.as_deref())?;
    let month = match &args.month {
        Some(raw) => parse_month(raw)?,
        None => today.month_key(),
    };

    let report = session.report(month, today);
    let currency = &session.settings().currency;

    if args.csv {
        return report.export_csv(std::io::stdout().lock());
    }

    print!("{}", format_monthly_report(&report, currency));

    if let Some(days) = args.days {
        let category = args.category.map(Category::new);
        let series = daily_series(session.ledger(), today, days, category.as_ref());

        println!();
        match &category {
            Some(category) => println!("Last {} days ({})", days, category),
            None => println!("Last {} days", days),
        }
        print!("{}", format_daily_series(&series, currency));
    }

    Ok(())
}
