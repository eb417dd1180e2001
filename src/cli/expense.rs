//! Expense CLI commands
//!
//! Implements `add`, `list` and `status`.

use clap::Args;

use crate::display::{format_expense_register, format_outcome, format_status};
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{Category, DateKey, Money, MonthKey, NewExpense, PaymentMethod};
use crate::services::ExpenseFilter;
use crate::session::Session;
use crate::storage::Persistence;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "250" or "12.50")
    pub amount: String,
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Category name
    #[arg(short, long, default_value = "Food")]
    pub category: String,
    /// Payment method (Cash or Online)
    #[arg(short, long, default_value = "Cash")]
    pub payment: PaymentMethod,
    /// Description
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only this month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,
    /// Filter by category name
    #[arg(short = 'C', long)]
    pub category: Option<String>,
    /// Filter by payment method
    #[arg(short, long)]
    pub payment: Option<PaymentMethod>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Number of expenses to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for `status`
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Day to report on (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle `add`
///
/// A hard-policy rejection is returned as a `LimitExceeded` error so the
/// process exits non-zero.
pub fn handle_add<P: Persistence>(session: &mut Session<P>, args: AddArgs) -> SpendGuardResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = parse_date_or_today(args.date.as_deref())?;

    let mut expense = NewExpense::new(amount, date, Category::new(args.category))
        .with_payment_method(args.payment);
    if let Some(description) = args.description {
        expense = expense.with_description(description);
    }

    let outcome = session.add_expense(expense)?;
    if !outcome.accepted {
        return outcome.into_record().map(|_| ());
    }

    print!("{}", format_outcome(&outcome, &session.settings().currency));
    Ok(())
}

/// Handle `list`
pub fn handle_list<P: Persistence>(session: &Session<P>, args: ListArgs) -> SpendGuardResult<()> {
    let mut filter = ExpenseFilter::new().limit(args.limit);

    if let Some(month) = &args.month {
        filter = filter.month(parse_month(month)?);
    }
    if let Some(category) = args.category {
        filter = filter.category(Category::new(category));
    }
    if let Some(method) = args.payment {
        filter = filter.payment_method(method);
    }
    if let Some(from) = &args.from {
        filter = filter.since(parse_date(from)?);
    }
    if let Some(to) = &args.to {
        filter = filter.until(parse_date(to)?);
    }

    let records = session.ledger().filter(&filter);
    print!(
        "{}",
        format_expense_register(&records, &session.settings().currency)
    );
    Ok(())
}

/// Handle `status`
pub fn handle_status<P: Persistence>(
    session: &Session<P>,
    args: StatusArgs,
) -> SpendGuardResult<()> {
    let date = parse_date_or_today(args.date.as_deref())?;
    print!(
        "{}",
        format_status(&session.status(date), &session.settings().currency)
    );
    Ok(())
}

pub(crate) fn parse_amount(raw: &str) -> SpendGuardResult<Money> {
    Money::parse(raw).map_err(|e| {
        SpendGuardError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '250' or '12.50'. Error: {}",
            raw, e
        ))
    })
}

pub(crate) fn parse_date(raw: &str) -> SpendGuardResult<DateKey> {
    DateKey::parse(raw).map_err(|_| {
        SpendGuardError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", raw))
    })
}

pub(crate) fn parse_date_or_today(raw: Option<&str>) -> SpendGuardResult<DateKey> {
    raw.map_or_else(|| Ok(DateKey::today()), parse_date)
}

pub(crate) fn parse_month(raw: &str) -> SpendGuardResult<MonthKey> {
    MonthKey::parse(raw).map_err(|_| {
        SpendGuardError::Validation(format!("Invalid month: '{}'. Use YYYY-MM", raw))
    })
}
