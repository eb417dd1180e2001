//! Allowance status and add-expense outcome formatting

use crate::models::{LimitScope, Money};
use crate::services::{AddOutcome, AllowanceStatus};

/// Format the allowance status for a day
pub fn format_status(status: &AllowanceStatus, currency: &str) -> String {
    let money = |m: Money| m.format_with_label(currency);
    let mut output = String::new();

    output.push_str(&format!("Status for {}\n", status.date));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("{:<22} {:>16}\n", "Daily limit:", money(status.daily_limit)));
    output.push_str(&format!("{:<22} {:>16}\n", "Carryover:", money(status.carryover)));
    output.push_str(&format!("{:<22} {:>16}\n", "Today's allowance:", money(status.allowance)));
    output.push_str(&format!("{:<22} {:>16}\n", "Spent today:", money(status.spent_today)));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Remaining today:",
        money(status.remaining_daily)
    ));
    output.push('\n');
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Monthly limit:",
        money(status.monthly_limit)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Spent this month:",
        money(status.spent_this_month)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Remaining this month:",
        money(status.remaining_monthly)
    ));
    output.push('\n');
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Tomorrow's allowance:",
        money(status.tomorrow_allowance)
    ));

    if status.remaining_daily.is_negative() {
        output.push_str("\nOver today's allowance. Tomorrow's allowance will adjust.\n");
    }

    output
}

/// Format the result of adding an expense
pub fn format_outcome(outcome: &AddOutcome, currency: &str) -> String {
    let mut output = String::new();

    match (&outcome.record, outcome.reason) {
        (Some(record), _) => {
            output.push_str(&format!(
                "Recorded {} for {} on {} ({})\n",
                record.amount().format_with_label(currency),
                record.category(),
                record.date(),
                record.id().short()
            ));
            let left = outcome.daily_remaining - outcome.amount;
            output.push_str(&format!(
                "Remaining today: {}\n",
                left.format_with_label(currency)
            ));
        }
        (None, Some(scope)) => {
            let label = match scope {
                LimitScope::Daily => "today",
                LimitScope::Monthly => "this month",
            };
            output.push_str(&format!(
                "Not recorded: {} limit exceeded. {} remaining {}.\n",
                scope,
                outcome.remaining(scope).format_with_label(currency),
                label
            ));
        }
        (None, None) => output.push_str("Not recorded.\n"),
    }

    for warning in &outcome.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }

    output
}
