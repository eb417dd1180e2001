//! Expense display formatting
//!
//! Register views of the ledger and single-expense details.

use crate::models::ExpenseRecord;

/// Format a single expense for display (register row)
pub fn format_expense_row(record: &ExpenseRecord, currency: &str) -> String {
    format!(
        "{:8} {} {:14} {:7} {:>14}  {}",
        record.id().short(),
        record.date(),
        truncate(record.category().name(), 14),
        record.payment_method().name(),
        record.amount().format_with_label(currency),
        record.description().unwrap_or("")
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(records: &[&ExpenseRecord], currency: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:10} {:14} {:7} {:>14}  {}\n",
        "ID", "Date", "Category", "Method", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, currency));
        output.push('\n');
    }

    let total: crate::models::Money = records.iter().map(|r| r.amount()).sum();
    output.push_str(&"-".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "{} expenses, total {}\n",
        records.len(),
        total.format_with_label(currency)
    ));

    output
}

/// Format expense details for display
pub fn format_expense_details(record: &ExpenseRecord, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", record.id()));
    output.push_str(&format!("Date:     {}\n", record.date()));
    output.push_str(&format!(
        "Amount:   {}\n",
        record.amount().format_with_label(currency)
    ));
    output.push_str(&format!("Category: {}\n", record.category()));
    output.push_str(&format!("Paid by:  {}\n", record.payment_method()));

    if let Some(description) = record.description() {
        output.push_str(&format!("Note:     {}\n", description));
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
