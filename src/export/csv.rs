//! CSV Export functionality
//!
//! Exports the expense ledger in a spreadsheet-friendly layout.

use serde::Serialize;
use std::io::Write;

use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::ExpenseRecord;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Payment Method")]
    payment_method: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: &'a str,
}

impl<'a> From<&'a ExpenseRecord> for ExpenseRow<'a> {
    fn from(record: &'a ExpenseRecord) -> Self {
        Self {
            id: record.id().as_str(),
            date: record.date_key().to_string(),
            month: record.month_key().to_string(),
            category: record.category().name(),
            payment_method: record.payment_method().name(),
            amount: record.amount().to_string(),
            description: record.description().unwrap_or(""),
        }
    }
}

/// Export expenses to CSV, in the order given
pub fn export_expenses_csv<'a, W, I>(records: I, writer: W) -> SpendGuardResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut csv = csv::Writer::from_writer(writer);
    let mut count = 0;

    for record in records {
        csv.serialize(ExpenseRow::from(record))
            .map_err(|e| SpendGuardError::Export(e.to_string()))?;
        count += 1;
    }

    if count == 0 {
        // serialize() writes the header with the first row only
        csv.write_record([
            "ID",
            "Date",
            "Month",
            "Category",
            "Payment Method",
            "Amount",
            "Description",
        ])
        .map_err(|e| SpendGuardError::Export(e.to_string()))?;
    }

    csv.flush()
        .map_err(|e| SpendGuardError::Export(e.to_string()))?;
    Ok(count)
}
