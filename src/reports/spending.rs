//! Monthly spending report
//!
//! Summarizes a calendar month: what was spent, how much of the budget is
//! left, how much was saved against the daily limit, and where the money went.

use serde::Serialize;
use std::io::Write;

use crate::config::settings::Settings;
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{Category, DateKey, Money, MonthKey};
use crate::services::ledger::{ExpenseFilter, ExpenseLedger};

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the month's total spending
    pub percentage: f64,
}

/// Monthly spending report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub total_spent: Money,
    pub monthly_limit: Money,
    pub monthly_remaining: Money,
    /// Days of the month counted towards the savings figure
    pub days_elapsed: u32,
    /// `daily_limit * days_elapsed - total_spent`
    pub saved_to_date: Money,
    pub previous_month_saved: Money,
    /// Non-zero categories, largest first
    pub categories: Vec<CategorySpending>,
    /// Days with spending, ascending
    pub daily_totals: Vec<(DateKey, Money)>,
}

impl MonthlyReport {
    /// Generate the report for `month` as seen on `today`
    pub fn generate(
        ledger: &ExpenseLedger,
        settings: &Settings,
        month: MonthKey,
        today: DateKey,
    ) -> Self {
        let total_spent = ledger.spent_in_month(month);
        let days_elapsed = days_elapsed(month, today);

        let previous = month.previous();
        let previous_total = ledger.spent_in_month(previous);
        let previous_month_saved =
            settings.daily_limit * i64::from(previous.days_in_month()) - previous_total;

        let mut categories: Vec<CategorySpending> = ledger
            .category_totals(month)
            .into_iter()
            .map(|(category, total)| {
                let expense_count = ledger
                    .filter(&ExpenseFilter::new().month(month).category(category.clone()))
                    .len();
                CategorySpending {
                    percentage: share(total, total_spent),
                    category,
                    total,
                    expense_count,
                }
            })
            .collect();

        // Largest first; ties broken by name so the order is stable
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Self {
            month,
            total_spent,
            monthly_limit: settings.monthly_limit,
            monthly_remaining: settings.monthly_limit - total_spent,
            days_elapsed,
            saved_to_date: settings.daily_limit * i64::from(days_elapsed) - total_spent,
            previous_month_saved,
            categories,
            daily_totals: ledger.daily_totals(month),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report: {}\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Total Spent:",
            self.total_spent.format_with_label(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Monthly Remaining:",
            self.monthly_remaining.format_with_label(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Saved To Date:",
            self.saved_to_date.format_with_label(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Previous Month Saved:",
            self.previous_month_saved.format_with_label(currency)
        ));

        if self.categories.is_empty() {
            output.push_str("\nNo spending recorded this month.\n");
            return output;
        }

        output.push_str(&format!(
            "\n{:<20} {:>16} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>16} {:>8} {:>7.1}%\n",
                row.category.name(),
                row.total.format_with_label(currency),
                row.expense_count,
                row.percentage
            ));
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> SpendGuardResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let to_export = |e: csv::Error| SpendGuardError::Export(e.to_string());

        csv.write_record(["Month", "Category", "Amount", "Count", "Percentage"])
            .map_err(to_export)?;
        for row in &self.categories {
            csv.write_record([
                self.month.to_string(),
                row.category.name().to_string(),
                row.total.to_string(),
                row.expense_count.to_string(),
                format!("{:.2}", row.percentage),
            ])
            .map_err(to_export)?;
        }
        csv.write_record([
            self.month.to_string(),
            "TOTAL".to_string(),
            self.total_spent.to_string(),
            self.categories
                .iter()
                .map(|c| c.expense_count)
                .sum::<usize>()
                .to_string(),
            "100.00".to_string(),
        ])
        .map_err(to_export)?;

        csv.flush()
            .map_err(|e| SpendGuardError::Export(e.to_string()))
    }
}

/// Daily totals for the `days` days ending at `end`, ascending
///
/// Days without spending are included with a zero total.
pub fn daily_series(
    ledger: &ExpenseLedger,
    end: DateKey,
    days: u32,
    category: Option<&Category>,
) -> Vec<(DateKey, Money)> {
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let day = end.offset_days(-back);
            let total = ledger
                .iter()
                .filter(|r| r.date_key() == day)
                .filter(|r| category.map_or(true, |c| r.category() == c))
                .map(|r| r.amount())
                .sum();
            (day, total)
        })
        .collect()
}

fn days_elapsed(month: MonthKey, today: DateKey) -> u32 {
    let current = today.month_key();
    if month == current {
        today.day()
    } else if month < current {
        month.days_in_month()
    } else {
        0
    }
}

fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}
