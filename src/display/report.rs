//! Report display formatting
//!
//! Renders the monthly report with its category breakdown as a table, and a
//! per-day spending series as a simple bar listing.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{DateKey, Money};
use crate::reports::{CategorySpending, MonthlyReport};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    percentage: String,
}

impl CategoryRow {
    fn new(row: &CategorySpending, currency: &str) -> Self {
        Self {
            category: row.category.name().to_string(),
            amount: row.total.format_with_label(currency),
            count: row.expense_count,
            percentage: format!("{:.1}", row.percentage),
        }
    }
}

/// Category totals as a table
pub fn format_category_table(rows: &[CategorySpending], currency: &str) -> String {
    let rows: Vec<CategoryRow> = rows.iter().map(|r| CategoryRow::new(r, currency)).collect();
    Table::new(rows)
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right())
        .to_string()
}

/// Format the monthly report with its summary and category table
pub fn format_monthly_report(report: &MonthlyReport, currency: &str) -> String {
    let money = |m: Money| m.format_with_label(currency);
    let mut output = String::new();

    output.push_str(&format!("Report for {}\n", report.month));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("{:<22} {:>16}\n", "Total spent:", money(report.total_spent)));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Monthly remaining:",
        money(report.monthly_remaining)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Saved to date:",
        money(report.saved_to_date)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Last month saved:",
        money(report.previous_month_saved)
    ));
    output.push('\n');

    if report.categories.is_empty() {
        output.push_str("No spending recorded for this month.\n");
    } else {
        output.push_str(&format_category_table(&report.categories, currency));
        output.push('\n');
    }

    output
}

/// Format a per-day series with proportional bars
pub fn format_daily_series(series: &[(DateKey, Money)], currency: &str) -> String {
    const BAR_WIDTH: i64 = 30;

    let peak = series
        .iter()
        .map(|(_, amount)| amount.cents())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (date, amount) in series {
        let width = if peak > 0 {
            (amount.cents() * BAR_WIDTH / peak) as usize
        } else {
            0
        };
        output.push_str(&format!(
            "{} {:>14} {}\n",
            date,
            amount.format_with_label(currency),
            "#".repeat(width)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::models::{MonthKey, NewExpense};
    use crate::services::ExpenseLedger;

    fn date(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn report() -> MonthlyReport {
        let mut ledger = ExpenseLedger::new();
        ledger.append(NewExpense::new(Money::from_units(300), date("2026-02-02"), "Bills"));
        ledger.append(NewExpense::new(Money::from_units(100), date("2026-02-03"), "Food"));
        MonthlyReport::generate(
            &ledger,
            &Settings::default(),
            MonthKey::parse("2026-02").unwrap(),
            date("2026-02-05"),
        )
    }

    #[test]
    fn test_category_table() {
        let table = format_category_table(&report().categories, "Rs.");
        assert!(table.contains("Category"));
        assert!(table.contains("Bills"));
        assert!(table.contains("Rs. 300.00"));
        assert!(table.contains("75.0"));
        assert!(table.find("Bills") < table.find("Food"));
    }

    #[test]
    fn test_monthly_report() {
        let output = format_monthly_report(&report(), "Rs.");
        assert!(output.contains("Report for 2026-02"));
        assert!(output.contains("Rs. 2100.00"));
        assert!(output.contains("Food"));
    }

    #[test]
    fn test_daily_series_bars() {
        let series = vec![
            (date("2026-02-01"), Money::from_units(100)),
            (date("2026-02-02"), Money::zero()),
            (date("2026-02-03"), Money::from_units(50)),
        ];
        let output = format_daily_series(&series, "");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(&"#".repeat(30)));
        assert!(!lines[1].contains('#'));
        assert!(lines[2].ends_with(&"#".repeat(15)));
    }
}
