//! Demo data generation
//!
//! Fills an empty ledger with plausible spending so the status and report
//! views have something to show on a first run.

use rand::Rng;

use crate::models::{
    Category, DateKey, ExpenseId, ExpenseRecord, Money, NewExpense, PaymentMethod,
    DEFAULT_CATEGORIES,
};

/// Spending budget each generated day tries to stay within
const DEMO_DAILY_BUDGET: Money = Money::from_units(480);
const DEMO_MIN_AMOUNT: Money = Money::from_units(50);
const DEMO_DESCRIPTION: &str = "Demo expense";

/// Generate demo expenses for the `days` days ending at `today`, newest first
///
/// Each day gets one to three expenses. Categories and payment methods rotate
/// through the defaults so every category shows up in a report.
pub fn generate_demo_expenses<R: Rng>(
    days: u32,
    today: DateKey,
    rng: &mut R,
) -> Vec<ExpenseRecord> {
    let methods = PaymentMethod::all();
    let mut records = Vec::new();

    for offset in 0..days as usize {
        let date = today.offset_days(-(offset as i64));
        let entries = rng.random_range(1..=3usize);
        let mut remaining = DEMO_DAILY_BUDGET;

        for index in 0..entries {
            let drawn = Money::from_units(rng.random_range(60..=220));
            let amount = remaining.min(drawn).max(DEMO_MIN_AMOUNT);
            remaining -= amount;

            let slot = offset + index;
            let expense = NewExpense::new(
                amount,
                date,
                Category::new(DEFAULT_CATEGORIES[slot % DEFAULT_CATEGORIES.len()]),
            )
            .with_payment_method(methods[slot % methods.len()])
            .with_description(DEMO_DESCRIPTION);

            records.push(ExpenseRecord::with_id(ExpenseId::demo(date, index), expense));
        }
    }

    records
}
