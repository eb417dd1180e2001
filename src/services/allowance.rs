//! Allowance engine
//!
//! Turns the configured limits and the spending history into a decision for a
//! new expense. The daily budget rolls: unspent money from earlier days of the
//! month is added to today's allowance, and overspending is taken out of it.
//!
//! ```text
//! carryover_before(d) = daily_limit * (day(d) - 1) - spent_in_month_before(d)
//! daily_allowance(d)  = daily_limit + carryover_before(d)
//! remaining_daily(d)  = daily_allowance(d) - spent_on(d)
//! ```
//!
//! Every query is a pure function of the ledger and the settings it is given.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ledger::ExpenseLedger;
use crate::config::settings::{EnforcementPolicy, Settings};
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{
    DateKey, ExpenseRecord, LimitScope, Money, MonthKey, NewExpense, SpendWarning,
};

/// Snapshot of where the user stands on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceStatus {
    pub date: DateKey,
    pub daily_limit: Money,
    pub monthly_limit: Money,
    pub carryover: Money,
    pub allowance: Money,
    pub spent_today: Money,
    pub remaining_daily: Money,
    pub spent_this_month: Money,
    pub remaining_monthly: Money,
    pub tomorrow_allowance: Money,
}

/// Result of offering an expense to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Whether the expense was appended to the ledger
    pub accepted: bool,
    /// Which limit rejected the expense, if any
    pub reason: Option<LimitScope>,
    /// Advisory notices; never set on a rejection
    pub warnings: Vec<SpendWarning>,
    /// The appended record
    pub record: Option<ExpenseRecord>,
    /// Amount that was offered
    pub amount: Money,
    /// Daily remaining before this expense
    pub daily_remaining: Money,
    /// Monthly remaining before this expense
    pub monthly_remaining: Money,
}

impl AddOutcome {
    fn rejected(scope: LimitScope, amount: Money, daily: Money, monthly: Money) -> Self {
        Self {
            accepted: false,
            reason: Some(scope),
            warnings: Vec::new(),
            record: None,
            amount,
            daily_remaining: daily,
            monthly_remaining: monthly,
        }
    }

    /// Remaining in the given scope before this expense
    pub fn remaining(&self, scope: LimitScope) -> Money {
        match scope {
            LimitScope::Daily => self.daily_remaining,
            LimitScope::Monthly => self.monthly_remaining,
        }
    }

    /// The appended record, or a `LimitExceeded` error for a rejection
    pub fn into_record(self) -> SpendGuardResult<ExpenseRecord> {
        match (self.record, self.reason) {
            (Some(record), _) => Ok(record),
            (None, Some(scope)) => Err(SpendGuardError::LimitExceeded {
                scope,
                amount: self.amount,
                remaining: match scope {
                    LimitScope::Daily => self.daily_remaining,
                    LimitScope::Monthly => self.monthly_remaining,
                },
            }),
            (None, None) => Err(SpendGuardError::Validation(
                "Expense was not recorded".into(),
            )),
        }
    }
}

/// Allowance math over a settings snapshot
pub struct AllowanceEngine<'a> {
    settings: &'a Settings,
}

impl<'a> AllowanceEngine<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Unspent (or overspent) budget from the earlier days of the month
    pub fn carryover_before(&self, ledger: &ExpenseLedger, date: DateKey) -> Money {
        let elapsed = i64::from(date.day()) - 1;
        let spent_before = ledger.spent_in_month_before(date.month_key(), date);
        self.settings.daily_limit * elapsed - spent_before
    }

    /// Rolling allowance for a day
    pub fn daily_allowance(&self, ledger: &ExpenseLedger, date: DateKey) -> Money {
        let carryover = self.carryover_before(ledger, date);
        let allowance = self.settings.daily_limit + carryover;
        debug!(
            "Allowance for {}: limit {} + carryover {} = {}",
            date, self.settings.daily_limit, carryover, allowance
        );
        allowance
    }

    pub fn remaining_daily(&self, ledger: &ExpenseLedger, date: DateKey) -> Money {
        self.daily_allowance(ledger, date) - ledger.spent_on(date)
    }

    pub fn remaining_monthly(&self, ledger: &ExpenseLedger, month: MonthKey) -> Money {
        self.settings.monthly_limit - ledger.spent_in_month(month)
    }

    /// Allowance for the day after `today`
    pub fn tomorrow_allowance(&self, ledger: &ExpenseLedger, today: DateKey) -> Money {
        self.daily_allowance(ledger, today.succ())
    }

    pub fn status(&self, ledger: &ExpenseLedger, today: DateKey) -> AllowanceStatus {
        let month = today.month_key();
        let allowance = self.daily_allowance(ledger, today);
        let spent_today = ledger.spent_on(today);
        let spent_this_month = ledger.spent_in_month(month);

        AllowanceStatus {
            date: today,
            daily_limit: self.settings.daily_limit,
            monthly_limit: self.settings.monthly_limit,
            carryover: allowance - self.settings.daily_limit,
            allowance,
            spent_today,
            remaining_daily: allowance - spent_today,
            spent_this_month,
            remaining_monthly: self.settings.monthly_limit - spent_this_month,
            tomorrow_allowance: self.tomorrow_allowance(ledger, today),
        }
    }

    /// Decide on a candidate expense and append it when accepted
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive amount or a category
    /// outside the catalog. A limit rejection is not an error here; it is
    /// reported through the outcome and leaves the ledger unchanged.
    pub fn add_expense(
        &self,
        ledger: &mut ExpenseLedger,
        expense: NewExpense,
    ) -> SpendGuardResult<AddOutcome> {
        expense.validate(&self.settings.categories)?;

        let amount = expense.amount;
        let daily_remaining = self.remaining_daily(ledger, expense.date);
        let monthly_remaining = self.remaining_monthly(ledger, expense.date.month_key());

        let warnings = match self.settings.enforcement {
            EnforcementPolicy::Soft => {
                let mut warnings = Vec::new();
                if (daily_remaining - amount).is_negative() {
                    warnings.push(SpendWarning::DailyExceededRolling);
                }
                warnings
            }
            EnforcementPolicy::Hard => {
                if amount > daily_remaining {
                    info!(
                        "Rejected {} on {}: daily remaining is {}",
                        amount, expense.date, daily_remaining
                    );
                    return Ok(AddOutcome::rejected(
                        LimitScope::Daily,
                        amount,
                        daily_remaining,
                        monthly_remaining,
                    ));
                }
                if amount > monthly_remaining {
                    info!(
                        "Rejected {} on {}: monthly remaining is {}",
                        amount, expense.date, monthly_remaining
                    );
                    return Ok(AddOutcome::rejected(
                        LimitScope::Monthly,
                        amount,
                        daily_remaining,
                        monthly_remaining,
                    ));
                }
                self.near_limit_warnings(daily_remaining - amount, monthly_remaining - amount)
            }
        };

        let record = ledger.append(expense);
        info!("Recorded expense {} ({})", record.id(), record);
        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(AddOutcome {
            accepted: true,
            reason: None,
            warnings,
            record: Some(record),
            amount,
            daily_remaining,
            monthly_remaining,
        })
    }

    fn near_limit_warnings(&self, daily_after: Money, monthly_after: Money) -> Vec<SpendWarning> {
        let percent = self.settings.near_limit_percent;
        let mut warnings = Vec::new();
        if daily_after <= self.settings.daily_limit.percent(percent) {
            warnings.push(SpendWarning::DailyNear);
        }
        if monthly_after <= self.settings.monthly_limit.percent(percent) {
            warnings.push(SpendWarning::MonthlyNear);
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn expense(units: i64, on: &str) -> NewExpense {
        NewExpense::new(Money::from_units(units), date(on), "Food")
    }

    fn settings(policy: EnforcementPolicy) -> Settings {
        Settings {
            enforcement: policy,
            ..Settings::default()
        }
    }

    #[test]
    fn test_first_day_allowance_is_daily_limit() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let ledger = ExpenseLedger::new();

        for day in ["2026-01-01", "2026-02-01", "2026-12-01"] {
            assert_eq!(engine.daily_allowance(&ledger, date(day)), settings.daily_limit);
        }
    }

    #[test]
    fn test_first_day_ignores_previous_month() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(2000, "2026-01-31"));

        assert_eq!(engine.daily_allowance(&ledger, date("2026-02-01")), settings.daily_limit);
    }

    #[test]
    fn test_carryover_rolls_forward() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(200, "2026-02-01"));
        ledger.append(expense(700, "2026-02-02"));

        // day 3: 500 + (1000 - 900)
        assert_eq!(engine.carryover_before(&ledger, date("2026-02-03")), Money::from_units(100));
        assert_eq!(engine.daily_allowance(&ledger, date("2026-02-03")), Money::from_units(600));
        // day 2 only sees day 1
        assert_eq!(engine.daily_allowance(&ledger, date("2026-02-02")), Money::from_units(800));
    }

    #[test]
    fn test_remaining_daily_has_no_drift() {
        let settings = settings(EnforcementPolicy::Soft);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        let today = date("2026-02-05");

        for units in [120, 40, 300, 90, 15] {
            engine.add_expense(&mut ledger, expense(units, "2026-02-05")).unwrap();
            assert_eq!(
                engine.remaining_daily(&ledger, today),
                engine.daily_allowance(&ledger, today) - ledger.spent_on(today)
            );
        }
    }

    #[test]
    fn test_allowance_is_idempotent() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(340, "2026-02-03"));

        let first = engine.daily_allowance(&ledger, date("2026-02-09"));
        let second = engine.daily_allowance(&ledger, date("2026-02-09"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_carryover_monotonicity() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);

        let mut previous: Option<Money> = None;
        for spend in [600, 400, 200, 50] {
            let mut ledger = ExpenseLedger::new();
            ledger.append(expense(100, "2026-02-03"));
            ledger.append(expense(spend, "2026-02-04"));

            let next_day = engine.daily_allowance(&ledger, date("2026-02-05"));
            if let Some(previous) = previous {
                assert!(next_day >= previous);
            }
            previous = Some(next_day);
        }
    }

    #[test]
    fn test_tomorrow_allowance() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(300, "2026-02-10"));

        // 500 * 10 - 300
        assert_eq!(
            engine.tomorrow_allowance(&ledger, date("2026-02-10")),
            Money::from_units(5_200)
        );
        // tomorrow is a new month
        assert_eq!(
            engine.tomorrow_allowance(&ledger, date("2026-02-28")),
            settings.daily_limit
        );
    }

    #[test]
    fn test_hard_policy_rejects_over_daily() {
        let settings = settings(EnforcementPolicy::Hard);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();

        let outcome = engine.add_expense(&mut ledger, expense(600, "2026-02-01")).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.reason, Some(LimitScope::Daily));
        assert!(outcome.warnings.is_empty());
        assert_eq!(ledger.len(), 0);

        let err = outcome.into_record().unwrap_err();
        assert_eq!(err.limit_scope(), Some(LimitScope::Daily));
    }

    #[test]
    fn test_hard_policy_rejects_over_monthly() {
        let settings = Settings {
            enforcement: EnforcementPolicy::Hard,
            monthly_limit: Money::from_units(1_000),
            ..Settings::default()
        };
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(900, "2026-02-01"));

        let outcome = engine.add_expense(&mut ledger, expense(200, "2026-02-10")).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.reason, Some(LimitScope::Monthly));
        assert_eq!(outcome.remaining(LimitScope::Monthly), Money::from_units(100));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_hard_policy_near_limit_warnings() {
        let settings = settings(EnforcementPolicy::Hard);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();

        let outcome = engine.add_expense(&mut ledger, expense(460, "2026-02-01")).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.warnings, vec![SpendWarning::DailyNear]);

        let quiet = engine.add_expense(&mut ledger, expense(10, "2026-02-02")).unwrap();
        assert!(quiet.accepted);
        assert!(quiet.warnings.is_empty());
    }

    #[test]
    fn test_hard_policy_monthly_near_warning() {
        let settings = settings(EnforcementPolicy::Hard);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        for day in 1..=27 {
            ledger.append(expense(500, &format!("2026-02-{:02}", day)));
        }

        // 400 left today, 1400 of 15000 left this month
        let outcome = engine.add_expense(&mut ledger, expense(100, "2026-02-28")).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.warnings, vec![SpendWarning::MonthlyNear]);

        // 40 left today, 1040 left this month
        let both = engine.add_expense(&mut ledger, expense(360, "2026-02-28")).unwrap();
        assert!(both.accepted);
        assert_eq!(
            both.warnings,
            vec![SpendWarning::DailyNear, SpendWarning::MonthlyNear]
        );
    }

    #[test]
    fn test_hard_policy_accepts_exact_remaining() {
        let settings = settings(EnforcementPolicy::Hard);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();

        let outcome = engine.add_expense(&mut ledger, expense(500, "2026-02-01")).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.warnings, vec![SpendWarning::DailyNear]);
        assert_eq!(engine.remaining_daily(&ledger, date("2026-02-01")), Money::zero());
    }

    #[test]
    fn test_soft_policy_accepts_with_rolling_warning() {
        let settings = settings(EnforcementPolicy::Soft);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(700, "2026-02-01"));

        let today = date("2026-02-02");
        assert_eq!(engine.daily_allowance(&ledger, today), Money::from_units(300));

        let outcome = engine.add_expense(&mut ledger, expense(350, "2026-02-02")).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.reason, None);
        assert_eq!(outcome.warnings, vec![SpendWarning::DailyExceededRolling]);
        assert_eq!(ledger.len(), 2);
        assert!(outcome.into_record().is_ok());
    }

    #[test]
    fn test_soft_policy_no_warning_within_allowance() {
        let settings = settings(EnforcementPolicy::Soft);
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();

        let outcome = engine.add_expense(&mut ledger, expense(500, "2026-02-01")).unwrap();
        assert!(outcome.accepted);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_invalid_candidates() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();

        let zero = NewExpense::new(Money::zero(), date("2026-02-01"), "Food");
        assert!(engine.add_expense(&mut ledger, zero).unwrap_err().is_validation());

        let unknown = NewExpense::new(Money::from_units(5), date("2026-02-01"), "Gadgets");
        assert!(engine.add_expense(&mut ledger, unknown).unwrap_err().is_validation());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_status() {
        let settings = Settings::default();
        let engine = AllowanceEngine::new(&settings);
        let mut ledger = ExpenseLedger::new();
        ledger.append(expense(400, "2026-02-01"));
        ledger.append(expense(250, "2026-02-02"));

        let status = engine.status(&ledger, date("2026-02-02"));
        assert_eq!(status.carryover, Money::from_units(100));
        assert_eq!(status.allowance, Money::from_units(600));
        assert_eq!(status.spent_today, Money::from_units(250));
        assert_eq!(status.remaining_daily, Money::from_units(350));
        assert_eq!(status.remaining_monthly, Money::from_units(14_350));
        assert_eq!(status.tomorrow_allowance, Money::from_units(850));
    }
}
