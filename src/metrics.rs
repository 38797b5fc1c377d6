//! Derived figures computed from the transaction list: totals, savings progress and a monthly
//! breakdown. Everything here is a pure function of its inputs.

use crate::model::{Amount, SavingsGoal, Transaction, TransactionType};
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Income, expenses and the difference between them.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Amount,
    pub expenses: Amount,
    pub balance: Amount,
}

/// Sums income and expenses. `balance` is always `income - expenses`.
pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expenses) = transactions.into_iter().fold(
        (Amount::ZERO, Amount::ZERO),
        |(income, expenses), t| match t.transaction_type() {
            TransactionType::Income => (income + t.amount(), expenses),
            TransactionType::Expense => (income, expenses + t.amount()),
        },
    );
    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Progress toward a savings goal as a percentage of the goal.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(Decimal);

impl Progress {
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// The share of a progress bar to fill, clamped to 0..=100.
    pub fn bar_fill(&self) -> Decimal {
        self.0.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Renders a text progress bar `width` characters wide.
    pub fn bar(&self, width: usize) -> String {
        let width_dec = Decimal::from(width as u64);
        let filled = (self.bar_fill() * width_dec / Decimal::ONE_HUNDRED)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}

impl Display for Progress {
    /// One decimal place, e.g. `16.0%`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rounded = self.0.round_dp(1);
        write!(f, "{rounded:.1}%")
    }
}

/// `balance / goal × 100`. A goal of zero or less has no meaningful progress and yields 0%.
/// A percentage too large for `Decimal` saturates.
pub fn savings_progress(balance: Amount, goal: SavingsGoal) -> Progress {
    let goal = goal.value();
    if goal <= Decimal::ZERO {
        return Progress(Decimal::ZERO);
    }
    let percent = balance
        .value()
        .checked_div(goal)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if balance.is_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
    Progress(percent)
}

/// A calendar month, ordered chronologically and written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> crate::Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Invalid month {month}, expected 1 through 12");
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .rsplit_once('-')
            .with_context(|| format!("Expected YYYY-MM, got '{s}'"))?;
        let year = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month = month
            .parse()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Income and expense accumulated within one month.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: Amount,
    pub expense: Amount,
}

/// Groups transactions by the month of their `date`.
pub fn monthly_breakdown<'a, I>(transactions: I) -> BTreeMap<YearMonth, MonthlyTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<YearMonth, MonthlyTotals> = BTreeMap::new();
    for t in transactions {
        let entry = months.entry(YearMonth::of(t.date())).or_default();
        match t.transaction_type() {
            TransactionType::Income => entry.income = entry.income + t.amount(),
            TransactionType::Expense => entry.expense = entry.expense + t.amount(),
        }
    }
    months
}

/// Every derived figure for a ledger at one point in time.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub transaction_count: usize,
    pub totals: Totals,
    pub savings_goal: SavingsGoal,
    pub progress: Progress,
    pub monthly: BTreeMap<YearMonth, MonthlyTotals>,
}

impl Summary {
    pub fn new(transactions: &[Transaction], savings_goal: SavingsGoal) -> Self {
        let totals = totals(transactions);
        Self {
            transaction_count: transactions.len(),
            totals,
            savings_goal,
            progress: savings_progress(totals.balance, savings_goal),
            monthly: monthly_breakdown(transactions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Draft, TransactionId};
    use chrono::Utc;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn txn(
        transaction_type: TransactionType,
        amt: &str,
        category: &str,
        date: &str,
    ) -> Transaction {
        let valid = Draft::new(transaction_type)
            .with_amount(amt)
            .with_category(category)
            .with_date(NaiveDate::from_str(date).unwrap())
            .validate()
            .unwrap();
        Transaction::new(TransactionId::generate(), valid, Utc::now())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, "1000", "Salary", "2024-01-01"),
            txn(TransactionType::Expense, "200", "Food", "2024-01-02"),
            txn(TransactionType::Expense, "35.50", "Transport", "2024-02-10"),
            txn(TransactionType::Income, "120.25", "Gift", "2023-12-24"),
        ]
    }

    #[test]
    fn test_totals_empty() {
        let t = totals(&Vec::<Transaction>::new());
        assert_eq!(t, Totals::default());
        assert!(t.balance.is_zero());
    }

    #[test]
    fn test_totals_scenario() {
        let list = sample();
        let t = totals(&list[..2]);
        assert_eq!(t.income, amount("1000"));
        assert_eq!(t.expenses, amount("200"));
        assert_eq!(t.balance, amount("800"));
    }

    #[test]
    fn test_totals_balance_and_order_invariance() {
        let mut list = sample();
        let forward = totals(&list);
        assert_eq!(forward.balance, forward.income - forward.expenses);

        list.reverse();
        assert_eq!(totals(&list), forward);
        list.swap(0, 2);
        assert_eq!(totals(&list), forward);
    }

    #[test]
    fn test_savings_progress_scenario() {
        let progress = savings_progress(amount("800"), SavingsGoal::default());
        assert_eq!(progress.percent(), Decimal::from(16));
        assert_eq!(progress.to_string(), "16.0%");
    }

    #[test]
    fn test_savings_progress_zero_goal() {
        let goal = SavingsGoal::new(Amount::ZERO);
        assert_eq!(savings_progress(amount("800"), goal).percent(), Decimal::ZERO);
        let goal = SavingsGoal::new(amount("-10"));
        assert_eq!(savings_progress(amount("800"), goal).percent(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_progress_monotonic_in_balance() {
        let goal = SavingsGoal::new(amount("3000"));
        let balances = ["-500", "0", "0.01", "800", "2999.99", "3000", "10000"];
        let progress: Vec<Progress> = balances
            .iter()
            .map(|b| savings_progress(amount(b), goal))
            .collect();
        for pair in progress.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_progress_bar_clamps() {
        let over = savings_progress(amount("12000"), SavingsGoal::default());
        assert_eq!(over.bar_fill(), Decimal::ONE_HUNDRED);
        assert_eq!(over.bar(4), "[####]");

        let under = savings_progress(amount("-100"), SavingsGoal::default());
        assert_eq!(under.bar_fill(), Decimal::ZERO);
        assert_eq!(under.bar(4), "[----]");

        let half = savings_progress(amount("2500"), SavingsGoal::default());
        assert_eq!(half.bar(10), "[#####-----]");
    }

    #[test]
    fn test_monthly_breakdown_keys_are_chronological() {
        let months = monthly_breakdown(&sample());
        let keys: Vec<String> = months.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);

        let jan = months[&YearMonth::new(2024, 1).unwrap()];
        assert_eq!(jan.income, amount("1000"));
        assert_eq!(jan.expense, amount("200"));

        let feb = months[&YearMonth::new(2024, 2).unwrap()];
        assert_eq!(feb.income, Amount::ZERO);
        assert_eq!(feb.expense, amount("35.50"));
    }

    #[test]
    fn test_year_month_parse() {
        let ym = YearMonth::from_str("2024-03").unwrap();
        assert_eq!((ym.year(), ym.month()), (2024, 3));
        assert!(YearMonth::from_str("2024-13").is_err());
        assert!(YearMonth::from_str("March").is_err());
    }

    #[test]
    fn test_summary_serializes_month_keys() {
        let summary = Summary::new(&sample(), SavingsGoal::default());
        assert_eq!(summary.transaction_count, 4);
        assert_eq!(summary.totals.balance, amount("884.75"));
        assert_eq!(summary.progress.percent(), Decimal::from_str("17.695").unwrap());
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["monthly"]["2024-01"].is_object());
        assert!(json["monthly"]["2023-12"].is_object());
    }

    fn stored(transaction_type: &str, amt: &str, date: &str) -> Transaction {
        serde_json::from_value(serde_json::json!({
            "id": TransactionId::generate(),
            "type": transaction_type,
            "amount": amt,
            "category": "Other",
            "date": date,
            "createdAt": "2024-01-01T00:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_totals_saturate_on_huge_amounts() {
        let max = Decimal::MAX.to_string();
        let transactions = vec![
            stored("income", &max, "2024-01-01"),
            stored("income", "1", "2024-01-02"),
            stored("expense", &max, "2024-02-01"),
            stored("expense", &max, "2024-02-02"),
        ];
        let totals = totals(&transactions);
        assert_eq!(totals.income.value(), Decimal::MAX);
        assert_eq!(totals.expenses.value(), Decimal::MAX);
        assert!(totals.balance.is_zero());

        let months = monthly_breakdown(&transactions);
        let jan = months[&YearMonth::new(2024, 1).unwrap()];
        assert_eq!(jan.income.value(), Decimal::MAX);
        let feb = months[&YearMonth::new(2024, 2).unwrap()];
        assert_eq!(feb.expense.value(), Decimal::MAX);

        let summary = Summary::new(&transactions[..2], SavingsGoal::new(amount("0.01")));
        assert_eq!(summary.totals.balance.value(), Decimal::MAX);
        assert_eq!(summary.progress.percent(), Decimal::MAX);
        assert_eq!(summary.progress.bar(4), "[####]");
    }
}
