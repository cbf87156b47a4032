//! Per-hustle totals and the growth forecast.
//!
//! The "monthly" figures cover every transaction handed in; no date window is
//! applied.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use super::dto::{Forecast, Hustle, HustleTotals, MoneySummary, Transaction, TransactionType};
use crate::math::round_to;

pub const DEFAULT_HUSTLE: &str = "General";
pub const GROWTH_RATE: f64 = 0.05;

impl HustleTotals {
    fn record(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expense += amount,
        }
        self.profit = self.income - self.expense;
    }

    fn rounded(self) -> Self {
        Self {
            income: round_to(self.income, 2),
            expense: round_to(self.expense, 2),
            profit: round_to(self.profit, 2),
        }
    }
}

/// Group label: the referenced hustle's current name, else the free-text name.
fn group_label<'a>(tx: &'a Transaction, names: &HashMap<Uuid, &'a str>) -> &'a str {
    tx.hustle_id
        .and_then(|id| names.get(&id).copied())
        .or_else(|| tx.hustle_name.as_deref().filter(|n| !n.trim().is_empty()))
        .unwrap_or(DEFAULT_HUSTLE)
}

pub fn forecast(monthly_income: f64, monthly_expense: f64) -> Forecast {
    let income = monthly_income * (1.0 + GROWTH_RATE);
    let expense = monthly_expense;
    Forecast {
        income: round_to(income, 2),
        expense: round_to(expense, 2),
        profit: round_to(income - expense, 2),
    }
}

pub fn summarize(transactions: &[Transaction], hustles: &[Hustle]) -> MoneySummary {
    let names: HashMap<Uuid, &str> = hustles.iter().map(|h| (h.id, h.name.as_str())).collect();

    let mut per_hustle: BTreeMap<String, HustleTotals> = BTreeMap::new();
    let mut monthly_income = 0.0;
    let mut monthly_expense = 0.0;

    for tx in transactions {
        per_hustle
            .entry(group_label(tx, &names).to_string())
            .or_default()
            .record(tx.kind, tx.amount);
        match tx.kind {
            TransactionType::Income => monthly_income += tx.amount,
            TransactionType::Expense => monthly_expense += tx.amount,
        }
    }

    MoneySummary {
        per_hustle: per_hustle
            .into_iter()
            .map(|(name, totals)| (name, totals.rounded()))
            .collect(),
        monthly_forecast: forecast(monthly_income, monthly_expense),
    }
}
