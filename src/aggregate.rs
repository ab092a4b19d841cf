//! Chart-ready summaries of a group's transactions.
//!
//! [`aggregate`] folds raw transactions into two series: expense totals per
//! date and income totals per category name. It is pure; pages call it
//! again after every fetch rather than patching previous results.

use crate::models::{Category, Transaction, TransactionType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summed expenses for one date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePoint {
    pub amount: f64,
    pub date: String,
}

/// Summed income for one category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSlice {
    pub value: f64,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub expense: Vec<ExpensePoint>,
    pub income: Vec<IncomeSlice>,
    pub category_names: Vec<String>,
}

impl Aggregates {
    pub fn total_expense(&self) -> f64 {
        self.expense.iter().map(|p| p.amount).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.income.iter().map(|s| s.value).sum()
    }
}

/// Map of category id to category name.
pub fn category_names_by_id(categories: &[Category]) -> HashMap<&str, &str> {
    categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect()
}

/// Sum `(key, amount)` pairs per key, keeping keys in first-seen order.
///
/// Pairs whose key is `None` are skipped.
pub(crate) fn sum_in_order<'a, I>(pairs: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (Option<&'a str>, f64)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut buckets: Vec<(String, f64)> = Vec::new();
    for (key, amount) in pairs {
        let Some(key) = key else { continue };
        match index.get(key) {
            Some(&i) => buckets[i].1 += amount,
            None => {
                index.insert(key, buckets.len());
                buckets.push((key.to_string(), amount));
            }
        }
    }
    buckets
}

/// Group expenses by date and income by category.
///
/// Dates are compared as exact strings, so `2024-01-01` and
/// `2024-01-01T10:00:00` land in different buckets. Income whose
/// `category_id` matches no category is summed under the empty name.
/// `category_names` lists every category passed in, used or not.
pub fn aggregate(transactions: &[Transaction], categories: &[Category]) -> Aggregates {
    let names = category_names_by_id(categories);

    let expense = sum_in_order(
        transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense)
            .map(|t| (Some(t.date.as_str()), t.amount)),
    )
    .into_iter()
    .map(|(date, amount)| ExpensePoint { amount, date })
    .collect();

    let income = sum_in_order(
        transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Income)
            .map(|t| {
                let name = names.get(t.category_id.as_str()).copied().unwrap_or("");
                (Some(name), t.amount)
            }),
    )
    .into_iter()
    .map(|(category, value)| IncomeSlice { value, category })
    .collect();

    Aggregates {
        expense,
        income,
        category_names: categories.iter().map(|c| c.name.clone()).collect(),
    }
}
