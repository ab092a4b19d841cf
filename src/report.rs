//! Group reports computed on the client from a group's transactions.
//!
//! A [`Report`] carries income/expense totals, the balance, per-category and
//! per-member breakdowns and the chart series from [`aggregate`], all limited
//! to the transactions selected by a [`ReportFilter`].

use crate::aggregate::{aggregate, category_names_by_id, sum_in_order, Aggregates};
use crate::models::{Category, Member, Transaction, TransactionType};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ReportFilter
// ---------------------------------------------------------------------------

/// Selection applied before totals are computed.
///
/// Date bounds are inclusive `YYYY-MM-DD` strings compared against the date
/// part of each transaction. An empty `categories` list selects all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub categories: Vec<String>,
}

impl ReportFilter {
    /// The month leading up to and including `today`.
    pub fn last_month(today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        Self {
            date_from: Some(start.format("%Y-%m-%d").to_string()),
            date_to: Some(today.format("%Y-%m-%d").to_string()),
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    fn matches(&self, tx: &Transaction, category_name: &str) -> bool {
        let day = tx.date.get(..10).unwrap_or(&tx.date);
        if let Some(ref from) = self.date_from {
            if day < from.as_str() {
                return false;
            }
        }
        if let Some(ref to) = self.date_to {
            if day > to.as_str() {
                return false;
            }
        }
        self.categories.is_empty() || self.categories.iter().any(|c| c == category_name)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTotal {
    pub member: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Sum of all amounts per category name, both types included.
    pub by_category: Vec<CategoryTotal>,
    /// Sum of all amounts per member name, both types included.
    pub by_user: Vec<MemberTotal>,
    pub charts: Aggregates,
    pub transactions: Vec<Transaction>,
}

/// Build a report over the transactions selected by `filter`.
///
/// Breakdown entries whose category or member cannot be resolved are left
/// out of `by_category`/`by_user` but still count towards the totals.
pub fn build_report(
    transactions: &[Transaction],
    categories: &[Category],
    members: &[Member],
    filter: &ReportFilter,
) -> Report {
    let names = category_names_by_id(categories);
    let selected: Vec<Transaction> = transactions
        .iter()
        .filter(|t| {
            let name = names.get(t.category_id.as_str()).copied().unwrap_or("");
            filter.matches(t, name)
        })
        .cloned()
        .collect();

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    for tx in &selected {
        match tx.kind {
            TransactionType::Income => total_income += tx.amount,
            TransactionType::Expense => total_expense += tx.amount,
        }
    }

    let by_category = sum_in_order(
        selected
            .iter()
            .map(|t| (names.get(t.category_id.as_str()).copied(), t.amount)),
    )
    .into_iter()
    .map(|(category, amount)| CategoryTotal { category, amount })
    .collect();

    let member_names: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();
    let by_user = sum_in_order(
        selected
            .iter()
            .map(|t| (member_names.get(t.user_id.as_str()).copied(), t.amount)),
    )
    .into_iter()
    .map(|(member, amount)| MemberTotal { member, amount })
    .collect();

    Report {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category,
        by_user,
        charts: aggregate(&selected, categories),
        transactions: selected,
    }
}
