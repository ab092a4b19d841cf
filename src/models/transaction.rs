use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Direction of a transaction. The stored amount is always a magnitude;
/// whether it adds to or subtracts from a balance is decided here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub date: String,
    pub category_id: String,
    pub group_id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Transaction {
    /// Amount with its sign applied: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub date: String,
    pub category_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

// ---------------------------------------------------------------------------
// TransactionFilter
// ---------------------------------------------------------------------------

/// Server-side filters for `GET /transactions`.
///
/// Only `group_id` is required. Dates are `YYYY-MM-DD` and inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub group_id: String,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn for_group(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    /// Render as query-string pairs, omitting unset filters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("group_id".to_string(), self.group_id.clone())];
        if let Some(skip) = self.skip {
            query.push(("skip".into(), skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".into(), limit.to_string()));
        }
        if let Some(ref user_id) = self.user_id {
            query.push(("user_id".into(), user_id.clone()));
        }
        if let Some(ref category_id) = self.category_id {
            query.push(("category_id".into(), category_id.clone()));
        }
        if let Some(ref from) = self.date_from {
            query.push(("date_from".into(), from.clone()));
        }
        if let Some(ref to) = self.date_to {
            query.push(("date_to".into(), to.clone()));
        }
        if let Some(kind) = self.kind {
            query.push(("tx_type".into(), kind.as_str().to_string()));
        }
        query
    }
}
