//! Transaction queries. Listing is always scoped to a group via the
//! `group_id` query parameter; the other filters are optional.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate};
use crate::transport::ApiRequest;

// ---------------------------------------------------------------------------
// TransactionApi
// ---------------------------------------------------------------------------

pub struct TransactionApi<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Record a transaction.
    pub fn create(&self, data: &NewTransaction) -> Result<Transaction> {
        let request = ApiRequest::post(config::TRANSACTIONS).json(data)?;
        self.conn.execute_json(request)
    }

    /// All transactions of a group, in server order.
    pub fn list(&self, group_id: &str) -> Result<Vec<Transaction>> {
        self.list_filtered(&TransactionFilter::for_group(group_id))
    }

    /// Transactions of a group narrowed by author, category, date range or type.
    pub fn list_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let request = ApiRequest::get(config::TRANSACTIONS).query_pairs(filter.to_query());
        self.conn.execute_json(request)
    }

    pub fn get(&self, tx_id: &str) -> Result<Transaction> {
        self.conn
            .execute_json(ApiRequest::get(config::transaction_path(tx_id)))
    }

    pub fn update(&self, tx_id: &str, changes: &TransactionUpdate) -> Result<Transaction> {
        let request = ApiRequest::patch(config::transaction_path(tx_id)).json(changes)?;
        self.conn.execute_json(request)
    }

    pub fn delete(&self, tx_id: &str) -> Result<()> {
        self.conn
            .execute_empty(ApiRequest::delete(config::transaction_path(tx_id)))
    }
}
