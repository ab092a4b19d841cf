//! Categories scoped to a group.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Category, CategoryUpdate, NewCategory};
use crate::transport::ApiRequest;

pub struct CategoryApi<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, group_id: &str) -> Result<Vec<Category>> {
        self.conn
            .execute_json(ApiRequest::get(config::categories_path(group_id)))
    }

    /// Create a category in `group_id`. No icon is sent.
    pub fn create(&self, group_id: &str, name: &str) -> Result<Category> {
        let request =
            ApiRequest::post(config::categories_path(group_id)).json(&NewCategory::named(name))?;
        self.conn.execute_json(request)
    }

    pub fn update(
        &self,
        group_id: &str,
        category_id: &str,
        changes: &CategoryUpdate,
    ) -> Result<Category> {
        let request =
            ApiRequest::patch(config::category_path(group_id, category_id)).json(changes)?;
        self.conn.execute_json(request)
    }

    pub fn delete(&self, group_id: &str, category_id: &str) -> Result<()> {
        self.conn
            .execute_empty(ApiRequest::delete(config::category_path(group_id, category_id)))
    }
}
