use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{User, UserUpdate};
use crate::transport::ApiRequest;

pub struct UserApi<'a> {
    conn: &'a Connection,
}

impl<'a> UserApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The currently logged-in user.
    pub fn me(&self) -> Result<User> {
        self.conn
            .execute_json(ApiRequest::get(config::user_path("me")))
    }

    pub fn get(&self, user_id: &str) -> Result<User> {
        self.conn
            .execute_json(ApiRequest::get(config::user_path(user_id)))
    }

    pub fn update_me(&self, changes: &UserUpdate) -> Result<User> {
        let request = ApiRequest::patch(config::user_path("me")).json(changes)?;
        self.conn.execute_json(request)
    }
}
