use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Endpoint roots, relative to the base URL.
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const GROUPS: &str = "/groups";
pub const TRANSACTIONS: &str = "/transactions";
pub const USERS: &str = "/users";

// Persisted client state, one file per key.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_TOKEN_TYPE: &str = "token_type";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const KEY_GROUPS: &str = "groups.json";

pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

pub fn group_path(group_id: &str) -> String {
    format!("{}/{}", GROUPS, group_id)
}

pub fn members_path(group_id: &str) -> String {
    format!("{}/{}/members", GROUPS, group_id)
}

pub fn member_path(group_id: &str, user_id: &str) -> String {
    format!("{}/{}/members/{}", GROUPS, group_id, user_id)
}

pub fn categories_path(group_id: &str) -> String {
    format!("{}/{}/categories", GROUPS, group_id)
}

pub fn category_path(group_id: &str, category_id: &str) -> String {
    format!("{}/{}/categories/{}", GROUPS, group_id, category_id)
}

pub fn transaction_path(tx_id: &str) -> String {
    format!("{}/{}", TRANSACTIONS, tx_id)
}

pub fn user_path(user_id: &str) -> String {
    format!("{}/{}", USERS, user_id)
}

pub fn default_store_dir() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        dir.join("cashcrew")
    } else {
        PathBuf::from(".cashcrew")
    }
}
