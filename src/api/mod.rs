//! API wrappers for the CashCrew SDK.
//!
//! Each module provides a struct that borrows from a [`Connection`](crate::connection::Connection)
//! and exposes one method per REST endpoint, returning typed models in a
//! `Result<T>`. Nothing is swallowed: callers decide how to present failures.

pub mod auth;
pub mod categories;
pub mod groups;
pub mod transactions;
pub mod users;

pub use auth::AuthApi;
pub use categories::CategoryApi;
pub use groups::GroupApi;
pub use transactions::TransactionApi;
pub use users::UserApi;
