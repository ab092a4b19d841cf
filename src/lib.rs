//! CashCrew SDK for Rust.
//!
//! Client for the CashCrew shared-expense API: log in, manage groups and
//! their members, record income and expenses against categories, and turn a
//! group's transactions into chart series and reports. Credentials and the
//! last known group list are persisted locally and restored on startup.
//!
//! # Quick start
//!
//! ```no_run
//! use cashcrew_sdk::CashCrew;
//!
//! let sdk = CashCrew::builder().build().unwrap();
//!
//! sdk.auth().login("anna@example.com", "secret123").unwrap();
//! let group = sdk.groups().create("Trip", "Sochi, July").unwrap();
//!
//! let transactions = sdk.transactions().list(&group.id).unwrap();
//! let categories = sdk.categories().list(&group.id).unwrap();
//! let charts = cashcrew_sdk::aggregate(&transactions, &categories);
//! ```

pub mod aggregate;
pub mod api;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod pages;
pub mod report;
pub mod router;
pub mod session;
pub mod store;
pub mod transport;
pub mod validation;

pub use aggregate::{aggregate, Aggregates, ExpensePoint, IncomeSlice};
#[cfg(feature = "async")]
pub use async_client::AsyncCashCrew;
pub use connection::Connection;
pub use error::{CashCrewError, Result};
pub use pages::{Lifetime, LoadState};
pub use report::{build_report, Report, ReportFilter};
pub use router::Route;
pub use session::Session;
pub use store::SessionStore;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CashCrewBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CashCrew`] client.
///
/// Use [`CashCrew::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CashCrewBuilder::build).
pub struct CashCrewBuilder {
    base_url: String,
    store_dir: Option<PathBuf>,
    ephemeral: bool,
    timeout: Duration,
    transport: Option<Box<dyn Transport>>,
}

impl Default for CashCrewBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            store_dir: None,
            ephemeral: false,
            timeout: config::DEFAULT_TIMEOUT,
            transport: None,
        }
    }
}

impl CashCrewBuilder {
    /// Set the API base URL, e.g. `https://cashcrew.example/api/v1`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set the directory where the session token and group snapshot live.
    ///
    /// If not set, the platform data directory is used
    /// (e.g. `~/.local/share/cashcrew` on Linux).
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the session in memory only. Nothing is read from or written to
    /// disk. Defaults to `false`.
    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom transport instead of the built-in HTTP client.
    ///
    /// `base_url` and `timeout` are ignored when a transport is supplied.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the client, restoring any persisted session token.
    pub fn build(self) -> Result<CashCrew> {
        let store = if self.ephemeral {
            SessionStore::in_memory()
        } else {
            SessionStore::new(self.store_dir)?
        };
        let session = Arc::new(Session::new(store)?);
        let transport = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&self.base_url, self.timeout)?),
        };
        Ok(CashCrew {
            conn: Connection::new(transport, session),
            base_url: self.base_url,
        })
    }
}

// ---------------------------------------------------------------------------
// CashCrew
// ---------------------------------------------------------------------------

/// The main entry point for the CashCrew SDK.
///
/// Wraps a [`Connection`] (which owns the transport and the [`Session`]) and
/// exposes the API groups as lightweight borrowing wrappers. `CashCrew` is
/// `Send + Sync`; pages fetch independent slices from several threads at once.
pub struct CashCrew {
    conn: Connection,
    base_url: String,
}

impl CashCrew {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CashCrewBuilder {
        CashCrewBuilder::default()
    }

    // -- API accessors -----------------------------------------------------

    /// Login, registration, token refresh and logout.
    pub fn auth(&self) -> api::AuthApi<'_> {
        api::AuthApi::new(&self.conn)
    }

    /// Groups and their members.
    pub fn groups(&self) -> api::GroupApi<'_> {
        api::GroupApi::new(&self.conn)
    }

    pub fn categories(&self) -> api::CategoryApi<'_> {
        api::CategoryApi::new(&self.conn)
    }

    pub fn transactions(&self) -> api::TransactionApi<'_> {
        api::TransactionApi::new(&self.conn)
    }

    pub fn users(&self) -> api::UserApi<'_> {
        api::UserApi::new(&self.conn)
    }

    // -- Session -----------------------------------------------------------

    pub fn session(&self) -> &Arc<Session> {
        self.conn.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.conn.session().is_authenticated()
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CashCrew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self
            .conn
            .session()
            .store()
            .dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        write!(
            f,
            "CashCrew(base_url={}, store={}, authenticated={})",
            self.base_url,
            store,
            self.is_authenticated()
        )
    }
}
