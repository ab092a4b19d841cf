//! Async wrapper around [`CashCrew`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Page loads honor the page's [`Lifetime`]: a page closed while its fetch
//! is in flight never sees the result.
//!
//! # Example
//!
//! ```no_run
//! use cashcrew_sdk::AsyncCashCrew;
//! use cashcrew_sdk::pages::GroupPage;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncCashCrew::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let groups = sdk.run(|s| s.groups().list()).await.unwrap();
//!
//!     // Load a page without blocking the event loop
//!     let mut page = GroupPage::new(groups[0].id.clone());
//!     sdk.load_group_page(&mut page).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CashCrewError, Result};
use crate::pages::{GroupFetch, GroupPage, HomePage, Lifetime, ReportsFetch, ReportsPage};
use crate::CashCrew;

// ---------------------------------------------------------------------------
// AsyncCashCrewBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCashCrew`] instance.
#[derive(Default)]
pub struct AsyncCashCrewBuilder {
    base_url: Option<String>,
    store_dir: Option<PathBuf>,
    ephemeral: bool,
    timeout: Option<Duration>,
}

impl AsyncCashCrewBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async client on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCashCrew> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CashCrew::builder().ephemeral(self.ephemeral);
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            if let Some(dir) = self.store_dir {
                builder = builder.store_dir(dir);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            Ok(AsyncCashCrew::from_sdk(builder.build()?))
        })
        .await
        .map_err(|e| CashCrewError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCashCrew
// ---------------------------------------------------------------------------

/// Async wrapper around [`CashCrew`].
///
/// `CashCrew` is `Sync`, so concurrent operations share it through an `Arc`
/// and run in parallel on the blocking pool.
#[derive(Clone)]
pub struct AsyncCashCrew {
    inner: Arc<CashCrew>,
}

impl AsyncCashCrew {
    pub fn builder() -> AsyncCashCrewBuilder {
        AsyncCashCrewBuilder::default()
    }

    /// Wrap an already built client, e.g. one with a custom transport.
    pub fn from_sdk(sdk: CashCrew) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use cashcrew_sdk::AsyncCashCrew;
    /// # async fn example() -> cashcrew_sdk::Result<()> {
    /// # let sdk = AsyncCashCrew::builder().build().await?;
    /// let me = sdk.run(|s| s.users().me()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CashCrew) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| CashCrewError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Like [`run()`](Self::run), but fails with [`CashCrewError::Cancelled`]
    /// without sending anything if `lifetime` has already ended.
    ///
    /// An operation that has started always reports its own outcome; callers
    /// check the lifetime again before writing the result anywhere.
    pub async fn run_scoped<F, T>(&self, lifetime: &Lifetime, f: F) -> Result<T>
    where
        F: FnOnce(&CashCrew) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        lifetime.check()?;
        self.run(f).await
    }

    /// Load the group list into `page`. Returns `false` if the page closed.
    pub async fn load_home_page(&self, page: &mut HomePage) -> Result<bool> {
        let lifetime = page.lifetime().clone();
        match self.run_scoped(&lifetime, |s| Ok(s.groups().list())).await {
            Ok(result) => Ok(page.apply(result)),
            Err(CashCrewError::Cancelled) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Load every slice of a group page. Returns `false` if the page closed.
    pub async fn load_group_page(&self, page: &mut GroupPage) -> Result<bool> {
        let lifetime = page.lifetime().clone();
        let group_id = page.group_id().to_string();
        let fetch = self
            .run_scoped(&lifetime, move |s| Ok(GroupFetch::run(s, &group_id)))
            .await;
        match fetch {
            Ok(fetch) => Ok(page.apply(fetch)),
            Err(CashCrewError::Cancelled) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Load a reports page. Returns `false` if the page closed.
    pub async fn load_reports_page(&self, page: &mut ReportsPage) -> Result<bool> {
        let lifetime = page.lifetime().clone();
        let group_id = page.group_id().to_string();
        let fetch = self
            .run_scoped(&lifetime, move |s| Ok(ReportsFetch::run(s, &group_id)))
            .await;
        match fetch {
            Ok(fetch) => Ok(page.apply(fetch)),
            Err(CashCrewError::Cancelled) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Access the wrapped synchronous client.
    pub fn inner(&self) -> &Arc<CashCrew> {
        &self.inner
    }
}
