//! Page view models.
//!
//! A page owns the state a renderer draws: one [`LoadState`] per
//! independently fetched slice, plus form input and inline messages. Pages
//! never render anything themselves and take the SDK by reference on every
//! call, so they can be driven from any thread or task.
//!
//! Each page owns a [`Lifetime`]. Once [`Lifetime::cancel`] has been called
//! (the page was closed), results that arrive later are dropped instead of
//! being written into the page.

pub mod add_transaction;
pub mod auth;
pub mod create_group;
pub mod group;
pub mod home;
pub mod reports;

pub use add_transaction::AddTransactionPage;
pub use auth::{LoginPage, RegisterPage};
pub use create_group::CreateGroupPage;
pub use group::{AddMemberOutcome, GroupFetch, GroupPage, TransactionRow};
pub use home::HomePage;
pub use reports::{ReportsFetch, ReportsPage};

use crate::error::{CashCrewError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// LoadState
// ---------------------------------------------------------------------------

/// Progress of one fetched slice of page state.
///
/// `Empty` means the server answered with nothing; `Failed` means it did not
/// answer successfully. Renderers that want the two to look the same can use
/// [`is_no_data`](Self::is_no_data).
#[derive(Debug)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Empty,
    Failed(CashCrewError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    /// Wrap a single-entity fetch result.
    pub fn from_item(result: Result<T>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CashCrewError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LoadState::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// True for both `Empty` and `Failed`.
    pub fn is_no_data(&self) -> bool {
        self.is_empty() || self.is_failed()
    }
}

impl<T> LoadState<Vec<T>> {
    /// Wrap a list fetch result; an empty list becomes `Empty`.
    pub fn from_list(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => LoadState::Empty,
            Ok(items) => LoadState::Loaded(items),
            Err(e) => LoadState::Failed(e),
        }
    }

    /// Loaded items, or an empty slice in any other state.
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }

    /// Append an item, turning `Empty`/`Idle` into `Loaded`.
    ///
    /// A `Failed` slice is left untouched.
    pub fn push(&mut self, item: T) {
        match self {
            LoadState::Loaded(items) => items.push(item),
            LoadState::Failed(_) => {}
            _ => *self = LoadState::Loaded(vec![item]),
        }
    }

    /// Remove items not matching `keep`; an emptied list becomes `Empty`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        if let LoadState::Loaded(items) = self {
            items.retain(keep);
            if items.is_empty() {
                *self = LoadState::Empty;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lifetime
// ---------------------------------------------------------------------------

/// Cancellation handle tied to a page.
///
/// Clones share the same flag, so a clone handed to a background fetch sees
/// the page being closed.
#[derive(Debug, Clone, Default)]
pub struct Lifetime {
    cancelled: Arc<AtomicBool>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`CashCrewError::Cancelled`] once cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CashCrewError::Cancelled)
        } else {
            Ok(())
        }
    }
}
