//! Group detail: members, categories, transactions and their charts.
//!
//! The three slices are fetched concurrently and land independently: a
//! failed category fetch still shows the group and its transactions, with
//! empty category labels.

use crate::aggregate::{aggregate, category_names_by_id, Aggregates};
use crate::error::{CashCrewError, Result};
use crate::models::{Category, Group, Transaction, TransactionType};
use crate::pages::{Lifetime, LoadState};
use crate::validation::validate_member_email;
use crate::CashCrew;
use std::thread;
use tracing::debug;

pub const MSG_MEMBER_ADDED: &str = "User added";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email";
pub const MSG_UNKNOWN_USER: &str = "No user with this email";
pub const MSG_ADD_FAILED: &str = "Could not add member";

/// Raw results of the three group page fetches.
#[derive(Debug)]
pub struct GroupFetch {
    pub group: Result<Group>,
    pub categories: Result<Vec<Category>>,
    pub transactions: Result<Vec<Transaction>>,
}

impl GroupFetch {
    /// Run the group, category and transaction fetches concurrently.
    pub fn run(sdk: &CashCrew, group_id: &str) -> Self {
        thread::scope(|s| {
            let categories = s.spawn(|| sdk.categories().list(group_id));
            let transactions = s.spawn(|| sdk.transactions().list(group_id));
            let group = sdk.groups().get(group_id);
            GroupFetch {
                group,
                categories: join(categories),
                transactions: join(transactions),
            }
        })
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| CashCrewError::InvalidArgument("fetch thread panicked".into()))?
}

/// One line of the transaction table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionType,
    /// Category name, empty when the id does not resolve.
    pub category: String,
    /// Author email, empty when the author is not a listed member.
    pub author: String,
}

#[derive(Debug)]
pub enum AddMemberOutcome {
    Added,
    /// Rejected locally; no request was sent.
    InvalidEmail,
    UnknownUser,
    Failed(CashCrewError),
}

// ---------------------------------------------------------------------------
// GroupPage
// ---------------------------------------------------------------------------

pub struct GroupPage {
    group_id: String,
    pub group: LoadState<Group>,
    pub categories: LoadState<Vec<Category>>,
    pub transactions: LoadState<Vec<Transaction>>,
    /// Inline message under the add-member field.
    pub member_message: Option<String>,
    lifetime: Lifetime,
}

impl GroupPage {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group: LoadState::Idle,
            categories: LoadState::Idle,
            transactions: LoadState::Idle,
            member_message: None,
            lifetime: Lifetime::new(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    pub fn unmount(&self) {
        self.lifetime.cancel();
    }

    /// Fetch every slice. Returns `false` if the page was closed first.
    pub fn load(&mut self, sdk: &CashCrew) -> bool {
        self.group = LoadState::Loading;
        self.categories = LoadState::Loading;
        self.transactions = LoadState::Loading;
        let fetch = GroupFetch::run(sdk, &self.group_id);
        self.apply(fetch)
    }

    /// Apply finished fetches unless the page was closed.
    pub fn apply(&mut self, fetch: GroupFetch) -> bool {
        if self.lifetime.is_cancelled() {
            debug!(group_id = %self.group_id, "dropping results for closed group page");
            return false;
        }
        self.group = LoadState::from_item(fetch.group);
        self.categories = LoadState::from_list(fetch.categories);
        self.transactions = LoadState::from_list(fetch.transactions);
        true
    }

    /// Chart series derived from whatever is loaded right now.
    pub fn aggregates(&self) -> Aggregates {
        aggregate(self.transactions.items(), self.categories.items())
    }

    /// Transaction table rows with category and author labels resolved.
    pub fn rows(&self) -> Vec<TransactionRow> {
        let names = category_names_by_id(self.categories.items());
        let group = self.group.loaded();
        self.transactions
            .items()
            .iter()
            .map(|t| TransactionRow {
                id: t.id.clone(),
                date: t.date.clone(),
                description: t.description.clone(),
                amount: t.amount,
                kind: t.kind,
                category: names
                    .get(t.category_id.as_str())
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                author: group
                    .and_then(|g| g.member(&t.user_id))
                    .map(|m| m.email.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Invite a user by email, then refetch the group to show them.
    ///
    /// A malformed email is rejected without touching the network.
    pub fn add_member(&mut self, sdk: &CashCrew, email: &str) -> AddMemberOutcome {
        let email = match validate_member_email(email) {
            Ok(email) => email,
            Err(_) => {
                self.member_message = Some(MSG_INVALID_EMAIL.to_string());
                return AddMemberOutcome::InvalidEmail;
            }
        };

        let outcome = match sdk.groups().add_member(&self.group_id, &email) {
            Ok(_) => {
                let refreshed = sdk.groups().get(&self.group_id);
                if !self.lifetime.is_cancelled() {
                    self.group = LoadState::from_item(refreshed);
                }
                AddMemberOutcome::Added
            }
            Err(e) if e.is_validation() => AddMemberOutcome::UnknownUser,
            Err(e) => AddMemberOutcome::Failed(e),
        };

        self.member_message = Some(
            match outcome {
                AddMemberOutcome::Added => MSG_MEMBER_ADDED,
                AddMemberOutcome::UnknownUser => MSG_UNKNOWN_USER,
                _ => MSG_ADD_FAILED,
            }
            .to_string(),
        );
        outcome
    }
}
