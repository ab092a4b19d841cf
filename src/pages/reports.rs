//! Reports for one group, with date range and category filters.
//!
//! The raw transactions, categories and members are kept after loading, so
//! changing the filter recomputes the report without another request. Only
//! a failed transaction fetch fails the page; missing categories or members
//! just leave their breakdowns unlabeled. [`ReportsPage::retry`] reloads.

use crate::error::{CashCrewError, Result};
use crate::models::{Category, Group, Member, Transaction};
use crate::pages::{Lifetime, LoadState};
use crate::report::{build_report, Report, ReportFilter};
use crate::CashCrew;
use std::thread;
use tracing::warn;

/// Raw results of the report fetches.
#[derive(Debug)]
pub struct ReportsFetch {
    pub transactions: Result<Vec<Transaction>>,
    pub categories: Result<Vec<Category>>,
    pub group: Result<Group>,
}

impl ReportsFetch {
    pub fn run(sdk: &CashCrew, group_id: &str) -> Self {
        thread::scope(|s| {
            let categories = s.spawn(|| sdk.categories().list(group_id));
            let group = s.spawn(|| sdk.groups().get(group_id));
            let transactions = sdk.transactions().list(group_id);
            ReportsFetch {
                transactions,
                categories: joined(categories.join()),
                group: joined(group.join()),
            }
        })
    }
}

fn joined<T>(r: std::thread::Result<Result<T>>) -> Result<T> {
    r.unwrap_or_else(|_| Err(CashCrewError::InvalidArgument("fetch thread panicked".into())))
}

pub struct ReportsPage {
    group_id: String,
    pub filter: ReportFilter,
    pub report: LoadState<Report>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    members: Vec<Member>,
    lifetime: Lifetime,
}

impl ReportsPage {
    pub fn new(group_id: impl Into<String>, filter: ReportFilter) -> Self {
        Self {
            group_id: group_id.into(),
            filter,
            report: LoadState::Idle,
            transactions: Vec::new(),
            categories: Vec::new(),
            members: Vec::new(),
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

    pub fn load(&mut self, sdk: &CashCrew) -> bool {
        self.report = LoadState::Loading;
        let fetch = ReportsFetch::run(sdk, &self.group_id);
        self.apply(fetch)
    }

    /// Reload after a failure.
    pub fn retry(&mut self, sdk: &CashCrew) -> bool {
        self.load(sdk)
    }

    pub fn apply(&mut self, fetch: ReportsFetch) -> bool {
        if self.lifetime.is_cancelled() {
            return false;
        }
        self.categories = fetch.categories.unwrap_or_else(|e| {
            warn!(error = %e, "report categories unavailable");
            Vec::new()
        });
        self.members = fetch.group.map(|g| g.members).unwrap_or_else(|e| {
            warn!(error = %e, "report members unavailable");
            Vec::new()
        });
        match fetch.transactions {
            Ok(transactions) => {
                self.transactions = transactions;
                self.recompute();
            }
            Err(e) => {
                self.transactions.clear();
                self.report = LoadState::Failed(e);
            }
        }
        true
    }

    /// Change the filter and recompute from the loaded data.
    pub fn set_filter(&mut self, filter: ReportFilter) {
        self.filter = filter;
        if self.report.is_loaded() || self.report.is_empty() {
            self.recompute();
        }
    }

    /// Category names to offer in the filter picker.
    pub fn category_options(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    fn recompute(&mut self) {
        let report = build_report(
            &self.transactions,
            &self.categories,
            &self.members,
            &self.filter,
        );
        self.report = if report.transactions.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loaded(report)
        };
    }
}
