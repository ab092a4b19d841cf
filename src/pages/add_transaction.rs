//! Add-transaction form with inline category creation.

use crate::error::{CashCrewError, Result};
use crate::models::{Category, NewTransaction, Transaction};
use crate::pages::{Lifetime, LoadState};
use crate::router::Route;
use crate::validation::{category_name, FormErrors, TransactionForm};
use crate::CashCrew;
use chrono::{SecondsFormat, Utc};

/// Current UTC time in the `2024-01-01T12:00:00.000Z` form the backend stores.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct AddTransactionPage {
    group_id: String,
    pub categories: LoadState<Vec<Category>>,
    pub form: TransactionForm,
    pub errors: FormErrors,
    lifetime: Lifetime,
}

impl AddTransactionPage {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            categories: LoadState::Idle,
            form: TransactionForm::default(),
            errors: FormErrors::default(),
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
        self.categories = LoadState::Loading;
        let result = sdk.categories().list(&self.group_id);
        if self.lifetime.is_cancelled() {
            return false;
        }
        self.categories = LoadState::from_list(result);
        true
    }

    /// Create a category from the inline field and add it to the picker.
    ///
    /// Blank names are ignored and return `Ok(None)` without a request. If
    /// the page closed meanwhile the category is returned but not added.
    pub fn add_category(&mut self, sdk: &CashCrew, raw_name: &str) -> Result<Option<Category>> {
        let Some(name) = category_name(raw_name) else {
            return Ok(None);
        };
        let category = sdk.categories().create(&self.group_id, &name)?;
        if !self.lifetime.is_cancelled() {
            self.categories.push(category.clone());
        }
        Ok(Some(category))
    }

    /// Validate and submit, stamping the transaction with the current time.
    ///
    /// On success returns the route of the group page to go back to.
    pub fn submit(&mut self, sdk: &CashCrew) -> Result<Route> {
        self.submit_dated(sdk, now_timestamp()).map(|_| Route::Group(self.group_id.clone()))
    }

    /// Validate and submit with an explicit `date`.
    pub fn submit_dated(&mut self, sdk: &CashCrew, date: String) -> Result<Transaction> {
        let amount = match self.form.validate() {
            Ok(amount) => {
                self.errors = FormErrors::default();
                amount
            }
            Err(errors) => {
                self.errors = errors.clone();
                return Err(CashCrewError::from(errors));
            }
        };

        let data = NewTransaction {
            amount,
            kind: self.form.kind,
            description: self.form.description.trim().to_string(),
            date,
            category_id: self.form.category_id.clone(),
            group_id: self.group_id.clone(),
        };
        sdk.transactions().create(&data)
    }
}
