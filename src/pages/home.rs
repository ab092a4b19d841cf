//! Group list: load, create, delete.

use crate::error::Result;
use crate::models::Group;
use crate::pages::{Lifetime, LoadState};
use crate::validation::GroupForm;
use crate::CashCrew;
use tracing::warn;

pub struct HomePage {
    pub groups: LoadState<Vec<Group>>,
    lifetime: Lifetime,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            groups: LoadState::Idle,
            lifetime: Lifetime::new(),
        }
    }

    /// Start from the persisted group snapshot, if one exists.
    ///
    /// A missing or unreadable snapshot leaves the list `Idle`.
    pub fn from_snapshot(sdk: &CashCrew) -> Self {
        let mut page = Self::new();
        match sdk.groups().snapshot() {
            Ok(Some(groups)) => page.groups = LoadState::from_list(Ok(groups)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "ignoring unreadable group snapshot"),
        }
        page
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Close the page; later results are dropped.
    pub fn unmount(&self) {
        self.lifetime.cancel();
    }

    /// Fetch the group list. Returns `false` if the page was closed first.
    pub fn load(&mut self, sdk: &CashCrew) -> bool {
        self.groups = LoadState::Loading;
        let result = sdk.groups().list();
        self.apply(result)
    }

    /// Apply a finished group-list fetch unless the page was closed.
    pub fn apply(&mut self, result: Result<Vec<Group>>) -> bool {
        if self.lifetime.is_cancelled() {
            return false;
        }
        self.groups = LoadState::from_list(result);
        true
    }

    /// Validate the form and create a group, appending it to the list.
    ///
    /// A page closed while the request was in flight still returns the
    /// created group but leaves its list untouched.
    pub fn create_group(&mut self, sdk: &CashCrew, form: &GroupForm) -> Result<Group> {
        let (name, description) = form.validate()?;
        let group = sdk.groups().create(&name, &description)?;
        if !self.lifetime.is_cancelled() {
            self.groups.push(group.clone());
        }
        Ok(group)
    }

    /// Remove a group from the list at once, then delete it on the server.
    ///
    /// If the server rejects the delete, the group is put back where it was.
    pub fn delete_group(&mut self, sdk: &CashCrew, group_id: &str) -> Result<()> {
        let removed = self
            .groups
            .items()
            .iter()
            .position(|g| g.id == group_id)
            .map(|i| (i, self.groups.items()[i].clone()));
        self.groups.retain(|g| g.id != group_id);

        match sdk.groups().delete(group_id) {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some((index, group)) = removed {
                    if !self.lifetime.is_cancelled() {
                        self.restore(index, group);
                    }
                }
                Err(e)
            }
        }
    }

    fn restore(&mut self, index: usize, group: Group) {
        match self.groups.loaded_mut() {
            Some(items) => items.insert(index.min(items.len()), group),
            None => self.groups.push(group),
        }
    }
}
