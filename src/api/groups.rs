//! Group CRUD and membership management.
//!
//! Listing, creating and deleting groups also keeps the persisted group
//! snapshot in step, so a restarted client can render the last known list
//! before the first fetch completes. Snapshot write failures are logged and
//! never fail the API call itself.

use crate::config;
use crate::connection::Connection;
use crate::error::{CashCrewError, Result};
use crate::models::{AddMember, Group, GroupRole, GroupUpdate, Membership, NewGroup};
use crate::transport::ApiRequest;
use tracing::warn;

// ---------------------------------------------------------------------------
// GroupApi
// ---------------------------------------------------------------------------

pub struct GroupApi<'a> {
    conn: &'a Connection,
}

impl<'a> GroupApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List the groups the current user belongs to.
    pub fn list(&self) -> Result<Vec<Group>> {
        let groups: Vec<Group> = self.conn.execute_json(ApiRequest::get(config::GROUPS))?;
        self.write_snapshot(&groups);
        Ok(groups)
    }

    /// Get a single group, including its member list.
    pub fn get(&self, group_id: &str) -> Result<Group> {
        self.conn
            .execute_json(ApiRequest::get(config::group_path(group_id)))
    }

    /// Create a group owned by the current user.
    pub fn create(&self, name: &str, description: &str) -> Result<Group> {
        let body = NewGroup {
            name: name.to_string(),
            description: description.to_string(),
        };
        let group: Group = self
            .conn
            .execute_json(ApiRequest::post(config::GROUPS).json(&body)?)?;
        self.update_snapshot(|groups| groups.push(group.clone()));
        Ok(group)
    }

    pub fn update(&self, group_id: &str, changes: &GroupUpdate) -> Result<Group> {
        let group: Group = self
            .conn
            .execute_json(ApiRequest::patch(config::group_path(group_id)).json(changes)?)?;
        self.update_snapshot(|groups| {
            if let Some(slot) = groups.iter_mut().find(|g| g.id == group.id) {
                *slot = group.clone();
            }
        });
        Ok(group)
    }

    /// Delete (deactivate) a group.
    pub fn delete(&self, group_id: &str) -> Result<()> {
        self.conn
            .execute_empty(ApiRequest::delete(config::group_path(group_id)))?;
        self.update_snapshot(|groups| groups.retain(|g| g.id != group_id));
        Ok(())
    }

    /// Add the user registered under `email` to a group.
    ///
    /// An email that does not resolve to a known user fails with
    /// [`CashCrewError::Validation`].
    pub fn add_member(&self, group_id: &str, email: &str) -> Result<Membership> {
        self.add_member_with_role(group_id, email, None)
    }

    pub fn add_member_with_role(
        &self,
        group_id: &str,
        email: &str,
        role: Option<GroupRole>,
    ) -> Result<Membership> {
        let body = AddMember {
            email: email.to_string(),
            role,
        };
        let request = ApiRequest::post(config::members_path(group_id)).json(&body)?;
        match self.conn.execute_json(request) {
            // Some backend versions answer 404 for an unknown member email.
            Err(CashCrewError::NotFound(msg)) if msg.eq_ignore_ascii_case("user not found") => {
                Err(CashCrewError::Validation(msg))
            }
            other => other,
        }
    }

    /// Membership records of a group. User details live on [`Group::members`].
    pub fn members(&self, group_id: &str) -> Result<Vec<Membership>> {
        self.conn
            .execute_json(ApiRequest::get(config::members_path(group_id)))
    }

    pub fn remove_member(&self, group_id: &str, user_id: &str) -> Result<()> {
        self.conn
            .execute_empty(ApiRequest::delete(config::member_path(group_id, user_id)))
    }

    pub fn change_member_role(
        &self,
        group_id: &str,
        user_id: &str,
        role: GroupRole,
    ) -> Result<Membership> {
        let request =
            ApiRequest::patch(config::member_path(group_id, user_id)).query("new_role", role.as_str());
        self.conn.execute_json(request)
    }

    // -- Snapshot ----------------------------------------------------------

    /// The last persisted group list, if any.
    pub fn snapshot(&self) -> Result<Option<Vec<Group>>> {
        self.conn.session().store().load_groups()
    }

    fn write_snapshot(&self, groups: &[Group]) {
        if let Err(e) = self.conn.session().store().save_groups(groups) {
            warn!(error = %e, "failed to persist group snapshot");
        }
    }

    fn update_snapshot<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<Group>),
    {
        let mut groups = self.snapshot().ok().flatten().unwrap_or_default();
        f(&mut groups);
        self.write_snapshot(&groups);
    }
}
