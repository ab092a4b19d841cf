use crate::error::{CashCrewError, Result};
use crate::models::Group;
use crate::router::Route;
use crate::validation::{FormErrors, GroupForm};
use crate::CashCrew;

/// Create-group form.
#[derive(Default)]
pub struct CreateGroupPage {
    pub form: GroupForm,
    pub errors: FormErrors,
    pub created: Option<Group>,
}

impl CreateGroupPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.form.name.trim().is_empty()
    }

    /// Validate and create the group; returns the new group's route.
    pub fn submit(&mut self, sdk: &CashCrew) -> Result<Route> {
        let (name, description) = match self.form.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(CashCrewError::from(errors));
            }
        };
        self.errors = FormErrors::default();
        let group = sdk.groups().create(&name, &description)?;
        let route = Route::Group(group.id.clone());
        self.created = Some(group);
        Ok(route)
    }
}
