//! Login and registration forms.
//!
//! Both forms keep a single inline error line. Local validation failures
//! show the first offending field's message. A rejected login shows a fixed
//! message; a rejected registration appends the server's reason (e.g. a
//! duplicate email).

use crate::error::{CashCrewError, Result};
use crate::router::Route;
use crate::validation::{FormErrors, LoginForm, RegisterForm};
use crate::CashCrew;

pub const MSG_LOGIN_REJECTED: &str = "Wrong email or password";
pub const MSG_LOGIN_FAILED: &str = "Login failed, try again";
pub const MSG_REGISTER_REJECTED: &str = "Registration failed";

fn first_message(errors: &FormErrors) -> Option<String> {
    errors.fields().next().map(|(_, msg)| msg.to_string())
}

#[derive(Default)]
pub struct LoginPage {
    pub form: LoginForm,
    pub error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in; on success returns the route to land on.
    pub fn submit(&mut self, sdk: &CashCrew) -> Result<Route> {
        if let Err(errors) = self.form.validate() {
            self.error = first_message(&errors);
            return Err(CashCrewError::from(errors));
        }
        match sdk.auth().login(self.form.email.trim(), &self.form.password) {
            Ok(_) => {
                self.error = None;
                Ok(Route::Home)
            }
            Err(e) => {
                self.error = Some(
                    if e.is_auth() {
                        MSG_LOGIN_REJECTED
                    } else {
                        MSG_LOGIN_FAILED
                    }
                    .to_string(),
                );
                Err(e)
            }
        }
    }
}

#[derive(Default)]
pub struct RegisterPage {
    pub form: RegisterForm,
    pub error: Option<String>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register; on success sends the user to the login page.
    pub fn submit(&mut self, sdk: &CashCrew) -> Result<Route> {
        if let Err(errors) = self.form.validate() {
            self.error = first_message(&errors);
            return Err(CashCrewError::from(errors));
        }
        let result = sdk.auth().register(
            self.form.email.trim(),
            &self.form.password,
            self.form.name.trim(),
        );
        match result {
            Ok(_) => {
                self.error = None;
                Ok(Route::Login)
            }
            Err(e) => {
                self.error = Some(match e {
                    CashCrewError::Auth(ref detail) if !detail.is_empty() => {
                        format!("{}: {}", MSG_REGISTER_REJECTED, detail)
                    }
                    _ => MSG_REGISTER_REJECTED.to_string(),
                });
                Err(e)
            }
        }
    }
}
