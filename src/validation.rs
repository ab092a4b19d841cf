//! Client-side form validation.
//!
//! Every form is checked before any request is issued; a form that fails
//! validation never reaches the network.

use crate::error::CashCrewError;
use crate::models::TransactionType;
use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose email check: `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// FormErrors
// ---------------------------------------------------------------------------

/// Per-field messages from a failed validation, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<FormErrors> for CashCrewError {
    fn from(errors: FormErrors) -> Self {
        CashCrewError::Validation(errors.to_string())
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if !is_valid_email(self.email.trim()) {
            errors.add("email", "Enter a valid email");
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        errors.finish(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "Enter your name");
        }
        if !is_valid_email(self.email.trim()) {
            errors.add("email", "Enter a valid email");
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        errors.finish(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
}

impl GroupForm {
    /// Returns the trimmed name and description.
    pub fn validate(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::default();
        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Enter a group name");
        }
        errors.finish((name.to_string(), self.description.trim().to_string()))
    }
}

/// Returns the trimmed email for the add-member form.
pub fn validate_member_email(email: &str) -> Result<String, FormErrors> {
    let mut errors = FormErrors::default();
    let email = email.trim();
    if !is_valid_email(email) {
        errors.add("email", "Enter a valid email");
    }
    errors.finish(email.to_string())
}

/// Returns the trimmed name for the inline add-category form, `None` when blank.
pub fn category_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub category_id: String,
    /// Raw text from the amount input.
    pub amount: String,
    pub description: String,
    pub kind: TransactionType,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            category_id: String::new(),
            amount: String::new(),
            description: String::new(),
            kind: TransactionType::Expense,
        }
    }
}

impl TransactionForm {
    /// Returns the parsed, strictly positive amount.
    pub fn validate(&self) -> Result<f64, FormErrors> {
        let mut errors = FormErrors::default();
        if self.category_id.is_empty() {
            errors.add("category", "Choose a category");
        }
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0);
        if amount.is_none() {
            errors.add("amount", "Enter a valid amount");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Enter a description");
        }
        errors.finish(amount.unwrap_or_default())
    }
}
