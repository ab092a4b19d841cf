//! Login, registration and token refresh.

use crate::config;
use crate::connection::Connection;
use crate::error::{CashCrewError, Result};
use crate::models::{NewUser, Token, User};
use crate::transport::ApiRequest;
use tracing::info;

/// Any client-side rejection from an auth endpoint is an auth failure.
fn into_auth_error(err: CashCrewError) -> CashCrewError {
    match err {
        CashCrewError::NotFound(msg)
        | CashCrewError::Validation(msg)
        | CashCrewError::Forbidden(msg) => CashCrewError::Auth(msg),
        CashCrewError::Api { status, message } if status < 500 => CashCrewError::Auth(message),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// AuthApi
// ---------------------------------------------------------------------------

pub struct AuthApi<'a> {
    conn: &'a Connection,
}

impl<'a> AuthApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Log in with email and password.
    ///
    /// Credentials are posted form-encoded (`username`, `password`). On
    /// success the token is installed in the session and persisted.
    pub fn login(&self, email: &str, password: &str) -> Result<Token> {
        let request = ApiRequest::post(config::AUTH_LOGIN)
            .form(&[("username", email), ("password", password)]);
        let token: Token = self
            .conn
            .send_anonymous(request)
            .map_err(into_auth_error)?
            .json()?;
        self.conn.session().set_token(token.clone())?;
        info!(email, "logged in");
        Ok(token)
    }

    /// Register a new account. Does not log in.
    pub fn register(&self, email: &str, password: &str, name: &str) -> Result<User> {
        let body = NewUser {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let request = ApiRequest::post(config::AUTH_REGISTER).json(&body)?;
        let user: User = self
            .conn
            .send_anonymous(request)
            .map_err(into_auth_error)?
            .json()?;
        info!(email, "registered");
        Ok(user)
    }

    /// Exchange `token` for a fresh access token.
    ///
    /// On failure the stored credentials are cleared before the error is
    /// returned.
    pub fn refresh_token(&self, token: &str) -> Result<Token> {
        match self.conn.exchange_refresh(token) {
            Ok(fresh) => {
                self.conn.session().set_token(fresh.clone())?;
                info!("token refreshed");
                Ok(fresh)
            }
            Err(e) => {
                self.conn.session().clear()?;
                Err(e)
            }
        }
    }

    /// Forget the session token and the cached group list.
    pub fn logout(&self) -> Result<()> {
        self.conn.session().clear()?;
        self.conn.session().store().remove(config::KEY_GROUPS)?;
        info!("logged out");
        Ok(())
    }
}
