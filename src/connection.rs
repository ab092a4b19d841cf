//! Authenticated request execution against the CashCrew API.
//!
//! Attaches the session's `Authorization` header to every request, maps
//! non-2xx statuses onto [`CashCrewError`], and transparently refreshes the
//! token once when an authenticated request comes back `401`.

use crate::config;
use crate::error::{CashCrewError, Result};
use crate::models::Token;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Owns the transport and the session shared by all API wrappers.
pub struct Connection {
    transport: Box<dyn Transport>,
    session: Arc<Session>,
}

impl Connection {
    pub fn new(transport: Box<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let resp = self.transport.send(request)?;
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            status = resp.status,
            "api request"
        );
        Ok(resp)
    }

    /// Send `request` with the session token attached.
    ///
    /// Requests without a token go out unauthenticated and the server
    /// decides. A `401` on an authenticated request triggers one refresh and
    /// one retry; if the refresh fails the session is cleared and the
    /// refresh error is returned.
    pub fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let (authorization, generation) = self.session.authorization()?;
        let authenticated = authorization.is_some();
        request.authorization = authorization;

        let resp = self.dispatch(&request)?;
        if resp.status != 401 || !authenticated {
            return resp.error_for_status();
        }

        let token = self
            .session
            .refresh_with(generation, |credential| self.exchange_refresh(credential))?;
        request.authorization = Some(token.authorization());
        self.dispatch(&request)?.error_for_status()
    }

    /// Send `request` without credentials and without refresh handling.
    pub fn send_anonymous(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.authorization = None;
        self.dispatch(&request)?.error_for_status()
    }

    /// Send and decode a JSON response body.
    pub fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request)?.json()
    }

    /// Send and ignore the response body (e.g. `204 No Content`).
    pub fn execute_empty(&self, request: ApiRequest) -> Result<()> {
        self.send(request).map(|_| ())
    }

    /// Exchange a refresh credential for a new token via `POST /auth/refresh`.
    ///
    /// Every rejection is reported as [`CashCrewError::Auth`].
    pub fn exchange_refresh(&self, credential: &str) -> Result<Token> {
        let request = ApiRequest::post(config::AUTH_REFRESH).query("token", credential);
        match self.send_anonymous(request) {
            Ok(resp) => resp.json(),
            Err(CashCrewError::NotFound(msg))
            | Err(CashCrewError::Validation(msg))
            | Err(CashCrewError::Forbidden(msg)) => Err(CashCrewError::Auth(msg)),
            Err(CashCrewError::Api { status, message }) if status < 500 => {
                Err(CashCrewError::Auth(message))
            }
            Err(e) => Err(e),
        }
    }
}
