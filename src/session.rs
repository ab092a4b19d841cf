//! Explicit session object holding the current credentials.
//!
//! A [`Session`] is created once, handed to the [`Connection`](crate::Connection)
//! and shared by every API wrapper. It is the only place credentials are read
//! or written; the backing [`SessionStore`] persists them across restarts.
//!
//! Token refresh is serialized: each successful token change bumps a
//! generation counter, and a caller that lost the race to refresh sees the
//! new generation and reuses the winner's token instead of refreshing again.

use crate::error::{CashCrewError, Result};
use crate::models::Token;
use crate::store::SessionStore;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

struct SessionState {
    token: Option<Token>,
    generation: u64,
}

pub struct Session {
    store: SessionStore,
    state: Mutex<SessionState>,
    refresh_lock: Mutex<()>,
}

impl Session {
    /// Create a session, restoring any token persisted in `store`.
    pub fn new(store: SessionStore) -> Result<Self> {
        let token = store.load_token()?;
        if token.is_some() {
            info!("restored persisted session token");
        }
        Ok(Self {
            store,
            state: Mutex::new(SessionState {
                token,
                generation: 0,
            }),
            refresh_lock: Mutex::new(()),
        })
    }

    fn state(&self) -> Result<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|_| CashCrewError::InvalidArgument("session lock poisoned".into()))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Current token, if logged in.
    pub fn token(&self) -> Option<Token> {
        self.state().ok().and_then(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Snapshot of the `Authorization` header and the generation it belongs to.
    pub fn authorization(&self) -> Result<(Option<String>, u64)> {
        let state = self.state()?;
        Ok((
            state.token.as_ref().map(Token::authorization),
            state.generation,
        ))
    }

    /// Number of token changes since this session was created.
    pub fn generation(&self) -> u64 {
        self.state().map(|s| s.generation).unwrap_or(0)
    }

    /// Install and persist a new token.
    ///
    /// If `token` carries no refresh token, the previously held one is kept.
    pub fn set_token(&self, mut token: Token) -> Result<()> {
        let mut state = self.state()?;
        if token.refresh_token.is_none() {
            token.refresh_token = state.token.as_ref().and_then(|t| t.refresh_token.clone());
        }
        self.store.save_token(&token)?;
        state.token = Some(token);
        state.generation += 1;
        Ok(())
    }

    /// Drop the in-memory and persisted credentials.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.state()?;
        self.store.clear_token()?;
        if state.token.take().is_some() {
            state.generation += 1;
        }
        Ok(())
    }

    /// Refresh the access token at most once per generation.
    ///
    /// `seen_generation` is the generation the caller's failed request was
    /// sent with. If the token already changed since then, the current token
    /// is returned without calling `exchange`. Otherwise `exchange` receives
    /// the refresh credential (the refresh token, or the expired access
    /// token when the server issued none). On failure the session is cleared.
    pub fn refresh_with<F>(&self, seen_generation: u64, exchange: F) -> Result<Token>
    where
        F: FnOnce(&str) -> Result<Token>,
    {
        let _guard = self
            .refresh_lock
            .lock()
            .map_err(|_| CashCrewError::InvalidArgument("refresh lock poisoned".into()))?;

        let credential = {
            let state = self.state()?;
            if state.generation != seen_generation {
                return state
                    .token
                    .clone()
                    .ok_or_else(|| CashCrewError::Auth("session was cleared".into()));
            }
            match state.token {
                Some(ref t) => t.refresh_token.clone().unwrap_or_else(|| t.access_token.clone()),
                None => return Err(CashCrewError::Auth("not logged in".into())),
            }
        };

        match exchange(&credential) {
            Ok(token) => {
                self.set_token(token)?;
                info!("session token refreshed");
                self.token()
                    .ok_or_else(|| CashCrewError::Auth("session was cleared".into()))
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.clear()?;
                Err(e)
            }
        }
    }
}
