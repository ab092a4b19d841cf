//! Shared test fixtures for the CashCrew SDK integration tests.
//!
//! Provides a scripted [`MockTransport`] that records every request, SDK
//! constructors wired to it, and JSON/model fixtures for groups, members,
//! categories and transactions.

#![allow(dead_code)]

use cashcrew_sdk::models::{Category, Member, Transaction, TransactionType};
use cashcrew_sdk::transport::{ApiRequest, ApiResponse, Method, Transport};
use cashcrew_sdk::{CashCrew, CashCrewError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

enum Reply {
    Response(ApiResponse),
    IoFailure,
}

struct Scripted {
    method: Method,
    path: String,
    authorization: Option<String>,
    /// Replies are consumed in order; the last one repeats.
    replies: VecDeque<Reply>,
}

/// In-memory transport answering from scripted routes.
///
/// Unmatched requests get `404 {"detail": "Not Found"}`.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: Method, path: &str, authorization: Option<&str>, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        let existing = routes.iter_mut().find(|r| {
            r.method == method && r.path == path && r.authorization.as_deref() == authorization
        });
        match existing {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Scripted {
                method,
                path: path.to_string(),
                authorization: authorization.map(str::to_string),
                replies: VecDeque::from([reply]),
            }),
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            None,
            Reply::Response(ApiResponse::new(status, body.to_string())),
        );
    }

    /// Like [`on`](Self::on), but only for requests carrying `authorization`.
    pub fn on_auth(&self, method: Method, path: &str, authorization: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Some(authorization),
            Reply::Response(ApiResponse::new(status, body.to_string())),
        );
    }

    /// Answer `method path` with an empty body (e.g. `204`).
    pub fn on_empty(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, None, Reply::Response(ApiResponse::new(status, "")));
    }

    /// Fail `method path` at the transport level.
    pub fn fail(&self, method: Method, path: &str) {
        self.push(method, path, None, Reply::IoFailure);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> cashcrew_sdk::Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let matches = |r: &Scripted| r.method == request.method && r.path == request.path;
        let index = routes
            .iter()
            .position(|r| matches(r) && r.authorization.is_some() && r.authorization == request.authorization)
            .or_else(|| routes.iter().position(|r| matches(r) && r.authorization.is_none()));

        let Some(index) = index else {
            return Ok(ApiResponse::new(404, json!({"detail": "Not Found"}).to_string()));
        };
        let route = &mut routes[index];
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().map(|r| match r {
                Reply::Response(resp) => Reply::Response(resp.clone()),
                Reply::IoFailure => Reply::IoFailure,
            })
        };
        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::IoFailure) | None => Err(CashCrewError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// SDK constructors
// ---------------------------------------------------------------------------

/// In-memory SDK backed by `mock`.
pub fn sdk(mock: &Arc<MockTransport>) -> CashCrew {
    init_tracing();
    CashCrew::builder()
        .ephemeral(true)
        .transport(mock.clone())
        .build()
        .unwrap()
}

/// SDK persisting its session in `dir`, backed by `mock`.
pub fn sdk_in(dir: &Path, mock: &Arc<MockTransport>) -> CashCrew {
    init_tracing();
    CashCrew::builder()
        .store_dir(dir)
        .transport(mock.clone())
        .build()
        .unwrap()
}

/// SDK already holding `access_token`.
pub fn logged_in_sdk(mock: &Arc<MockTransport>, access_token: &str) -> CashCrew {
    let sdk = sdk(mock);
    sdk.session()
        .set_token(cashcrew_sdk::models::Token {
            access_token: access_token.to_string(),
            token_type: "bearer".to_string(),
            refresh_token: None,
        })
        .unwrap();
    sdk
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// JSON fixtures
// ---------------------------------------------------------------------------

pub fn member_json(id: &str, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "role": "user",
        "created_at": "2025-06-01T10:00:00",
        "updated_at": "2025-06-01T10:00:00",
        "is_active": true,
        "deleted_at": null
    })
}

pub fn group_json(id: &str, name: &str, members: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "owner_id": "user-1",
        "created_at": "2025-06-01T10:00:00",
        "updated_at": "2025-06-01T10:00:00",
        "members": members
    })
}

pub fn category_json(id: &str, name: &str, group_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "icon": null,
        "group_id": group_id,
        "created_at": "2025-06-01T10:00:00"
    })
}

pub fn tx_json(id: &str, kind: &str, amount: f64, date: &str, category_id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "type": kind,
        "description": format!("tx {}", id),
        "date": date,
        "category_id": category_id,
        "group_id": "g1",
        "user_id": user_id,
        "created_at": "2025-06-01T10:00:00",
        "updated_at": "2025-06-01T10:00:00"
    })
}

pub fn token_json(access_token: &str) -> Value {
    json!({"access_token": access_token, "token_type": "bearer"})
}

pub fn user_json(id: &str, name: &str, email: &str) -> Value {
    member_json(id, name, email)
}

// ---------------------------------------------------------------------------
// Model fixtures
// ---------------------------------------------------------------------------

pub fn category(id: &str, name: &str) -> Category {
    serde_json::from_value(category_json(id, name, "g1")).unwrap()
}

pub fn member(id: &str, name: &str, email: &str) -> Member {
    serde_json::from_value(member_json(id, name, email)).unwrap()
}

pub fn tx(kind: TransactionType, amount: f64, date: &str, category_id: &str) -> Transaction {
    tx_by(kind, amount, date, category_id, "user-1")
}

pub fn tx_by(kind: TransactionType, amount: f64, date: &str, category_id: &str, user_id: &str) -> Transaction {
    Transaction {
        id: format!("tx-{}-{}-{}", kind, date, amount),
        amount,
        kind,
        description: String::new(),
        date: date.to_string(),
        category_id: category_id.to_string(),
        group_id: "g1".to_string(),
        user_id: user_id.to_string(),
        created_at: "2025-06-01T10:00:00".to_string(),
        updated_at: "2025-06-01T10:00:00".to_string(),
    }
}
