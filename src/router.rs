//! Mapping between URL paths and pages.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    CreateGroup,
    /// Reports, optionally for a specific group.
    Reports(Option<String>),
    Group(String),
    AddTransaction(String),
}

impl Route {
    /// Resolve a path. Unknown paths fall back to [`Route::Home`].
    ///
    /// Query strings, fragments and trailing slashes are ignored. A path
    /// with an empty segment (`/group//reports`) is unknown.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .trim_end_matches('/');
        let path = path.strip_prefix('/').unwrap_or(path);
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Route::Home;
        }

        match segments.as_slice() {
            [] | ["home"] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["create-group"] => Route::CreateGroup,
            ["reports"] => Route::Reports(None),
            ["group", id] => Route::Group(id.to_string()),
            ["group", id, "add-transaction"] => Route::AddTransaction(id.to_string()),
            ["group", id, "reports"] => Route::Reports(Some(id.to_string())),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::CreateGroup => "/create-group".to_string(),
            Route::Reports(None) => "/reports".to_string(),
            Route::Reports(Some(id)) => format!("/group/{}/reports", id),
            Route::Group(id) => format!("/group/{}", id),
            Route::AddTransaction(id) => format!("/group/{}/add-transaction", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
