#[derive(Debug, thiserror::Error)]
pub enum CashCrewError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CashCrewError {
    /// Map a non-2xx status and its already-extracted message to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => CashCrewError::Auth(message),
            403 => CashCrewError::Forbidden(message),
            404 => CashCrewError::NotFound(message),
            422 => CashCrewError::Validation(message),
            _ => CashCrewError::Api { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CashCrewError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CashCrewError::Validation(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, CashCrewError::Auth(_))
    }
}

pub type Result<T> = std::result::Result<T, CashCrewError>;
