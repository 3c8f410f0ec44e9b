//! Client error taxonomy.

use thiserror::Error;

use ems_auth::StoreError;
use ems_core::DomainError;

/// Failure of an API call or of preparing one.
///
/// Unlike a bare "request failed", 401 and 403 stay distinguishable from
/// transient faults so the user can be told to sign in again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// 401, or no credential held when one was required.
    #[error("not signed in or session expired")]
    Unauthenticated,

    /// 403.
    #[error("forbidden")]
    Forbidden,

    /// Any other 4xx.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// 5xx.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not encode request: {0}")]
    Encode(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("credential storage failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Validation(#[from] DomainError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl ApiError {
    /// Map a non-success HTTP status (plus its body) to an error.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = server_message(body);
        match status {
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden,
            400..=499 => ApiError::Rejected { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Forbidden)
    }

    /// Short, human-readable status line for the view.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Your session has expired. Please log in again.".to_string(),
            ApiError::Forbidden => "You are not allowed to do that.".to_string(),
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected { .. } => "The request was rejected.".to_string(),
            ApiError::Server { .. } => "The server ran into a problem. Try again later.".to_string(),
            ApiError::Network(_) => "Could not reach the server.".to_string(),
            ApiError::Encode(_) => "Could not prepare the request.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Storage(_) => "Could not store your session in this browser.".to_string(),
            ApiError::Validation(DomainError::Validation(msg)) => msg.clone(),
            ApiError::Validation(other) => other.to_string(),
        }
    }
}

/// Pull `message` (or `error`) out of a JSON error body, falling back to text.
fn server_message(body: &[u8]) -> String {
    const MAX_LEN: usize = 200;

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    String::from_utf8_lossy(body).trim().chars().take(MAX_LEN).collect()
}
