use thiserror::Error;

/// Failure of a Resource API call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No valid session (HTTP 401).
    #[error("not logged in")]
    Unauthorized,
    /// The session lacks the role the endpoint requires (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid API base url {0:?}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Build the error for a non-success HTTP status and its (possibly JSON) body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Rejected { status, message },
        }
    }

    /// Message suitable for a user-visible notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "please log in again".to_string(),
            ApiError::Forbidden(m) | ApiError::NotFound(m) => m.clone(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(_) => "the server could not be reached".to_string(),
            ApiError::Decode(_) => "the server sent an unexpected response".to_string(),
            ApiError::InvalidBaseUrl(_) => "the client is misconfigured".to_string(),
        }
    }
}

/// The server answers errors as `{"message": "..."}`; fall back to the raw body.
fn server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Body {
        message: String,
    }

    match serde_json::from_str::<Body>(body) {
        Ok(b) => b.message,
        Err(_) => body.trim().to_string(),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
