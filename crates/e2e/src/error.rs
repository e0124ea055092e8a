//! Error types for E2E checks

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request failed ({}): {body}", status_label(.status))]
    RequestFailure { status: Option<u16>, body: String },

    #[error("Unexpected status: expected {expected}, got {actual} - {body}")]
    UnexpectedStatus { expected: u16, actual: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Server echoed user {actual}, expected {expected}")]
    IdMismatch { expected: i64, actual: i64 },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no response".to_string(),
    }
}

impl From<reqwest::Error> for E2eError {
    fn from(err: reqwest::Error) -> Self {
        let body = if err.is_timeout() {
            format!("timed out: {err}")
        } else {
            err.to_string()
        };
        E2eError::RequestFailure {
            status: err.status().map(|s| s.as_u16()),
            body,
        }
    }
}

impl From<restprobe_common::Error> for E2eError {
    fn from(err: restprobe_common::Error) -> Self {
        E2eError::Configuration(err.to_string())
    }
}

impl E2eError {
    /// True for errors raised before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(self, E2eError::Configuration(_))
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
