//! Error types for the check harness

use thiserror::Error;

/// Why a single check failed.
///
/// The `Display` output is the message shown after `❌ FAIL:`.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Expected {expected}, got {actual}")]
    UnexpectedStatus { expected: String, actual: u16 },

    #[error("Failed to login: {0}")]
    LoginRejected(String),

    #[error("Token missing from response")]
    TokenMissing,

    #[error("Role mismatch")]
    RoleMismatch { expected: String, actual: Option<String> },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    pub fn status(expected: impl Into<String>, actual: u16) -> Self {
        Self::UnexpectedStatus {
            expected: expected.into(),
            actual,
        }
    }
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Harness-level failures, outside of any individual check.
#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
