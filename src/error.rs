//! # error
//!
//! Error types for the dashboard controllers.
//!
//! [`ApiError`] covers everything that can go wrong talking to the backend;
//! [`FormError`] covers connect-form preconditions that are checked before
//! any request leaves the process.  Neither is ever fatal to the session.

use thiserror::Error;

/// Backend call failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS, timeout…).
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// A response arrived but the body was not the JSON we expected.
    #[error("Unreadable backend response: {0}")]
    Decode(String),

    /// The configured base URL cannot form a request URL.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Connect-form precondition failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: '{0}'")]
    UnknownField(String),

    #[error("No exchange selected")]
    ExchangeNotSelected,

    #[error("Unsupported exchange: '{0}'")]
    UnsupportedExchange(String),

    #[error("API key is required")]
    MissingApiKey,

    #[error("Secret key is required")]
    MissingSecretKey,

    /// A connect request is already pending.
    #[error("A connect request is already in flight")]
    SubmissionInFlight,

    /// The dashboard was torn down.
    #[error("Dashboard is no longer active")]
    Inactive,
}

/// Console input that does not parse as a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: '{0}' (type 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}
