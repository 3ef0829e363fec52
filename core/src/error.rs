//! Error types for the API client.
//!
//! # Design
//! Failures fall into three groups that callers branch on differently:
//! the request never produced a response (`Transport`, `Timeout`), the
//! remote API answered with a failure status (`NotFound`, `Remote`, `Http`),
//! or the response arrived but could not be mapped (`Deserialization`).
//! `InvalidUrl` and `InvalidRequest` cover a request that could not be built,
//! `Config` a setting that could not be read.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// One entry of the API's `{"errors": [...]}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}

/// Errors returned by `ApiClient` calls and response shapes.
#[derive(Debug)]
pub enum ApiError {
    /// The session could not complete the HTTP exchange.
    Transport(String),

    /// The call did not finish within the configured limit.
    Timeout(Duration),

    /// The server returned 404.
    NotFound,

    /// A non-2xx status with the API's error envelope.
    Remote { status: u16, errors: Vec<RemoteError> },

    /// A non-2xx status without a recognisable error envelope.
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// An endpoint path could not be resolved against the base URL.
    InvalidUrl(String),

    /// The request could not be assembled.
    InvalidRequest(String),

    /// A configuration value was present but malformed.
    Config(String),
}

impl ApiError {
    /// True when no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout(_))
    }

    /// True when a response arrived but did not have the expected shape.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ApiError::Deserialization(_))
    }

    /// HTTP status of a failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Remote { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Timeout(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Remote { status, errors } => {
                write!(f, "HTTP {status}:")?;
                for err in errors {
                    write!(f, " [{}] {}", err.code, err.message)?;
                }
                Ok(())
            }
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
            ApiError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            ApiError::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
