//! Error types for Janus.
//!
//! This module provides [`Error`], the domain error taxonomy raised by
//! repositories and wrappers, together with its total translation to
//! wire-level HTTP outcomes.
//!
//! # Translation table
//!
//! | Variant | Status | Message surfaced |
//! |---|---|---|
//! | `NotFound` | 404 | yes |
//! | `Conflict` | 409 | yes |
//! | `DataError` | 422 | yes |
//! | `NoContent` | 204 | no (empty response) |
//! | `BadRequest` | 400 | yes |
//! | `Forbidden` | 403 | yes |
//! | `Http` | carried status | yes, verbatim |
//! | `Internal` | 500 | no (suppressed) |
//!
//! Internal errors are deliberately not introspected for a message: only the
//! generic status surfaces, so internal detail never leaks to clients.

use http::StatusCode;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Domain error taxonomy for repository operations and pipeline wrappers.
///
/// Repositories signal outcomes with this type; the accessor wrapper recovers
/// them into HTTP responses via [`Error::translate`]. Errors that escape every
/// inner wrapper terminate at the safety-net wrapper, which applies the same
/// translation.
///
/// # Example
///
/// ```
/// use janus_core::Error;
///
/// fn lookup(id: &str) -> Result<(), Error> {
///     if id.is_empty() {
///         return Err(Error::bad_request("id must not be empty"));
///     }
///     Err(Error::not_found(format!("no entity '{id}'")))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The requested resource does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// The operation conflicts with existing state.
    #[error("conflict: {message}")]
    Conflict {
        /// Human-readable error message.
        message: String,
    },

    /// The payload was understood but cannot be processed.
    #[error("data error: {message}")]
    DataError {
        /// Human-readable error message.
        message: String,
    },

    /// The operation succeeded but produced no representation.
    #[error("no content")]
    NoContent,

    /// Malformed credentials or bad-request-shaped input.
    #[error("bad request: {message}")]
    BadRequest {
        /// Human-readable error message.
        message: String,
    },

    /// Access denied by an access-control wrapper.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Human-readable error message.
        message: String,
    },

    /// An error that already carries its own HTTP status.
    #[error("{message}")]
    Http {
        /// The explicit status code to surface.
        status: StatusCode,
        /// Message surfaced verbatim to the client.
        message: String,
    },

    /// Unclassified fault. Surfaces as a generic 500; the message and source
    /// are kept for logs only and never reach the client.
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable error message (logs only).
        message: String,
        /// The underlying error (not exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// A wire-level outcome: status code plus the message allowed to surface.
///
/// `message` is `None` when the error must not leak detail (internal faults)
/// or when the response carries no body (`NoContent`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The HTTP status code for the response.
    pub status: StatusCode,
    /// The client-visible message, if any.
    pub message: Option<String>,
}

impl Error {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a data error (unprocessable input).
    #[must_use]
    pub fn data_error(message: impl Into<String>) -> Self {
        Self::DataError {
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates an error carrying an explicit HTTP status.
    #[must_use]
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::DataError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoContent => StatusCode::NO_CONTENT,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Http { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message that may be surfaced to the client, if any.
    ///
    /// Internal faults return `None`: the client sees only the generic
    /// status. `NoContent` returns `None` because 204 carries no body.
    #[must_use]
    pub fn public_message(&self) -> Option<String> {
        match self {
            Self::NoContent | Self::Internal { .. } => None,
            Self::NotFound { message }
            | Self::Conflict { message }
            | Self::DataError { message }
            | Self::BadRequest { message }
            | Self::Forbidden { message }
            | Self::Http { message, .. } => Some(message.clone()),
        }
    }

    /// Translates this error to its wire-level outcome.
    ///
    /// The mapping is total: every variant produces a status, and variants
    /// carrying an explicit status use it verbatim.
    #[must_use]
    pub fn translate(&self) -> Translation {
        Translation {
            status: self.status_code(),
            message: self.public_message(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest {
            message: format!("malformed payload: {err}"),
        }
    }
}
