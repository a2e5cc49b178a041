//! Error and retry-policy types for the Cadre client.
//!
//! [`ServiceError`] is the single error family surfaced by every service
//! operation. It carries plain data only (strings, status codes, durations) so
//! it can cross crate and process boundaries without dragging transport types
//! along; the HTTP adapter converts its own failures into these variants at the
//! dispatch chokepoint.
//!
//! [`RetryPolicy`] is advisory. The client performs exactly one attempt per
//! call; callers that want retries read [`ServiceError::retry_policy`] from a
//! wrapper of their own.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// ## Rules
///
/// - `Retryable` errors: deadline exceeded, connection-level failures.
/// - `NonRetryable` errors: non-200 responses, undecodable payloads, invalid
///   configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means retry
        /// immediately or apply the caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

impl RetryPolicy {
    /// Returns `true` for [`RetryPolicy::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }
}

// ---------------------------------------------------------------------------
// Service errors
// ---------------------------------------------------------------------------

/// Classified failure of a single service call.
///
/// Exactly one of these (or a successful result) is produced per call. None of
/// the variants is ever produced by an internal retry: the dispatcher makes one
/// attempt and reports what happened.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ServiceError {
    /// No complete response arrived within the configured deadline.
    #[error("service did not respond within timeout deadline")]
    Timeout {
        /// The per-call deadline that elapsed.
        timeout: Duration,
    },

    /// Connection-level failure: DNS, refused connection, TLS, broken pipe.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The service was reachable but answered with something other than 200.
    ///
    /// The body is kept for diagnostics only; it is never decoded.
    #[error("service responded with bad status code: {status}")]
    BadStatus {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body as lossy UTF-8, `None` if it could not be read or was empty.
        body: Option<String>,
    },

    /// A 200 response whose body could not be decoded into the expected shape.
    #[error("failed to decode service response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The client could not be constructed or a request could not be built
    /// from the configuration (e.g. an origin that is not an absolute URL).
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ServiceError {
    /// Shorthand for a [`ServiceError::Transport`] built from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: cause.to_string(),
        }
    }

    /// Shorthand for a [`ServiceError::Decode`] built from any displayable cause.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: cause.to_string(),
        }
    }

    /// Shorthand for a [`ServiceError::Configuration`] built from any displayable cause.
    pub fn configuration(cause: impl std::fmt::Display) -> Self {
        Self::Configuration {
            message: cause.to_string(),
        }
    }

    /// Returns the HTTP status for [`ServiceError::BadStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this error is a [`ServiceError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Classifies this error for a caller-level retry decision.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => RetryPolicy::Retryable { after: None },
            Self::BadStatus { .. } | Self::Decode { .. } | Self::Configuration { .. } => {
                RetryPolicy::NonRetryable
            }
        }
    }
}
