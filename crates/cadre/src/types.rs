//! Request and result value types.
//!
//! An [`OutboundRequest`] is built fresh for each call and consumed by the
//! dispatcher; an [`InboundResult`] is produced by the dispatcher and consumed
//! immediately by the operation that asked for it. Neither has identity beyond
//! the call that created it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ServiceError;

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// HTTP methods used by the service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Read operations.
    Get,
    /// Template writes.
    Put,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Put => f.write_str("PUT"),
        }
    }
}

/// A request to the service, relative to the configured origin.
///
/// The resource path is held as individual segments. Each segment is opaque:
/// the request builder percent-encodes it as a whole, so an environment name
/// containing `/` addresses a single resource rather than a nested one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
    method: Method,
    segments: Vec<String>,
    body: Option<Value>,
}

impl OutboundRequest {
    /// A `GET` request for the resource at `segments`.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
        }
    }

    /// A `PUT` request carrying `body` as JSON.
    pub fn put<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Put,
            segments: segments.into_iter().map(Into::into).collect(),
            body: Some(body),
        }
    }

    /// Returns the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the unencoded path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the relative path as `a/b/c`, unencoded. For logging.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// How the dispatcher should decode a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Parse the body as JSON.
    Json,
    /// Return the body as-is (acknowledgements, health checks).
    Text,
}

/// A decoded success payload, tagged by the [`DecodeMode`] that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum InboundResult {
    /// Body parsed as JSON (mapping or sequence, arbitrary depth).
    Json(Value),
    /// Body returned verbatim.
    Text(String),
}

impl InboundResult {
    /// Returns the mode this result was decoded with.
    pub fn mode(&self) -> DecodeMode {
        match self {
            Self::Json(_) => DecodeMode::Json,
            Self::Text(_) => DecodeMode::Text,
        }
    }

    /// Unwraps a JSON result.
    ///
    /// Returns [`ServiceError::Decode`] if the result was decoded as text.
    pub fn into_json(self) -> Result<Value, ServiceError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(_) => Err(ServiceError::decode("expected a JSON result, got text")),
        }
    }

    /// Unwraps a text result.
    ///
    /// Returns [`ServiceError::Decode`] if the result was decoded as JSON.
    pub fn into_text(self) -> Result<String, ServiceError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(_) => Err(ServiceError::decode("expected a text result, got JSON")),
        }
    }

    /// Converts a JSON result into a concrete type.
    ///
    /// A well-formed JSON body of the wrong shape (e.g. a string where a
    /// mapping was expected) is a [`ServiceError::Decode`].
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ServiceError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(ServiceError::decode)
    }
}
