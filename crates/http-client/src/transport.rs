//! Transport session: one short-lived HTTP client per call.
//!
//! A [`TransportSession`] is opened for exactly one request and consumed by
//! [`TransportSession::send`]. The underlying `reqwest::Client` (and with it
//! every socket it opened) is dropped when `send` returns, on every path:
//! success, failure, or the caller dropping the future mid-flight. Idle
//! pooling is disabled so no connection outlives the session, and redirects
//! are never followed: a 3xx is returned to the dispatcher like any other
//! status.

use std::error::Error as StdError;
use std::time::Duration;

use cadre::OutboundRequest;
use reqwest::Url;
use thiserror::Error;
use tracing::trace;

use crate::config::ClientConfig;
use crate::request::{self, RequestError};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("cadre-client/", env!("CARGO_PKG_VERSION"));

/// Failures raised below the status-code layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No complete response (headers and body) within the deadline.
    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),

    /// DNS, connect, TLS, or I/O failure while exchanging the request.
    #[error("{}", error_chain(.0))]
    Http(reqwest::Error),

    /// The request could not be turned into an address.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The HTTP client for the session could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Status and fully-buffered body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns the body as lossy UTF-8, or `None` if it is empty.
    pub fn body_text(&self) -> Option<String> {
        if self.body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.body).into_owned())
        }
    }
}

/// A connection context bound to one origin and one deadline, used for a single request.
#[derive(Debug)]
pub struct TransportSession {
    client: reqwest::Client,
    origin: Url,
    timeout: Duration,
}

impl TransportSession {
    /// Opens a session for `config`. No connection is made until [`Self::send`].
    pub fn open(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| TransportError::Client(error_chain(&err)))?;
        Ok(Self {
            client,
            origin: config.origin().clone(),
            timeout: config.timeout(),
        })
    }

    /// Sends `request` and buffers the full response, consuming the session.
    ///
    /// The deadline covers connecting, sending, and reading the whole body.
    /// There is exactly one attempt.
    pub async fn send(self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        let url = request::resolve(&self.origin, request)?;
        trace!(%url, "sending request");

        let mut builder = self
            .client
            .request(request::http_method(request.method()), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                body: body.to_vec(),
            })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) if err.is_timeout() => Err(TransportError::Timeout(self.timeout)),
            Ok(Err(err)) => Err(TransportError::Http(err)),
            Err(_elapsed) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}

/// Renders an error and its sources as `outer: inner: root`.
///
/// `reqwest` keeps the useful part of a connect failure (e.g. "Connection
/// refused") in the source chain rather than in its own message.
pub(crate) fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
