//! The dispatcher: the single path every service call goes through.
//!
//! Timeout, status-code, and decoding policy live here and nowhere else:
//!
//! 1. open a [`TransportSession`] and send the request (one attempt);
//! 2. a missed deadline is [`ServiceError::Timeout`], any other transport
//!    failure is [`ServiceError::Transport`];
//! 3. any status other than exactly 200 is [`ServiceError::BadStatus`] and the
//!    body is never decoded;
//! 4. the body is decoded as JSON or returned as text, per [`DecodeMode`].
//!
//! The session is consumed by the send, so it is released before the outcome
//! is classified.

use cadre::{CallId, DecodeMode, InboundResult, OutboundRequest, ServiceError};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::ClientConfig;
use crate::transport::{RawResponse, TransportError, TransportSession};

const STATUS_OK: u16 = 200;

/// Sends requests for one [`ClientConfig`]. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: ClientConfig,
}

impl Dispatcher {
    /// Creates a dispatcher for `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration requests are sent with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `request` and decodes a 200 response according to `mode`.
    pub async fn dispatch(
        &self,
        request: OutboundRequest,
        mode: DecodeMode,
    ) -> Result<InboundResult, ServiceError> {
        let call_id = CallId::new_random();
        let span = info_span!(
            "cadre.dispatch",
            %call_id,
            method = %request.method(),
            path = %request.path()
        );

        async move {
            let response = self.exchange(&request).await?;
            let result = classify(response, mode)?;
            debug!(mode = ?result.mode(), "call succeeded");
            Ok(result)
        }
        .instrument(span)
        .await
    }

    async fn exchange(&self, request: &OutboundRequest) -> Result<RawResponse, ServiceError> {
        let outcome = match TransportSession::open(&self.config) {
            Ok(session) => session.send(request).await,
            Err(err) => Err(err),
        };

        outcome.map_err(|err| match err {
            TransportError::Timeout(timeout) => {
                warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "service did not respond within timeout deadline"
                );
                ServiceError::Timeout { timeout }
            }
            TransportError::Http(_) => {
                warn!(error = %err, "transport failure");
                ServiceError::transport(err)
            }
            TransportError::Request(_) | TransportError::Client(_) => {
                warn!(error = %err, "request could not be built");
                ServiceError::configuration(err)
            }
        })
    }
}

/// Applies the status policy and decodes the body of a buffered response.
fn classify(response: RawResponse, mode: DecodeMode) -> Result<InboundResult, ServiceError> {
    if response.status != STATUS_OK {
        warn!(status = response.status, "service responded with bad status code");
        return Err(ServiceError::BadStatus {
            status: response.status,
            body: response.body_text(),
        });
    }

    debug!(status = response.status, bytes = response.body.len(), "response received");
    decode(response.body, mode)
}

fn decode(body: Vec<u8>, mode: DecodeMode) -> Result<InboundResult, ServiceError> {
    match mode {
        DecodeMode::Json => serde_json::from_slice::<Value>(&body)
            .map(InboundResult::Json)
            .map_err(|err| {
                warn!(error = %err, "response body is not valid JSON");
                ServiceError::decode(err)
            }),
        DecodeMode::Text => String::from_utf8(body)
            .map(InboundResult::Text)
            .map_err(|err| {
                warn!(error = %err, "response body is not valid UTF-8");
                ServiceError::decode(err)
            }),
    }
}
