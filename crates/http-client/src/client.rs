//! The operation facade: one method per service capability.

use async_trait::async_trait;
use cadre::{ConfigService, DecodeMode, JsonMap, OutboundRequest, ServiceError};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;

const PING: &str = "ping";
const TEMPLATES: &str = "t";
const CONFIGS: &str = "c";

/// Asynchronous client for the Cadre configuration service.
///
/// Holds only its [`ClientConfig`]. Every call opens its own transport
/// session, so a single client (or clones of it) can be used from many tasks
/// at once without locking. Dropping a call's future aborts its request.
///
/// ```no_run
/// # async fn run() -> Result<(), cadre::ServiceError> {
/// use http_client::{CadreClient, ClientConfig};
///
/// let client = CadreClient::new(ClientConfig::new("http://localhost:7000")?);
/// assert!(client.ping().await?.contains("ok"));
/// let prod = client.load_config("prod").await?;
/// # let _ = prod;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CadreClient {
    dispatcher: Dispatcher,
}

impl CadreClient {
    /// Creates a client for `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
        }
    }

    /// Creates a client for `origin` with the default timeout.
    pub fn from_origin(origin: impl AsRef<str>) -> Result<Self, ServiceError> {
        ClientConfig::new(origin).map(Self::new)
    }

    /// Creates a client from `CADRE_ORIGIN` and `CADRE_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ServiceError> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Queries the health check endpoint and returns its message verbatim.
    pub async fn ping(&self) -> Result<String, ServiceError> {
        self.dispatcher
            .dispatch(OutboundRequest::get([PING]), DecodeMode::Text)
            .await?
            .into_text()
    }

    /// Fetches the template for `env` as stored, with secret markers unresolved
    /// (e.g. `{"*password": "aws:prod/Secret"}`).
    ///
    /// `env` is sent as a single path segment. An empty name, `.` or `..` is
    /// refused with [`ServiceError::Configuration`] before anything is sent.
    pub async fn get_template(&self, env: &str) -> Result<JsonMap, ServiceError> {
        self.dispatcher
            .dispatch(OutboundRequest::get([TEMPLATES, env]), DecodeMode::Json)
            .await?
            .decode()
    }

    /// Fetches the configuration for `env` with every marked key replaced by
    /// the value the service retrieved from its secret store.
    pub async fn load_config(&self, env: &str) -> Result<JsonMap, ServiceError> {
        self.dispatcher
            .dispatch(OutboundRequest::get([CONFIGS, env]), DecodeMode::Json)
            .await?
            .decode()
    }

    /// Lists the environments that have templates.
    pub async fn list_configs(&self) -> Result<Vec<String>, ServiceError> {
        self.dispatcher
            .dispatch(OutboundRequest::get([CONFIGS]), DecodeMode::Json)
            .await?
            .decode()
    }

    /// Replaces the template for `env` and returns the acknowledgement text.
    ///
    /// The body is not inspected here; a template the service rejects comes
    /// back as [`ServiceError::BadStatus`].
    pub async fn write_template(&self, env: &str, template: &Value) -> Result<String, ServiceError> {
        self.dispatcher
            .dispatch(
                OutboundRequest::put([TEMPLATES, env], template.clone()),
                DecodeMode::Text,
            )
            .await?
            .into_text()
    }
}

#[async_trait]
impl ConfigService for CadreClient {
    async fn ping(&self) -> Result<String, ServiceError> {
        CadreClient::ping(self).await
    }

    async fn get_template(&self, env: &str) -> Result<JsonMap, ServiceError> {
        CadreClient::get_template(self, env).await
    }

    async fn load_config(&self, env: &str) -> Result<JsonMap, ServiceError> {
        CadreClient::load_config(self, env).await
    }

    async fn list_configs(&self) -> Result<Vec<String>, ServiceError> {
        CadreClient::list_configs(self).await
    }

    async fn write_template(&self, env: &str, template: &Value) -> Result<String, ServiceError> {
        CadreClient::write_template(self, env, template).await
    }
}
