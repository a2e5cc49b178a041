//! The [`ConfigService`] port: one method per service capability.
//!
//! Infrastructure crates implement this trait (the HTTP adapter in
//! `http-client` is the production implementation). Calling code that depends
//! on the trait rather than a concrete client can substitute a test double, or
//! wrap a client in its own retry decorator using
//! [`crate::ServiceError::retry_policy`].

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::ServiceError;

/// A JSON mapping as returned by the template and configuration endpoints.
pub type JsonMap = Map<String, Value>;

/// Operations offered by the remote configuration service.
///
/// Every method performs exactly one round trip and returns exactly one result
/// or one [`ServiceError`]. Implementations never cache and never retry.
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Checks that the service is alive, returning its liveness message.
    async fn ping(&self) -> Result<String, ServiceError>;

    /// Fetches the raw template for `env`, with secret markers left in place.
    async fn get_template(&self, env: &str) -> Result<JsonMap, ServiceError>;

    /// Fetches the configuration for `env` with secrets substituted by the service.
    async fn load_config(&self, env: &str) -> Result<JsonMap, ServiceError>;

    /// Lists the environments the service holds templates for.
    async fn list_configs(&self) -> Result<Vec<String>, ServiceError>;

    /// Replaces the stored template for `env`, returning the service's acknowledgement.
    async fn write_template(&self, env: &str, template: &Value) -> Result<String, ServiceError>;
}
