//! Client configuration: where the service lives and how long a call may take.

use std::time::Duration;

use cadre::ServiceError;
use reqwest::Url;

/// Per-call deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300);

/// Environment variable holding the service origin for [`ClientConfig::from_env`].
pub const ORIGIN_ENV_VAR: &str = "CADRE_ORIGIN";

/// Environment variable holding the per-call deadline in milliseconds.
pub const TIMEOUT_ENV_VAR: &str = "CADRE_TIMEOUT_MS";

/// Immutable configuration owned by one [`crate::CadreClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    origin: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the service at `origin` with the default timeout.
    ///
    /// The origin must be an absolute `http` or `https` URL that can carry a
    /// path. A base path (e.g. `http://host/cadre/`) is preserved; a trailing
    /// slash is optional.
    pub fn new(origin: impl AsRef<str>) -> Result<Self, ServiceError> {
        let raw = origin.as_ref();
        let origin = Url::parse(raw)
            .map_err(|err| ServiceError::configuration(format!("invalid origin `{raw}`: {err}")))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ServiceError::configuration(format!(
                "origin `{raw}` must use http or https"
            )));
        }
        if origin.cannot_be_a_base() {
            return Err(ServiceError::configuration(format!(
                "origin `{raw}` cannot be used as a base address"
            )));
        }
        Ok(Self {
            origin,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replaces the per-call deadline. A zero deadline is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ServiceError> {
        if timeout.is_zero() {
            return Err(ServiceError::configuration("timeout must be greater than zero"));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Reads [`ORIGIN_ENV_VAR`] (required) and [`TIMEOUT_ENV_VAR`] (optional).
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let origin = lookup(ORIGIN_ENV_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ServiceError::configuration(format!("{ORIGIN_ENV_VAR} is not set")))?;
        let config = Self::new(origin.trim())?;

        match lookup(TIMEOUT_ENV_VAR) {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|err| {
                    ServiceError::configuration(format!("invalid {TIMEOUT_ENV_VAR} `{raw}`: {err}"))
                })?;
                config.with_timeout(Duration::from_millis(millis))
            }
            None => Ok(config),
        }
    }

    /// Returns the service origin.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Returns the per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
