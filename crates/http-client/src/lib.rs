//! Cadre HTTP client adapter.
//!
//! Implements the [`cadre::ConfigService`] trait over the service's HTTP API:
//!
//! | Operation | Request | Decoded as |
//! |-----------|---------|------------|
//! | `ping` | `GET {origin}/ping` | text |
//! | `get_template` | `GET {origin}/t/{env}` | JSON mapping |
//! | `load_config` | `GET {origin}/c/{env}` | JSON mapping |
//! | `list_configs` | `GET {origin}/c` | JSON list of names |
//! | `write_template` | `PUT {origin}/t/{env}` (JSON body) | text |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, the per-call HTTP session, deadline
//! enforcement, status classification, and body decoding all live here. The
//! [`cadre`] crate sees only [`cadre::ConfigService`] and
//! [`cadre::ServiceError`].
//!
//! ## Call path
//!
//! [`CadreClient`] (facade) → [`request::resolve`] (builder) →
//! [`Dispatcher`] → [`TransportSession`] → network. Every operation goes
//! through [`Dispatcher::dispatch`], which makes exactly one attempt bounded
//! by the configured timeout (300ms unless overridden). There is no retry, no
//! cache, and no connection reuse between calls.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod request;
pub mod transport;

pub use client::CadreClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, ORIGIN_ENV_VAR, TIMEOUT_ENV_VAR};
pub use dispatch::Dispatcher;
pub use request::RequestError;
pub use transport::{RawResponse, TransportError, TransportSession};
