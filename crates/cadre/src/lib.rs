//! Domain types for the Cadre configuration client.
//!
//! Cadre stores one JSON template per environment and serves either the raw
//! template or a resolved configuration in which marked keys have been
//! replaced by values from a secret store. This crate holds everything a caller
//! of that service needs that is independent of how requests are carried:
//! request/result values, the error taxonomy, and the [`ConfigService`] port.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a call looks like; `http-client` defines *how* it is sent.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Call correlation identifier (`CallId`) |
//! | [`types`] | `OutboundRequest`, `Method`, `DecodeMode`, `InboundResult` |
//! | [`errors`] | `ServiceError` and `RetryPolicy` |
//! | [`service`] | The `ConfigService` port trait |

pub mod errors;
pub mod identifiers;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{RetryPolicy, ServiceError};
pub use identifiers::CallId;
pub use service::{ConfigService, JsonMap};
pub use types::{DecodeMode, InboundResult, Method, OutboundRequest};
