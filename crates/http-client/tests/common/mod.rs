//! Common test utilities for the client integration tests

pub mod fake_service;
pub mod sockets;

use std::time::Duration;

use http_client::{CadreClient, ClientConfig};

/// Build a client for `origin` with an explicit timeout.
#[allow(dead_code)]
pub fn client_with_timeout(origin: &str, timeout: Duration) -> CadreClient {
    CadreClient::new(
        ClientConfig::new(origin)
            .expect("valid origin")
            .with_timeout(timeout)
            .expect("non-zero timeout"),
    )
}
