//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_api;

use adminsync::api::ApiClient;
use adminsync::config::Config;

use mock_api::MockApi;

/// Build an `ApiClient` pointed at a mock service.
pub fn client_for(mock: &MockApi) -> ApiClient {
    let config = Config {
        base_url: mock.base_url(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config)
}

/// Build an `ApiClient` pointed at an address nothing listens on.
pub fn unreachable_client() -> ApiClient {
    let config = Config {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    };
    ApiClient::new(&config)
}
