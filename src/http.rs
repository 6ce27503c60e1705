use std::time::Duration;

use reqwest::Client;

use crate::error::{DdnsError, Result};

/// Per-request timeout shared by every outbound call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the single HTTP client used for the whole run.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(DdnsError::Client)
}
