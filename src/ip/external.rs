use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use super::parse::{extract_labeled_value, is_valid_ipv4};
use super::ExternalIp;
use crate::error::{DdnsError, Result};

pub const DEFAULT_TRACE_URL: &str = "https://cloudflare.com/cdn-cgi/trace";
pub const DEFAULT_FALLBACK_URL: &str = "https://checkip.amazonaws.com";

/// Resolves the public IPv4 address from a trace endpoint, falling back to a
/// plain-text "what is my IP" endpoint.
#[derive(Debug, Clone)]
pub struct IpDiscovery {
    client: Client,
    trace_url: String,
    fallback_url: String,
}

impl IpDiscovery {
    pub fn new(client: Client) -> Self {
        Self::with_endpoints(client, DEFAULT_TRACE_URL, DEFAULT_FALLBACK_URL)
    }

    pub fn with_endpoints(
        client: Client,
        trace_url: impl Into<String>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            trace_url: trace_url.into(),
            fallback_url: fallback_url.into(),
        }
    }

    pub async fn discover(&self) -> Result<ExternalIp> {
        let candidate = match self.query_trace().await {
            Some(ip) => Some(ip),
            None => {
                warn!("Trace endpoint gave no address, trying {}", self.fallback_url);
                self.query_fallback().await
            }
        };

        let ip = validate_candidate(candidate)?;
        info!("External IP is {}", ip);
        Ok(ip)
    }

    async fn query_trace(&self) -> Option<String> {
        let response = match self.client.get(&self.trace_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Request to {} failed: {}", self.trace_url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("{} returned {}", self.trace_url, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        extract_labeled_value(&body, "ip")
            .filter(|value| is_valid_ipv4(value))
            .map(str::to_string)
    }

    async fn query_fallback(&self) -> Option<String> {
        let response = match self.client.get(&self.fallback_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Request to {} failed: {}", self.fallback_url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("{} returned {}", self.fallback_url, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        let body = body.trim();
        (!body.is_empty()).then(|| body.to_string())
    }
}

/// Turns whatever the sources produced into an address, telling a malformed
/// value apart from no value at all.
fn validate_candidate(candidate: Option<String>) -> Result<ExternalIp> {
    match candidate {
        Some(value) if !is_valid_ipv4(&value) => Err(DdnsError::discovery(format!(
            "Cannot get external IPv4 address. The current IP address is {}",
            value
        ))),
        Some(value) => Ok(ExternalIp(value)),
        None => Err(DdnsError::discovery(
            "Cannot get external IP address. Check the internet connection?",
        )),
    }
}
