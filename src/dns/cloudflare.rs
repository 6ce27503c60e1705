use std::fmt;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::provider::{DnsProvider, DnsRecord};
use crate::error::{DdnsError, Result};
use crate::ip::ExternalIp;

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

pub struct CloudflareProvider {
    client: Client,
    base_url: String,
    zone_id: String,
    api_token: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    result: Vec<CloudflareRecord>,
}

#[derive(Debug, Deserialize)]
struct CloudflareRecord {
    id: String,
    name: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ContentPatch<'a> {
    content: &'a str,
}

impl CloudflareProvider {
    pub fn new(client: Client, zone_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_base_url(client, CLOUDFLARE_API_BASE, zone_id, api_token)
    }

    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        zone_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            zone_id: zone_id.into(),
            api_token: api_token.into(),
        }
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, self.zone_id)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, self.auth_header())
            .header(CONTENT_TYPE, "application/json")
    }
}

impl fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("zone_id", &self.zone_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Reads the body of a failed response for the error message.
async fn error_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn get_record(&self, name: &str) -> Result<DnsRecord> {
        let read_error = |detail: String| {
            DdnsError::provider(format!(
                "Cannot get DNS record information of {} from Cloudflare API: {}",
                name, detail
            ))
        };

        debug!("Fetching A record {} in zone {}", name, self.zone_id);

        let response = self
            .authorized(self.client.get(self.records_url()))
            .query(&[("type", "A"), ("name", name)])
            .send()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(read_error(error_body(response).await));
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let record = list.result.into_iter().next().ok_or_else(|| {
            DdnsError::provider(format!(
                "DNS record {} not found in zone {}",
                name, self.zone_id
            ))
        })?;

        Ok(DnsRecord {
            id: record.id,
            name: record.name,
            content: record.content,
        })
    }

    async fn update_record(&self, record: &DnsRecord, ip: &ExternalIp) -> Result<()> {
        let update_error = |detail: String| {
            DdnsError::provider(format!(
                "Cannot update DNS record {} to Cloudflare API: {}",
                record.name, detail
            ))
        };

        let url = format!("{}/{}", self.records_url(), record.id);

        let response = self
            .authorized(self.client.patch(&url))
            .json(&ContentPatch {
                content: ip.as_str(),
            })
            .send()
            .await
            .map_err(|e| update_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(update_error(error_body(response).await));
        }

        info!("Updated {} ({}) to {}", record.name, record.id, ip);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
