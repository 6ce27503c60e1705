use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::error::{DdnsError, Result};

/// Posts status messages to a Discord-style webhook.
///
/// An empty URL disables delivery entirely.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    webhook_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

impl Notifier {
    pub fn new(client: Client, webhook_url: &str) -> Self {
        let webhook_url = (!webhook_url.is_empty()).then(|| webhook_url.to_string());
        Self { client, webhook_url }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub async fn notify(&self, message: &str) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .json(&WebhookPayload { content: message })
            .send()
            .await
            .map_err(|e| DdnsError::notify(e.to_string()))?;

        if response.status() != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(DdnsError::notify(body));
        }

        debug!("Webhook notified");
        Ok(())
    }
}
