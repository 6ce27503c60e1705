use std::sync::Arc;

use tracing::{error, info};

use super::status::StatusMessage;
use crate::config::Settings;
use crate::dns::{CloudflareProvider, DnsProvider};
use crate::error::Result;
use crate::http::build_client;
use crate::ip::{ExternalIp, IpDiscovery};
use crate::notify::Notifier;

/// What happened to one configured record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Unchanged { name: String, ip: String },
    Updated { name: String, from: String, to: String },
    /// Only produced by [`Reconciler::check`]
    Outdated { name: String, current: String, ip: String },
}

impl RecordOutcome {
    pub fn status(&self) -> StatusMessage {
        match self {
            RecordOutcome::Unchanged { name, ip } => StatusMessage::unchanged(name, ip),
            RecordOutcome::Updated { name, from, to } => StatusMessage::updated(name, from, to),
            RecordOutcome::Outdated { name, current, ip } => {
                StatusMessage::outdated(name, current, ip)
            }
        }
    }
}

/// Drives one pass: discover the IP, then walk the records in order.
pub struct Reconciler {
    records: Vec<String>,
    discovery: IpDiscovery,
    provider: Arc<dyn DnsProvider>,
    notifier: Notifier,
}

impl Reconciler {
    pub fn new(
        records: Vec<String>,
        discovery: IpDiscovery,
        provider: Arc<dyn DnsProvider>,
        notifier: Notifier,
    ) -> Self {
        Self {
            records,
            discovery,
            provider,
            notifier,
        }
    }

    /// Wires up the production endpoints for a validated configuration.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let client = build_client()?;
        let provider = CloudflareProvider::new(
            client.clone(),
            settings.zone_id.as_str(),
            settings.api_token.as_str(),
        );

        Ok(Self::new(
            settings.dns_records.clone(),
            IpDiscovery::new(client.clone()),
            Arc::new(provider),
            Notifier::new(client, &settings.webhook_url),
        ))
    }

    /// Reconcile and, on failure, print and notify the error before
    /// returning it. A failed notification replaces the original error.
    pub async fn run(&self) -> Result<Vec<RecordOutcome>> {
        match self.reconcile().await {
            Ok(outcomes) => Ok(outcomes),
            Err(err) => {
                let status = StatusMessage::failure(&err);
                error!("Run failed: {}", err);
                println!("{}", status);
                self.notifier.notify(status.as_str()).await?;
                Err(err)
            }
        }
    }

    /// Stops at the first record that fails; later records are not touched.
    pub async fn reconcile(&self) -> Result<Vec<RecordOutcome>> {
        let ip = self.discovery.discover().await?;

        let mut outcomes = Vec::with_capacity(self.records.len());
        for name in &self.records {
            outcomes.push(self.reconcile_record(name, &ip).await?);
        }

        info!(
            "Checked {} record(s) with {}",
            outcomes.len(),
            self.provider.provider_name()
        );
        Ok(outcomes)
    }

    /// Same walk as [`Reconciler::reconcile`] but never writes or notifies.
    pub async fn check(&self) -> Result<Vec<RecordOutcome>> {
        let ip = self.discovery.discover().await?;

        let mut outcomes = Vec::with_capacity(self.records.len());
        for name in &self.records {
            let record = self.provider.get_record(name).await?;
            let outcome = if record.matches(&ip) {
                RecordOutcome::Unchanged {
                    name: name.clone(),
                    ip: record.content,
                }
            } else {
                RecordOutcome::Outdated {
                    name: name.clone(),
                    current: record.content,
                    ip: ip.to_string(),
                }
            };
            println!("{}", outcome.status());
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn reconcile_record(&self, name: &str, ip: &ExternalIp) -> Result<RecordOutcome> {
        let record = self.provider.get_record(name).await?;

        if record.matches(ip) {
            let outcome = RecordOutcome::Unchanged {
                name: name.to_string(),
                ip: record.content,
            };
            println!("{}", outcome.status());
            return Ok(outcome);
        }

        info!("{} points at {}, updating to {}", name, record.content, ip);
        self.provider.update_record(&record, ip).await?;

        let outcome = RecordOutcome::Updated {
            name: name.to_string(),
            from: record.content,
            to: ip.to_string(),
        };
        let status = outcome.status();
        println!("{}", status);
        self.notifier.notify(status.as_str()).await?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdnsError;

    #[test]
    fn test_from_settings_rejects_incomplete_config() {
        let settings = Settings {
            dns_records: vec!["example.com".to_string()],
            zone_id: String::new(),
            api_token: "token".to_string(),
            webhook_url: String::new(),
        };

        let err = Reconciler::from_settings(&settings).err().unwrap();
        assert!(matches!(err, DdnsError::Config(_)));
    }

    #[test]
    fn test_outcome_status_lines() {
        let updated = RecordOutcome::Updated {
            name: "example.com".to_string(),
            from: "198.51.100.1".to_string(),
            to: "203.0.113.7".to_string(),
        };
        let line = updated.status().to_string();
        assert!(line.contains("198.51.100.1"));
        assert!(line.contains("203.0.113.7"));

        let unchanged = RecordOutcome::Unchanged {
            name: "example.com".to_string(),
            ip: "203.0.113.7".to_string(),
        };
        assert!(unchanged.status().as_str().ends_with("no changes needed"));
    }
}
