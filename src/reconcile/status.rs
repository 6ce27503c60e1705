use std::fmt;

use crate::error::DdnsError;

const PREFIX: &str = "DDNS Updater: ";

/// One human-readable status line, printed and optionally sent to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn unchanged(record: &str, ip: &str) -> Self {
        Self::prefixed(format!("IP address of {} is {}, no changes needed", record, ip))
    }

    pub fn updated(record: &str, from: &str, to: &str) -> Self {
        Self::prefixed(format!("Updated DNS record {} from {} to {}", record, from, to))
    }

    pub fn outdated(record: &str, current: &str, ip: &str) -> Self {
        Self::prefixed(format!(
            "DNS record {} is {}, would be updated to {}",
            record, current, ip
        ))
    }

    pub fn failure(error: &DdnsError) -> Self {
        Self::prefixed(error.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn prefixed(body: String) -> Self {
        Self(format!("{}{}", PREFIX, body))
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
