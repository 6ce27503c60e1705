use thiserror::Error;

pub type Result<T> = std::result::Result<T, DdnsError>;

/// Every way a run can fail. None of these are retried; they all end the run.
#[derive(Debug, Error)]
pub enum DdnsError {
    /// Missing or malformed configuration
    #[error("{0}")]
    Config(String),

    /// No usable external IPv4 address
    #[error("{0}")]
    Discovery(String),

    /// Non-success response (or no response) from the DNS provider
    #[error("{0}")]
    Provider(String),

    /// Webhook delivery failed
    #[error("Cannot send Discord webhook: {0}")]
    Notify(String),

    #[error("Cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl DdnsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }
}
