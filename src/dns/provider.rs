use async_trait::async_trait;

use crate::error::Result;
use crate::ip::ExternalIp;

/// An A record as the provider currently stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl DnsRecord {
    pub fn matches(&self, ip: &ExternalIp) -> bool {
        self.content == ip.as_str()
    }
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Get the A record with exactly this name
    async fn get_record(&self, name: &str) -> Result<DnsRecord>;

    /// Point an existing record at a new address
    async fn update_record(&self, record: &DnsRecord, ip: &ExternalIp) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
