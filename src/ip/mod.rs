mod external;
mod parse;

pub use external::{IpDiscovery, DEFAULT_FALLBACK_URL, DEFAULT_TRACE_URL};
pub use parse::{extract_labeled_value, is_valid_ipv4};

use std::fmt;

/// A validated public IPv4 address, discovered once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIp(String);

impl ExternalIp {
    /// Wraps `value` if it is a valid dotted quad.
    pub fn parse(value: &str) -> Option<Self> {
        is_valid_ipv4(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
