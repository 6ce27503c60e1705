use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DdnsError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "cloudflare_ddns_config.json";

#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "DNS_RECORDS")]
    pub dns_records: Vec<String>,
    #[serde(rename = "CLOUDFLARE_ZONE_ID")]
    pub zone_id: String,
    #[serde(rename = "CLOUDFLARE_ZONE_API_TOKEN")]
    pub api_token: String,
    /// Empty disables notifications
    #[serde(rename = "DISCORD_WEBHOOK_URL")]
    pub webhook_url: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("dns_records", &self.dns_records)
            .field("zone_id", &self.zone_id)
            .field("api_token", &"<redacted>")
            .field("webhook_url", &self.webhook_url)
            .finish()
    }
}

impl Settings {
    /// Load and validate a config file. Files ending in `.toml` are read as
    /// TOML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                DdnsError::config(format!("Configuration file {} not found", path.display()))
            }
            _ => DdnsError::config(format!(
                "Cannot read configuration file {}: {}",
                path.display(),
                e
            )),
        })?;

        let parsed = if is_toml(path) {
            toml::from_str::<Settings>(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Settings>(&content).map_err(|e| e.to_string())
        };

        let settings = parsed.map_err(|e| {
            DdnsError::config(format!(
                "Invalid configuration file {}. Please refer to the documentation. {}",
                path.display(),
                e
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Everything except the webhook URL has to be filled in.
    pub fn validate(&self) -> Result<()> {
        if self.dns_records.is_empty() {
            return Err(DdnsError::config("DNS_RECORDS must list at least one record"));
        }
        if self.dns_records.iter().any(|r| r.trim().is_empty()) {
            return Err(DdnsError::config("DNS_RECORDS must not contain empty names"));
        }
        if self.zone_id.trim().is_empty() {
            return Err(DdnsError::config("CLOUDFLARE_ZONE_ID must not be empty"));
        }
        if self.api_token.trim().is_empty() {
            return Err(DdnsError::config("CLOUDFLARE_ZONE_API_TOKEN must not be empty"));
        }
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_json_config() {
        let file = write_config(
            ".json",
            r#"{
  "DNS_RECORDS": ["example.com", "home.example.com"],
  "CLOUDFLARE_ZONE_ID": "zone123",
  "CLOUDFLARE_ZONE_API_TOKEN": "token",
  "DISCORD_WEBHOOK_URL": ""
}"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.dns_records, vec!["example.com", "home.example.com"]);
        assert_eq!(settings.zone_id, "zone123");
        assert_eq!(settings.api_token, "token");
        assert!(settings.webhook_url.is_empty());
    }

    #[test]
    fn test_parse_toml_config() {
        let file = write_config(
            ".toml",
            r#"
DNS_RECORDS = ["example.com"]
CLOUDFLARE_ZONE_ID = "zone123"
CLOUDFLARE_ZONE_API_TOKEN = "token"
DISCORD_WEBHOOK_URL = "https://discord.com/api/webhooks/1/abc"
"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.dns_records, vec!["example.com"]);
        assert_eq!(settings.webhook_url, "https://discord.com/api/webhooks/1/abc");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, DdnsError::Config(_)));
        assert!(err.to_string().ends_with("not found"));
    }

    #[test]
    fn test_missing_key_is_invalid() {
        let file = write_config(
            ".json",
            r#"{"DNS_RECORDS": ["example.com"], "CLOUDFLARE_ZONE_ID": "zone123"}"#,
        );

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, DdnsError::Config(_)));
        assert!(err.to_string().contains("Please refer to the documentation"));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let valid = Settings {
            dns_records: vec!["example.com".to_string()],
            zone_id: "zone123".to_string(),
            api_token: "token".to_string(),
            webhook_url: String::new(),
        };
        assert!(valid.validate().is_ok());

        let no_records = Settings {
            dns_records: vec![],
            ..valid.clone()
        };
        assert!(no_records.validate().is_err());

        let blank_record = Settings {
            dns_records: vec!["".to_string()],
            ..valid.clone()
        };
        assert!(blank_record.validate().is_err());

        let no_zone = Settings {
            zone_id: String::new(),
            ..valid.clone()
        };
        assert!(no_zone.validate().is_err());

        let no_token = Settings {
            api_token: " ".to_string(),
            ..valid
        };
        assert!(no_token.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = Settings {
            dns_records: vec!["example.com".to_string()],
            zone_id: "zone123".to_string(),
            api_token: "super_secret".to_string(),
            webhook_url: String::new(),
        };
        assert!(!format!("{:?}", settings).contains("super_secret"));
    }
}
