//! Listener and CORS policy for the signals API
//!
//! The API is called from browser dashboards on other origins, so the
//! default policy admits any origin. Listing origins narrows it; a `*`
//! entry anywhere in the list keeps it open.

use serde::{Deserialize, Serialize};

const ANY_ORIGIN: &str = "*";

/// Where the API listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to bind, `0.0.0.0` unless overridden
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port, 8000 unless overridden
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins admitted by CORS
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port`, as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when no origin list narrows the CORS policy.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == ANY_ORIGIN)
    }

    /// Splits a comma separated origin list such as the `CORS_ORIGINS` value.
    /// Blank entries are dropped.
    pub fn parse_origins(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_admits_any_origin() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8000");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_origin_list_narrows_policy() {
        let origins = HttpServerConfig::parse_origins("https://gold.example, ,http://localhost:3000");
        let config = HttpServerConfig {
            cors_origins: origins,
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins,
            vec!["https://gold.example", "http://localhost:3000"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_wildcard_entry_keeps_policy_open() {
        let config = HttpServerConfig {
            cors_origins: HttpServerConfig::parse_origins("https://gold.example,*"),
            ..Default::default()
        };
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert!(config.cors_origins.is_empty());
    }
}
