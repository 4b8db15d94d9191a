//! Process configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. JSON config file (optional)
//! 3. environment: `HOST`, `PORT`, `DATABASE_URL`, `DATABASE_NAME`,
//!    `CORS_ORIGINS` (comma separated), `LOG_FORMAT`
//! 4. command-line flags

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

pub const DEFAULT_DATABASE_NAME: &str = "gold_signals";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Document store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `memory://`, `file://<dir>` or a directory path. Unset means no store.
    #[serde(default)]
    pub url: Option<String>,

    /// Database name; a subdirectory for file stores
    #[serde(default)]
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults, then the file if given, then the process environment.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = HttpServerConfig::parse_origins(&origins);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(name) = lookup("DATABASE_NAME").filter(|s| !s.trim().is_empty()) {
            self.database.name = Some(name);
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.log_format = LogFormat::parse(&format).ok_or_else(|| ConfigError::Invalid {
                key: "LOG_FORMAT",
                reason: format!("'{}' is not one of pretty, json", format),
            })?;
        }
        Ok(())
    }

    /// Checks the resolved configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "host",
                reason: "must not be empty".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                key: "port",
                reason: "must be > 0".to_string(),
            });
        }
        if let Some(name) = &self.database.name {
            let safe = name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if name.is_empty() || !safe {
                return Err(ConfigError::Invalid {
                    key: "database.name",
                    reason: format!("'{}' must be alphanumeric, '_' or '-'", name),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.name_or_default(), DEFAULT_DATABASE_NAME);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "9100"),
                ("DATABASE_URL", "memory://"),
                ("DATABASE_NAME", "signals"),
                ("CORS_ORIGINS", "https://a.example, https://b.example,"),
                ("LOG_FORMAT", "JSON"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.url.as_deref(), Some("memory://"));
        assert_eq!(config.database.name_or_default(), "signals");
        assert_eq!(
            config.server.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_empty_database_url_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"server": {"port": 8123}, "database": {"url": "memory://"}, "log_format": "json"}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url.as_deref(), Some("memory://"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_reported() {
        let err = AppConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_rejects_unsafe_database_name() {
        let mut config = AppConfig::default();
        config.database.name = Some("../escape".to_string());
        assert!(config.validate().is_err());

        config.database.name = Some("gold".to_string());
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
