//! Daemon configuration file (TOML)
//!
//! Every section is optional; missing keys fall back to defaults.
//!
//! ```toml
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [database]
//! path = "$HOME/.reforge/db"
//!
//! [economy]
//! starting_balance = 100.0
//! scan_fee_percent = 5
//! min_scan_fee = 10.0
//! sell_back_percent = 90
//!
//! [catalog]
//! seed_file = "config/catalog.json"
//! import_on_start = true
//! ```

use reforge_ledger::EconomyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub economy: EconomyConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON seed document with items and cases
    pub seed_file: Option<String>,
    /// Import `seed_file` every time the daemon starts
    pub import_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            economy: EconomyConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/reforge.db".to_string(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.economy.validate().map_err(ConfigError::Invalid)?;
        if self.catalog.import_on_start && self.catalog.seed_file.is_none() {
            return Err(ConfigError::Invalid(
                "catalog.import_on_start requires catalog.seed_file".to_string(),
            ));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {}", e)))
    }

    pub fn database_path(&self) -> String {
        expand_path(&self.database.path)
    }

    pub fn seed_file(&self) -> Option<String> {
        self.catalog.seed_file.as_deref().map(expand_path)
    }
}

fn expand_path(path: &str) -> String {
    path.replace("$HOME", &std::env::var("HOME").unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reforge_core::Amount;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
        assert_eq!(config.economy.starting_balance, Amount::from_units(100));
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            log_level = "debug"

            [server]
            port = 9100

            [economy]
            min_scan_fee = 2.5
            sell_back_percent = 80
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.economy.min_scan_fee, Amount::from_cents(250));
        assert_eq!(config.economy.sell_back_percent, 80);
        assert_eq!(config.economy.scan_fee_percent, 5);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::parse("[economy]\nscan_fee_percent = 150"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[server]\nhost = \"not a host\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[catalog]\nimport_on_start = true"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[server]\nport = \"eighty\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = Config::parse(include_str!("../../config/reforged.toml")).unwrap();
        assert!(config.catalog.import_on_start);
        assert_eq!(config.economy, EconomyConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"/tmp/reforge-test\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database_path(), "/tmp/reforge-test");

        assert!(matches!(
            Config::load("/nonexistent/reforged.toml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
