//! Application configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub data: Option<DataConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from the METEOBOARD_CONFIG path (TOML) if present,
    /// with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("METEOBOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let cfg = if Path::new(&path).exists() {
            let s = fs::read_to_string(&path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Path to the observation CSV (default combined_data.csv)
    pub fn csv_path(&self) -> PathBuf {
        self.data
            .as_ref()
            .and_then(|d| d.csv_path.clone())
            .unwrap_or_else(|| PathBuf::from("combined_data.csv"))
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_is_8080() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http_bind(), "0.0.0.0:8080");
    }

    #[test]
    fn default_csv_path() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.csv_path(), PathBuf::from("combined_data.csv"));
    }

    #[test]
    fn parses_optional_sections() {
        let cfg: AppConfig = toml::from_str(
            "[data]\ncsv_path = \"/var/data/station.csv\"\n\n[http]\nbind = \"127.0.0.1:9000\"\n",
        )
        .unwrap();
        assert_eq!(cfg.csv_path(), PathBuf::from("/var/data/station.csv"));
        assert_eq!(cfg.http_bind(), "127.0.0.1:9000");
    }
}
