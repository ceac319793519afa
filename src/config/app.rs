//! Application configuration (greetings.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the config file looked up in the base directory
pub const CONFIG_FILE: &str = "greetings.yml";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // Directory
    pub data_dir: String,
    pub db_file: String,
    pub public_dir: String,

    // Storage
    pub storage: StorageMode,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_file: "content.db".to_string(),
            public_dir: "public".to_string(),
            storage: StorageMode::File,
            server: ServerConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `ADMIN_USERNAME` / `ADMIN_PASSWORD` from the environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("ADMIN_USERNAME").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        );
    }

    fn apply_overrides(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            tracing::debug!("Admin username overridden from environment");
            self.admin.username = username;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            tracing::debug!("Admin password overridden from environment");
            self.admin.password = password;
        }
    }
}

/// Where content rows live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Single SQLite file under `data_dir`
    File,
    /// Process-lifetime SQLite database, lost on restart
    Memory,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Admin credentials for the content screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    /// Whether the built-in credentials are still in use
    pub fn is_default(&self) -> bool {
        let default = Self::default();
        self.username == default.username && self.password == default.password
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "changeme".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.db_file, "content.db");
        assert_eq!(config.storage, StorageMode::File);
        assert_eq!(config.server.port, 3000);
        assert!(config.admin.is_default());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
data_dir: store
storage: memory
server:
  port: 8080
admin:
  username: keeper
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data_dir, "store");
        assert_eq!(config.db_file, "content.db");
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.admin.username, "keeper");
        assert_eq!(config.admin.password, "changeme");
        assert!(!config.admin.is_default());
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("root".to_string()), Some(String::new()));
        assert_eq!(config.admin.username, "root");
        assert_eq!(config.admin.password, "changeme");
    }
}
