//! Initialize a new greetings site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# greetings-rs configuration

# Directory
data_dir: data
db_file: content.db
public_dir: public

# Storage: file keeps content across restarts, memory does not
storage: file

# Server
server:
  ip: localhost
  port: 3000

# Admin screen login
# ADMIN_USERNAME / ADMIN_PASSWORD in the environment take precedence
admin:
  username: admin
  password: changeme
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("data"))?;
    fs::create_dir_all(target_dir.join("public"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
        tracing::info!("Created {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, StorageMode};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.storage, StorageMode::File);
        assert!(config.admin.is_default());
    }

    #[test]
    fn test_init_site_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "storage: memory\n").unwrap();

        init_site(dir.path()).unwrap();

        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("public").is_dir());
        let kept = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(kept, "storage: memory\n");
    }
}
