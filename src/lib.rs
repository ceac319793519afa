//! greetings-rs: personalized greeting-card content server
//!
//! This crate stores a library of greeting content (quotes, shayri, jokes,
//! media) in SQLite, selects and shuffles it per audience, fills visitor
//! placeholders, and serves it over a small JSON API with an admin login.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::StorageMode;
use store::ContentStore;

/// The main application
#[derive(Clone)]
pub struct Greetings {
    /// Application configuration
    pub config: config::AppConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Data directory holding the database file
    pub data_dir: PathBuf,
    /// Front-end bundle served for non-API paths
    pub public_dir: PathBuf,
}

impl Greetings {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::AppConfig::load(&config_path)?
        } else {
            config::AppConfig::default()
        };
        config.apply_env_overrides();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already resolved configuration
    pub fn with_config(base_dir: PathBuf, config: config::AppConfig) -> Self {
        let data_dir = base_dir.join(&config.data_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            data_dir,
            public_dir,
        }
    }

    /// Path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.db_file)
    }

    /// Open and initialize the content store
    pub fn open_store(&self, force_memory: bool) -> Result<ContentStore> {
        let mode = if force_memory {
            StorageMode::Memory
        } else {
            self.config.storage
        };
        Ok(ContentStore::bootstrap(mode, &self.db_path())?)
    }

    /// Remove the database file
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
