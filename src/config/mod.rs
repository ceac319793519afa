//! Configuration module

mod app;

pub use app::AdminConfig;
pub use app::AppConfig;
pub use app::ServerConfig;
pub use app::StorageMode;
pub use app::CONFIG_FILE;
