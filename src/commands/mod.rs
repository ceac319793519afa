//! CLI commands

pub mod clean;
pub mod init;
pub mod list;
pub mod preview;
