//! Remove the content database

use anyhow::Result;
use std::fs;

use crate::Greetings;

/// Delete the database file; the next start reseeds defaults
pub fn run(app: &Greetings) -> Result<()> {
    let db_path = app.db_path();
    if db_path.exists() {
        fs::remove_file(&db_path)?;
        tracing::info!("Deleted: {:?}", db_path);
    }

    Ok(())
}
