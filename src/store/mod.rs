//! Content store backed by SQLite
//!
//! A single `content` table holds every [`ContentItem`]. The store can live
//! in a file under the data directory or in memory; both behave the same
//! except that the in-memory one is gone when the process exits.

mod error;

pub use error::StoreError;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::config::StorageMode;
use crate::content::{seed, ContentItem, ContentPatch, ContentType};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS content (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    imageUrl TEXT,
    videoUrl TEXT,
    category TEXT NOT NULL,
    tags TEXT NOT NULL,
    enabled INTEGER NOT NULL DEFAULT 1,
    createdAt TEXT NOT NULL
)";

const COLUMNS: &str =
    "id, type, title, content, imageUrl, videoUrl, category, tags, enabled, createdAt";

/// Which database the store ended up on, for startup logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Backend {
    File(PathBuf),
    Memory,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::File(path) => write!(f, "file {}", path.display()),
            Backend::Memory => f.write_str("in-memory"),
        }
    }
}

/// Persistent collection of content items
pub struct ContentStore {
    conn: Mutex<Connection>,
    backend: Backend,
}

impl ContentStore {
    /// Open (or create) a database file, creating its directory if needed
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            backend: Backend::File(path.to_path_buf()),
        })
    }

    /// Open a process-lifetime database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            backend: Backend::Memory,
        })
    }

    /// Open the requested backend and initialize it.
    ///
    /// A file backend that cannot be opened or initialized is replaced by an
    /// in-memory one, so callers always get a usable store.
    pub fn bootstrap(mode: StorageMode, db_path: &Path) -> Result<Self, StoreError> {
        if mode == StorageMode::File {
            let opened = Self::open_file(db_path).and_then(|store| {
                store.initialize()?;
                Ok(store)
            });
            match opened {
                Ok(store) => {
                    tracing::info!("Using file-based database at {:?}", db_path);
                    return Ok(store);
                }
                Err(e) => {
                    tracing::warn!(
                        "File-based database at {:?} failed ({}), using in-memory database",
                        db_path,
                        e
                    );
                }
            }
        }

        let store = Self::open_in_memory()?;
        store.initialize()?;
        tracing::info!("Using in-memory database");
        Ok(store)
    }

    pub(crate) fn backend(&self) -> &Backend {
        &self.backend
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Create the table and seed it when empty. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?;
        if count == 0 {
            let items = seed::default_content();
            for item in &items {
                insert(&tx, item)?;
            }
            tracing::info!("Seeded {} default content items", items.len());
        }
        tx.commit()?;
        Ok(())
    }

    /// Number of stored items
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All items, newest first
    pub fn list_all(&self) -> Result<Vec<ContentItem>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM content ORDER BY createdAt DESC, rowid DESC",
            COLUMNS
        ))?;
        let rows = stmt.query_map([], RawRow::from_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.into_item()?);
        }
        Ok(items)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<ContentItem>, StoreError> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    /// Insert a new item; the id must not exist yet
    pub fn create(&self, item: ContentItem) -> Result<ContentItem, StoreError> {
        let item = item.normalized();
        let conn = self.lock()?;
        if fetch(&conn, &item.id)?.is_some() {
            return Err(StoreError::Duplicate(item.id));
        }
        insert(&conn, &item)?;
        tracing::debug!("Created content {}", item.id);
        Ok(item)
    }

    /// Merge `patch` onto the stored item. `None` if the id is unknown.
    pub fn update(&self, id: &str, patch: ContentPatch) -> Result<Option<ContentItem>, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(mut item) = fetch(&tx, id)? else {
            return Ok(None);
        };
        item.apply(patch);
        let item = item.normalized();

        tx.execute(
            "UPDATE content
             SET type = ?1, title = ?2, content = ?3, imageUrl = ?4, videoUrl = ?5,
                 category = ?6, tags = ?7, enabled = ?8
             WHERE id = ?9",
            params![
                item.kind.as_str(),
                item.title,
                item.content,
                item.image_url,
                item.video_url,
                serde_json::to_string(&item.category)?,
                serde_json::to_string(&item.tags)?,
                item.enabled,
                id,
            ],
        )?;
        tx.commit()?;
        tracing::debug!("Updated content {}", id);
        Ok(Some(item))
    }

    /// Remove an item. Returns whether a row was deleted.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let changes = conn.execute("DELETE FROM content WHERE id = ?1", params![id])?;
        if changes > 0 {
            tracing::debug!("Deleted content {}", id);
        }
        Ok(changes > 0)
    }
}

fn fetch(conn: &Connection, id: &str) -> Result<Option<ContentItem>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {} FROM content WHERE id = ?1", COLUMNS),
            params![id],
            RawRow::from_row,
        )
        .optional()?;
    raw.map(RawRow::into_item).transpose()
}

fn insert(conn: &Connection, item: &ContentItem) -> Result<(), StoreError> {
    conn.execute(
        &format!(
            "INSERT INTO content ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            COLUMNS
        ),
        params![
            item.id,
            item.kind.as_str(),
            item.title,
            item.content,
            item.image_url,
            item.video_url,
            serde_json::to_string(&item.category)?,
            serde_json::to_string(&item.tags)?,
            item.enabled,
            format_timestamp(&item.created_at),
        ],
    )?;
    Ok(())
}

/// Fixed nanosecond precision keeps text order equal to time order
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Column values as stored, before JSON and timestamp decoding
struct RawRow {
    id: String,
    kind: String,
    title: String,
    content: String,
    image_url: Option<String>,
    video_url: Option<String>,
    category: String,
    tags: String,
    enabled: i64,
    created_at: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            image_url: row.get(4)?,
            video_url: row.get(5)?,
            category: row.get(6)?,
            tags: row.get(7)?,
            enabled: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_item(self) -> Result<ContentItem, StoreError> {
        let kind = self.kind.parse::<ContentType>().map_err(|message| StoreError::InvalidRow {
            id: self.id.clone(),
            message,
        })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::InvalidRow {
                id: self.id.clone(),
                message: format!("bad createdAt {:?}: {}", self.created_at, e),
            })?
            .with_timezone(&Utc);

        Ok(ContentItem {
            kind,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            video_url: self.video_url,
            category: serde_json::from_str(&self.category)?,
            tags: serde_json::from_str(&self.tags)?,
            enabled: self.enabled == 1,
            created_at,
            id: self.id,
        })
    }
}
