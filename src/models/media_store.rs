//! Durable references to gallery media.
//!
//! The gallery persists only `{name, url}` records under a single key. Handles
//! such as object URLs may stop resolving after a reload; the records survive
//! anyway and it is up to the render surface to discover that.
//!
//! Two stores implement [`MediaPersistence`]:
//! - `MediaReferenceStore` - SQLite key/value table, the records JSON-encoded
//! - `MemoryStore` - in-process, used when no database can be opened and in tests

use std::path::Path;

use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{GalleryError, Result};
use crate::models::{MediaItem, StoredMedia};

/// Key under which the ordered gallery list is stored.
pub const GALLERY_KEY: &str = "videoGallery";

/// Collaborator that keeps the gallery list across sessions.
pub trait MediaPersistence {
    /// Reads the stored list. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<StoredMedia>>>;

    /// Replaces the stored list.
    fn save(&mut self, records: &[StoredMedia]) -> Result<()>;
}

/// Encodes records in the stored textual format.
pub fn encode_records(records: &[StoredMedia]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decodes the stored textual format.
pub fn decode_records(text: &str) -> Result<Vec<StoredMedia>> {
    serde_json::from_str(text).map_err(|e| GalleryError::PersistenceRead(e.to_string()))
}

/// Reads the gallery from `store`, treating missing or malformed data as empty.
pub fn hydrate_items(store: &dyn MediaPersistence) -> Vec<MediaItem> {
    match store.load() {
        Ok(Some(records)) => {
            debug!("Hydrated {} stored media references", records.len());
            records.into_iter().map(MediaItem::from_stored).collect()
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Ignoring stored gallery: {}", e);
            Vec::new()
        }
    }
}

/// SQLite-backed reference store.
pub struct MediaReferenceStore {
    conn: Connection,
}

impl MediaReferenceStore {
    /// Opens or creates the store at `path`.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store at {:?}", path))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )
        .context("Failed to configure SQLite pragmas")?;

        let store = Self::with_connection(conn)?;
        info!("Opened media reference store at {:?}", path);
        Ok(store)
    }

    /// Opens a store that lives only as long as this value.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            ",
        )
        .context("Failed to create store tables")?;

        Ok(Self { conn })
    }

    /// Raw stored text for `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores raw text under `key`, replacing what was there.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "
            INSERT INTO kv_store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value],
        )?;
        Ok(())
    }

    /// Forgets the stored gallery.
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![GALLERY_KEY])?;
        Ok(())
    }
}

impl MediaPersistence for MediaReferenceStore {
    fn load(&self) -> Result<Option<Vec<StoredMedia>>> {
        match self.get_raw(GALLERY_KEY)? {
            Some(text) => decode_records(&text).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, records: &[StoredMedia]) -> Result<()> {
        let text = encode_records(records)?;
        self.set_raw(GALLERY_KEY, &text)?;
        debug!("Stored {} media references", records.len());
        Ok(())
    }
}

/// In-process store holding the encoded text, as the SQLite store would.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    text: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw text, malformed or not.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl MediaPersistence for MemoryStore {
    fn load(&self) -> Result<Option<Vec<StoredMedia>>> {
        self.text.as_deref().map(decode_records).transpose()
    }

    fn save(&mut self, records: &[StoredMedia]) -> Result<()> {
        self.text = Some(encode_records(records)?);
        Ok(())
    }
}
