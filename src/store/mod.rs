//! Artwork Store: SQLite catalog plus PNG files on disk, served over HTTP
//! by [`server`].

pub mod server;

pub use server::{router, serve, serve_listener};

use crate::gallery::Artwork;
use crate::rendering::PNG_DATA_URL_PREFIX;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    BadRequest(String),

    /// Missing or unparsable form field
    #[error("{0}")]
    InvalidForm(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

/// Store server settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Address to listen on
    pub bind: String,
    /// Holds `pixel.db` and the `art/` directory
    pub data_dir: PathBuf,
    /// Page size for `GET /api/art` without `limit`
    pub default_limit: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            data_dir: PathBuf::from("pixel-data"),
            default_limit: 100,
        }
    }
}

/// The catalog. Not `Sync`; the server keeps it behind a mutex.
pub struct ArtStore {
    conn: Connection,
    art_dir: PathBuf,
}

impl ArtStore {
    /// Open (creating if needed) `data_dir/pixel.db` and `data_dir/art/`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let art_dir = data_dir.join("art");
        std::fs::create_dir_all(&art_dir)?;

        let db_path = data_dir.join("pixel.db");
        let conn = Connection::open(&db_path)?;
        log::info!("catalog at {}", db_path.display());

        let store = ArtStore { conn, art_dir };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS artworks (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                filename    TEXT NOT NULL,
                width       INTEGER NOT NULL,
                height      INTEGER NOT NULL,
                created_at  TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn art_dir(&self) -> &Path {
        &self.art_dir
    }

    /// Decode a `data:image/png;base64,` URL, write the file and record it
    pub fn save_data_url(&self, data_url: &str, width: u32, height: u32) -> StoreResult<Artwork> {
        let encoded = data_url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or_else(|| StoreError::BadRequest("Only PNG data URLs supported".into()))?;
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|_| StoreError::BadRequest("Invalid data URL".into()))?;

        let now = chrono::Utc::now();
        let created_at = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let (filename, path) = self.free_filename(now.timestamp_millis());
        std::fs::write(&path, &raw)?;

        let inserted = self.conn.execute(
            "INSERT INTO artworks (filename, width, height, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![filename, width, height, created_at],
        );
        if let Err(e) = inserted {
            let _ = std::fs::remove_file(&path);
            return Err(e.into());
        }
        let id = self.conn.last_insert_rowid();
        log::info!("saved artwork #{} ({}x{}, {} bytes) as {}", id, width, height, raw.len(), filename);

        Ok(Artwork {
            id,
            filename,
            width,
            height,
            created_at,
            url: art_url(id),
        })
    }

    /// `art_{millis}.png`, bumping the stamp while the name is taken
    fn free_filename(&self, mut millis: i64) -> (String, PathBuf) {
        loop {
            let name = format!("art_{}.png", millis);
            let path = self.art_dir.join(&name);
            if !path.exists() {
                return (name, path);
            }
            millis += 1;
        }
    }

    /// Newest first
    pub fn list(&self, limit: u32) -> StoreResult<Vec<Artwork>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, filename, width, height, created_at FROM artworks
             ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], |row| {
            let id: i64 = row.get(0)?;
            Ok(Artwork {
                id,
                filename: row.get(1)?,
                width: row.get(2)?,
                height: row.get(3)?,
                created_at: row.get(4)?,
                url: art_url(id),
            })
        })?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn filename(&self, id: i64) -> StoreResult<String> {
        self.conn
            .query_row("SELECT filename FROM artworks WHERE id = ?1", [id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| StoreError::NotFound("Artwork not found".into()))
    }

    /// Path of the PNG for `id`; `NotFound` when the row or the file is gone
    pub fn image_path(&self, id: i64) -> StoreResult<PathBuf> {
        let path = self.art_dir.join(self.filename(id)?);
        if !path.exists() {
            return Err(StoreError::NotFound("File missing".into()));
        }
        Ok(path)
    }

    /// Remove the file (if still there) and the row
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let path = self.art_dir.join(self.filename(id)?);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        self.conn.execute("DELETE FROM artworks WHERE id = ?1", [id])?;
        log::info!("deleted artwork #{}", id);
        Ok(())
    }
}

pub fn art_url(id: i64) -> String {
    format!("/api/art/{}", id)
}
