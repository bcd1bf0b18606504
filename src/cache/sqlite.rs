use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::paths;

/// Identifies one cached translation: `source:target:text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
}

impl CacheKey {
    pub fn new(source_language: &str, target_language: &str, source_text: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            source_text: source_text.to_string(),
        }
    }

    /// Compute the stored hash for this key
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(
            format!(
                "{}:{}:{}",
                self.source_language, self.target_language, self.source_text
            )
            .as_bytes(),
        );
        hex::encode(hasher.finalize())
    }
}

/// SQLite-backed translation cache whose entries expire after a TTL.
pub struct CacheManager {
    db_path: PathBuf,
}

impl CacheManager {
    /// Opens the cache in the default cache directory.
    pub fn new() -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("translations.db"))
    }

    /// Opens (and initialises) the cache database at `db_path`.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        let manager = Self { db_path };
        manager.init_db()?;
        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL
            )",
            [],
        )
        .context("Failed to create translations table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cache_key ON translations(cache_key)",
            [],
        )
        .context("Failed to create index")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    /// Returns the cached translation if present and not expired.
    pub fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(
            "SELECT translated_text FROM translations WHERE cache_key = ?1 AND expires_at > ?2",
        )?;

        let result: Option<String> = stmt
            .query_row(params![key.digest(), unix_now()], |row| row.get(0))
            .ok();

        Ok(result)
    }

    /// Stores a translation valid for `ttl`, purging expired rows.
    pub fn put(&self, key: &CacheKey, translated_text: &str, ttl: Duration) -> Result<()> {
        let now = unix_now();
        let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO translations
             (cache_key, source_text, translated_text, source_language, target_language, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                key.digest(),
                key.source_text,
                translated_text,
                key.source_language,
                key.target_language,
                now,
                expires_at,
            ],
        )
        .context("Failed to insert translation into cache")?;

        conn.execute(
            "DELETE FROM translations WHERE expires_at <= ?1",
            params![now],
        )
        .context("Failed to purge expired translations")?;

        Ok(())
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
