//! Cache store for persisting HTTP responses to disk
//!
//! Provides a `CacheStore` that keeps every cached response in one JSON object,
//! keyed by request key, and rewrites the whole document on every insertion.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Best-effort persistent mapping from request key to response body
///
/// Raw page bodies are stored as JSON strings and decoded API responses as
/// JSON values, side by side in the same document. The store is opened once
/// and every `insert` is flushed to disk immediately, so entries are visible
/// both to later lookups in this process and to later runs.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache document
    path: PathBuf,
    /// Entries currently held in memory
    entries: BTreeMap<String, Value>,
}

impl CacheStore {
    /// Opens the cache document at `path`
    ///
    /// Never fails: a missing or unreadable document yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        debug!(path = %path.display(), entries = entries.len(), "opened cache");
        Self { path, entries }
    }

    /// Reads the cache document at `path`
    ///
    /// Returns an empty map if the file doesn't exist, isn't valid UTF-8, isn't
    /// valid JSON, or isn't a JSON object. The cache is advisory, so these
    /// failures are logged and otherwise ignored.
    pub fn load(path: &Path) -> BTreeMap<String, Value> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cache unreadable, starting empty");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cache malformed, starting empty");
                BTreeMap::new()
            }
        }
    }

    /// Writes every entry to the cache document, replacing its previous contents
    ///
    /// Creates the parent directory if it is missing. The write is not atomic;
    /// a torn file is read back as an empty cache.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)
    }

    /// Returns the stored response for `key`, if any
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key` and flushes the whole store to disk
    ///
    /// The entry stays in memory even if the flush fails.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> std::io::Result<()> {
        self.entries.insert(key.into(), value);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing cache document
    pub fn path(&self) -> &Path {
        &self.path
    }
}
