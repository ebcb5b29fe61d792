//! File-backed cache of looked-up reference content.
//!
//! One JSON file per entry under `<root>/<category>/<key>.json`. Values are
//! stored and returned verbatim; nothing here re-runs lookups or chunking.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ContentKind;

#[derive(Debug, Clone)]
pub struct ReferenceCache {
    root: PathBuf,
}

impl ReferenceCache {
    /// Open the cache at `root`, creating the category directories.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let cache = Self { root: root.into() };
        for kind in [ContentKind::Spell, ContentKind::Monster] {
            let dir = cache.dir(kind);
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create cache dir: {}", dir.display()))?;
        }
        Ok(cache)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: ContentKind, name: &str) -> PathBuf {
        self.dir(kind).join(format!("{}.json", normalize_key(name)))
    }

    pub fn load<T: DeserializeOwned>(&self, kind: ContentKind, name: &str) -> Result<Option<T>> {
        let path = self.path_for(kind, name);
        if !path.exists() {
            debug!(%kind, name, "cache miss");
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read cache entry: {}", path.display()))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse cache entry: {}", path.display()))?;
        debug!(%kind, name, "cache hit");
        Ok(Some(value))
    }

    pub fn store<T: Serialize>(&self, kind: ContentKind, name: &str, value: &T) -> Result<()> {
        let path = self.path_for(kind, name);
        let text = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize cache entry: {}", path.display()))?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write cache entry: {}", path.display()))?;
        debug!(%kind, name, "cache stored");
        Ok(())
    }

    fn dir(&self, kind: ContentKind) -> PathBuf {
        let sub = match kind {
            ContentKind::Spell => "spells",
            ContentKind::Monster => "monsters",
        };
        self.root.join(sub)
    }
}

/// File stem for `name`: `"Tasha's Hideous Laughter"` becomes
/// `"tashas-hideous-laughter"`.
///
/// Apostrophes are dropped and every other run of characters outside
/// `[a-z0-9]` collapses to a single `-`, so a key never contains a path
/// separator or a `.` segment.
pub fn normalize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c == '\'' {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            key.push(c);
        } else if !key.is_empty() && !key.ends_with('-') {
            key.push('-');
        }
    }
    while key.ends_with('-') {
        key.pop();
    }
    if key.is_empty() {
        key.push('-');
    }
    key
}
