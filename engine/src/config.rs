use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chunk::{ChunkOptions, DEFAULT_ARRAY_THRESHOLD, DEFAULT_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BotConfig {
    pub cache_dir: PathBuf,
    pub chunk: ChunkSettings,
    /// Bestiary JSON files to index; the built-in sample is used when empty.
    pub bestiary: Vec<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./cache"),
            chunk: ChunkSettings::default(),
            bestiary: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ChunkSettings {
    pub capacity: usize,
    pub array_threshold: usize,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            array_threshold: DEFAULT_ARRAY_THRESHOLD,
        }
    }
}

impl From<ChunkSettings> for ChunkOptions {
    fn from(s: ChunkSettings) -> Self {
        ChunkOptions {
            capacity: s.capacity,
            array_threshold: s.array_threshold,
        }
    }
}

impl BotConfig {
    /// Defaults when `path` is `None`; YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_str_for(path, &text)
    }

    /// Parse `text` using the format implied by `path`'s extension.
    pub fn from_str_for(path: &Path, text: &str) -> Result<Self> {
        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let cfg = if yaml {
            serde_yaml::from_str(text)
                .with_context(|| format!("failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(text)
                .with_context(|| format!("failed to parse JSON config: {}", path.display()))?
        };
        Ok(cfg)
    }

    pub fn chunk_options(&self) -> ChunkOptions {
        self.chunk.into()
    }
}
