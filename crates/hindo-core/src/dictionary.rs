use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// A single dictionary row: one sense for one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRecord {
    pub term: String,
    /// Kana reading, empty when the dataset has none
    pub reading: String,
    /// Glosses making up this sense
    pub senses: Vec<String>,
}

/// Term index materialized from a dictionary dataset.
///
/// `definitions` keeps every sense list seen for a term in ingestion order.
/// `hiragana_readings` keeps the reading of the last record seen for a term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryCache {
    pub definitions: HashMap<String, Vec<Vec<String>>>,
    pub hiragana_readings: HashMap<String, String>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record's sense to its term and overwrite the reading
    pub fn insert(&mut self, record: DictionaryRecord) {
        self.definitions
            .entry(record.term.clone())
            .or_default()
            .push(record.senses);
        self.hiragana_readings.insert(record.term, record.reading);
    }

    /// An empty cache needs a build before it can serve lookups
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn senses(&self, term: &str) -> &[Vec<String>] {
        self.definitions
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn reading(&self, term: &str) -> Option<&str> {
        self.hiragana_readings.get(term).map(String::as_str)
    }

    /// First `max_senses` sense lists, glosses joined by `", "` and senses by `"; "`
    pub fn definition_text(&self, term: &str, max_senses: usize) -> String {
        self.senses(term)
            .iter()
            .take(max_senses)
            .map(|sense| sense.join(", "))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Load a persisted cache. A missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            tracing::debug!("No cache at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        let cache: DictionaryCache = bincode::deserialize_from(BufReader::new(file))?;
        tracing::info!(
            "Loaded dictionary cache from {} ({} terms)",
            path.display(),
            cache.term_count()
        );
        Ok(cache)
    }

    /// Write the cache through a temp file in the target directory, then rename over `path`
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let parent_dir = parent_or_current(path);
        std::fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            bincode::serialize_into(&mut writer, self)?;
            writer.flush()?;
        }
        temp_file.persist(path)?;

        tracing::info!(
            "Saved dictionary cache to {} ({} terms)",
            path.display(),
            self.term_count()
        );
        Ok(())
    }
}

pub(crate) fn parent_or_current(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Dataset directory not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed record {index} in {path}: {reason}")]
    Malformed {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("Cache encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("Failed to persist cache: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
