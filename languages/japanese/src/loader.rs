use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hindo_core::{CacheError, DictionaryCache, DictionaryRecord};
use serde_json::Value;

const TERM_FIELD: usize = 0;
const READING_FIELD: usize = 1;
const GLOSSARY_FIELD: usize = 5;

/// Reads a Yomichan-format JMdict export (`term_bank_*.json`) into a cache
pub struct TermBankLoader;

impl TermBankLoader {
    /// Ingest every qualifying file of `dataset_dir`. Any bad file or record fails the build.
    pub fn build(dataset_dir: &Path, excluded: &[String]) -> Result<DictionaryCache, CacheError> {
        let start = Instant::now();
        let files = Self::dataset_files(dataset_dir, excluded)?;
        tracing::info!(
            "Building dictionary cache from {} files in {}",
            files.len(),
            dataset_dir.display()
        );

        let mut cache = DictionaryCache::new();
        let mut record_count = 0;
        for path in &files {
            let records = Self::load_file(path)?;
            tracing::debug!("{}: {} records", path.display(), records.len());
            record_count += records.len();
            for record in records {
                cache.insert(record);
            }
        }

        if cache.is_empty() {
            tracing::warn!("Dataset at {} produced no terms", dataset_dir.display());
        }

        tracing::info!(
            "Ingested {} records into {} terms in {} ms",
            record_count,
            cache.term_count(),
            start.elapsed().as_millis()
        );
        Ok(cache)
    }

    /// `*.json` files of the dataset, sorted by name, minus the excluded names
    pub fn dataset_files(dataset_dir: &Path, excluded: &[String]) -> Result<Vec<PathBuf>, CacheError> {
        if !dataset_dir.is_dir() {
            return Err(CacheError::DatasetNotFound(dataset_dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dataset_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            if excluded.iter().any(|skip| skip == name) {
                tracing::debug!("Skipping {}", path.display());
                continue;
            }

            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    pub fn load_file(path: &Path) -> Result<Vec<DictionaryRecord>, CacheError> {
        let json = fs::read_to_string(path)?;
        Self::parse_term_bank(path, &json)
    }

    /// Parse one term bank: a JSON array of positional records
    pub fn parse_term_bank(path: &Path, json: &str) -> Result<Vec<DictionaryRecord>, CacheError> {
        let rows: Vec<Value> = serde_json::from_str(json).map_err(|source| CacheError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                parse_record(row).map_err(|reason| CacheError::Malformed {
                    path: path.to_path_buf(),
                    index,
                    reason,
                })
            })
            .collect()
    }
}

fn parse_record(row: Value) -> Result<DictionaryRecord, String> {
    let Value::Array(mut fields) = row else {
        return Err("record is not an array".to_string());
    };

    if fields.len() <= GLOSSARY_FIELD {
        return Err(format!(
            "expected at least {} fields, found {}",
            GLOSSARY_FIELD + 1,
            fields.len()
        ));
    }

    let term = match fields[TERM_FIELD].take() {
        Value::String(term) => term,
        other => return Err(format!("term is not a string: {other}")),
    };

    let reading = match fields[READING_FIELD].take() {
        Value::String(reading) => reading,
        other => return Err(format!("reading is not a string: {other}")),
    };

    let senses = match fields[GLOSSARY_FIELD].take() {
        Value::Array(glosses) => glosses.into_iter().filter_map(gloss_text).collect(),
        other => return Err(format!("glossary is not an array: {other}")),
    };

    Ok(DictionaryRecord {
        term,
        reading,
        senses,
    })
}

/// Plain glosses, or the `text` of a structured gloss. Images and other content are dropped.
fn gloss_text(gloss: Value) -> Option<String> {
    match gloss {
        Value::String(text) => Some(text),
        Value::Object(mut object) => match object.remove("text") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        },
        _ => None,
    }
}
