use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dataset_dir() -> PathBuf {
    PathBuf::from("jmdict_english")
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("cache.bin")
}

/// Manifest and tag bank of a Yomichan export; neither holds terms
fn default_excluded_files() -> Vec<String> {
    vec!["index.json".to_string(), "tag_bank_1.json".to_string()]
}

fn default_max_senses() -> usize {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Directory holding `term_bank_*.json` files
    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: PathBuf,
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
    #[serde(default = "default_excluded_files")]
    pub excluded_files: Vec<String>,
    /// Sense lists joined into a definition
    #[serde(default = "default_max_senses")]
    pub max_senses: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            dataset_dir: default_dataset_dir(),
            cache_file: default_cache_file(),
            excluded_files: default_excluded_files(),
            max_senses: default_max_senses(),
        }
    }
}
