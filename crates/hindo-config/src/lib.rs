use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::pipeline::PipelineConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod pipeline;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables that are set
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("HINDO_DATASET_DIR") {
            self.dictionary.dataset_dir = PathBuf::from(dir);
        }

        if let Ok(file) = env::var("HINDO_CACHE_FILE") {
            self.dictionary.cache_file = PathBuf::from(file);
        }

        if let Ok(dir) = env::var("HINDO_TRANSCRIPTS_DIR") {
            self.pipeline.transcripts_dir = PathBuf::from(dir);
        }

        if let Ok(file) = env::var("HINDO_OUTPUT") {
            self.pipeline.output_file = PathBuf::from(file);
        }

        if let Some(workers) = env::var("HINDO_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
        {
            self.pipeline.workers = Some(workers);
        }

        if let Ok(key) = env::var("TRANSLATOR_API_KEY") {
            self.translator.api_key = key;
        }

        if let Some(timeout_ms) = env::var("TRANSLATOR_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.translator.timeout_ms = timeout_ms;
        }
    }
}
