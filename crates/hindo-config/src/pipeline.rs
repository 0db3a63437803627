use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_transcripts_dir() -> PathBuf {
    PathBuf::from("transcribed")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("word_frequency.csv")
}

fn default_tokenizer() -> String {
    "mecab".to_string()
}

fn default_mecab_path() -> String {
    "mecab".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(default = "default_transcripts_dir")]
    pub transcripts_dir: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// `mecab` or `whitespace`
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,
    #[serde(default = "default_mecab_path")]
    pub mecab_path: String,
    /// Enrichment workers, available parallelism when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            transcripts_dir: default_transcripts_dir(),
            output_file: default_output_file(),
            tokenizer: default_tokenizer(),
            mecab_path: default_mecab_path(),
            workers: None,
        }
    }
}
