use hindo_types::LookupOutcome;

use crate::dictionary::CacheError;

/// Resolves terms to definitions and readings
#[async_trait::async_trait]
pub trait TermLookup: Send + Sync {
    /// Make the backing dictionary available. Must finish before lookups run concurrently.
    async fn ready(&self) -> Result<(), CacheError>;

    /// Resolve a single term. Never fails; failures are reported in the outcome.
    async fn lookup(&self, term: &str) -> LookupOutcome;
}

/// Breaks transcript text into surface tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("Tokenizer process failed: {0}")]
    Process(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
