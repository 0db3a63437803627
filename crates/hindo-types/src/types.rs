use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Text written to the translation column when neither the dictionary nor
/// the fallback translator produced anything.
pub const NO_DEFINITION: &str = "no definition found";

/// Surface token -> occurrence count
pub type FrequencyTable = HashMap<String, u64>;

/// Where a row's translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupSource {
    Dictionary,
    Fallback,
    Failed,
}

impl LookupSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupSource::Dictionary => "dictionary",
            LookupSource::Fallback => "fallback",
            LookupSource::Failed => "failed",
        }
    }
}

/// Result of resolving a single term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found { definition: String, reading: String },
    FallbackUsed { definition: String },
    FallbackFailed,
}

impl LookupOutcome {
    pub fn source(&self) -> LookupSource {
        match self {
            LookupOutcome::Found { .. } => LookupSource::Dictionary,
            LookupOutcome::FallbackUsed { .. } => LookupSource::Fallback,
            LookupOutcome::FallbackFailed => LookupSource::Failed,
        }
    }

    /// Flatten into `(definition, reading)` as written to the table
    pub fn into_parts(self) -> (String, String) {
        match self {
            LookupOutcome::Found {
                definition,
                reading,
            } => (definition, reading),
            LookupOutcome::FallbackUsed { definition } => (definition, String::new()),
            LookupOutcome::FallbackFailed => (NO_DEFINITION.to_string(), String::new()),
        }
    }
}

/// One row of the ranked frequency table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub rank: usize,
    pub term: String,
    pub reading: String,
    pub translation: String,
    pub frequency: u64,
    /// Not persisted, only used for reporting
    pub source: LookupSource,
}

impl RankedRow {
    pub fn new(rank: usize, term: String, frequency: u64, outcome: LookupOutcome) -> Self {
        let source = outcome.source();
        let (translation, reading) = outcome.into_parts();

        Self {
            rank,
            term,
            reading,
            translation,
            frequency,
            source,
        }
    }

    /// Fields in table column order
    pub fn to_record(&self) -> [String; 5] {
        [
            self.rank.to_string(),
            self.term.clone(),
            self.reading.clone(),
            self.translation.clone(),
            self.frequency.to_string(),
        ]
    }
}
