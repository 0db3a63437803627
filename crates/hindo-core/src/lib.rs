pub mod dictionary;
pub mod enrich;
pub mod frequency;
pub mod language;
pub mod ranking;

pub use dictionary::{CacheError, DictionaryCache, DictionaryRecord};
pub use enrich::{EnrichError, Enricher, EnrichmentStats};
pub use language::{TermLookup, TokenizeError, Tokenizer};
pub use ranking::{RankedTable, TableError};
