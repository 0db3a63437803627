use hindo_config::dictionary::DictionaryConfig;
use hindo_core::{CacheError, DictionaryCache};

use crate::loader::TermBankLoader;

/// Owns the on-disk JMdict cache
pub struct JapaneseDictionary;

impl JapaneseDictionary {
    /// Load the cache file, building and saving it first when it is missing or empty
    pub fn load_or_build(config: &DictionaryConfig) -> Result<DictionaryCache, CacheError> {
        let cache = DictionaryCache::load(&config.cache_file)?;
        if !cache.is_empty() {
            return Ok(cache);
        }

        tracing::info!("Dictionary cache is empty, building it");
        Self::rebuild(config)
    }

    /// Build from the dataset and replace the cache file. Nothing is written on failure.
    pub fn rebuild(config: &DictionaryConfig) -> Result<DictionaryCache, CacheError> {
        let cache = TermBankLoader::build(&config.dataset_dir, &config.excluded_files)?;
        cache.save(&config.cache_file)?;
        Ok(cache)
    }
}
