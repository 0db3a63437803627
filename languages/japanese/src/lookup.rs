use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hindo_config::dictionary::DictionaryConfig;
use hindo_config::translator::TranslatorConfig;
use hindo_core::{CacheError, DictionaryCache, TermLookup};
use hindo_translator::Translator;
use hindo_types::LookupOutcome;
use tokio::sync::OnceCell;

use crate::dictionary::JapaneseDictionary;

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub max_senses: usize,
    pub from_lang: String,
    pub to_lang: String,
    pub fallback_timeout: Duration,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            max_senses: 3,
            from_lang: "ja".to_string(),
            to_lang: "en".to_string(),
            fallback_timeout: Duration::from_secs(10),
        }
    }
}

impl LookupOptions {
    pub fn from_config(dictionary: &DictionaryConfig, translator: &TranslatorConfig) -> Self {
        Self {
            max_senses: dictionary.max_senses,
            from_lang: translator.from_lang.clone(),
            to_lang: translator.to_lang.clone(),
            fallback_timeout: Duration::from_millis(translator.timeout_ms),
        }
    }
}

/// JMdict lookup with a translation fallback for terms the dictionary lacks
pub struct JapaneseLookup {
    dictionary: DictionaryConfig,
    cache: OnceCell<Arc<DictionaryCache>>,
    translator: Option<Arc<dyn Translator>>,
    options: LookupOptions,
}

impl JapaneseLookup {
    pub fn new(
        dictionary: DictionaryConfig,
        translator: Option<Arc<dyn Translator>>,
        options: LookupOptions,
    ) -> Self {
        Self {
            dictionary,
            cache: OnceCell::new(),
            translator,
            options,
        }
    }

    /// Use an already loaded cache instead of the cache file
    pub fn with_cache(mut self, cache: DictionaryCache) -> Self {
        self.cache = OnceCell::from(Arc::new(cache));
        self
    }

    /// Load or build the cache on first use. Concurrent callers wait for the single build.
    async fn cache(&self) -> Result<&Arc<DictionaryCache>, CacheError> {
        self.cache
            .get_or_try_init(|| async {
                let config = self.dictionary.clone();
                let cache = tokio::task::spawn_blocking(move || {
                    JapaneseDictionary::load_or_build(&config)
                })
                .await
                .map_err(|e| CacheError::Io(std::io::Error::other(e)))??;
                Ok::<_, CacheError>(Arc::new(cache))
            })
            .await
    }

    async fn fallback(&self, term: &str) -> LookupOutcome {
        let Some(translator) = &self.translator else {
            tracing::debug!("No translator configured, '{}' left undefined", term);
            return LookupOutcome::FallbackFailed;
        };

        let request = translator.translate(
            term,
            self.options.from_lang.clone(),
            self.options.to_lang.clone(),
        );

        match tokio::time::timeout(self.options.fallback_timeout, request).await {
            Ok(Ok(translation)) if !translation.text.trim().is_empty() => {
                tracing::debug!("'{}' translated by {}", term, translation.provider);
                LookupOutcome::FallbackUsed {
                    definition: translation.text,
                }
            }
            Ok(Ok(_)) => {
                tracing::warn!("Empty translation for '{}'", term);
                LookupOutcome::FallbackFailed
            }
            Ok(Err(e)) => {
                tracing::warn!("Translation failed for '{}': {}", term, e);
                LookupOutcome::FallbackFailed
            }
            Err(_) => {
                tracing::warn!(
                    "Translation for '{}' timed out after {:?}",
                    term,
                    self.options.fallback_timeout
                );
                LookupOutcome::FallbackFailed
            }
        }
    }
}

#[async_trait]
impl TermLookup for JapaneseLookup {
    async fn ready(&self) -> Result<(), CacheError> {
        self.cache().await.map(|_| ())
    }

    async fn lookup(&self, term: &str) -> LookupOutcome {
        let cache = match self.cache().await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::error!("Dictionary unavailable for '{}': {}", term, e);
                return self.fallback(term).await;
            }
        };

        let definition = cache.definition_text(term, self.options.max_senses);
        if definition.is_empty() {
            return self.fallback(term).await;
        }

        LookupOutcome::Found {
            definition,
            reading: cache.reading(term).unwrap_or_default().to_string(),
        }
    }
}
