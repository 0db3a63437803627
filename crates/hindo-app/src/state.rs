use std::sync::Arc;

use hindo_config::Config;
use hindo_config::pipeline::PipelineConfig;
use hindo_config::translator::TranslatorConfig;
use hindo_core::{TermLookup, Tokenizer};
use hindo_lang_japanese::{
    DeepLTranslator, GoogleTranslator, JapaneseLookup, LookupOptions, MecabTokenizer,
    WhitespaceTokenizer,
};
use hindo_translator::Translator;

/// Everything a run needs, wired from the config
pub struct AppState {
    pub config: Config,
    pub lookup: Arc<dyn TermLookup>,
    pub tokenizer: Arc<dyn Tokenizer>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = build_translator(&config.translator);
        let options = LookupOptions::from_config(&config.dictionary, &config.translator);
        let lookup = Arc::new(JapaneseLookup::new(
            config.dictionary.clone(),
            translator,
            options,
        ));
        let tokenizer = build_tokenizer(&config.pipeline)?;

        Ok(Self {
            config,
            lookup,
            tokenizer,
        })
    }
}

pub fn build_translator(config: &TranslatorConfig) -> Option<Arc<dyn Translator>> {
    if !config.enabled {
        tracing::info!("Translation fallback disabled");
        return None;
    }

    let translator: Arc<dyn Translator> = match config.provider.as_str() {
        "google" => Arc::new(GoogleTranslator::new()),
        "deepl" => {
            if config.api_key.is_empty() {
                tracing::warn!("DeepL selected without an API key, fallback disabled");
                return None;
            }
            Arc::new(DeepLTranslator::new(
                config.api_key.clone(),
                config.api_url.clone(),
            ))
        }
        other => {
            tracing::warn!("Unknown translation provider '{}', fallback disabled", other);
            return None;
        }
    };

    tracing::info!("Translation fallback: {}", translator.metadata().name);
    Some(translator)
}

pub fn build_tokenizer(config: &PipelineConfig) -> anyhow::Result<Arc<dyn Tokenizer>> {
    match config.tokenizer.as_str() {
        "mecab" => Ok(Arc::new(MecabTokenizer::new(config.mecab_path.clone()))),
        "whitespace" => Ok(Arc::new(WhitespaceTokenizer)),
        other => anyhow::bail!("Unknown tokenizer '{}', expected mecab or whitespace", other),
    }
}
