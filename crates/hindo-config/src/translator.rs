use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_from_lang() -> String {
    "ja".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `google` or `deepl`
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default)]
    pub api_key: String,
    /// Only used by DeepL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound for a single fallback call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
