use async_trait::async_trait;
use hindo_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// DeepL REST API client
#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let params = [
            ("text", text),
            ("source_lang", &from.to_uppercase()),
            ("target_lang", &to.to_uppercase()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = parse_deepl_response(&json)
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text,
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}

fn parse_deepl_response(json: &serde_json::Value) -> Option<String> {
    json["translations"]
        .get(0)
        .and_then(|t| t["text"].as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_translation() {
        let json = serde_json::json!({
            "translations": [{ "detected_source_language": "JA", "text": "dog" }]
        });
        assert_eq!(parse_deepl_response(&json).as_deref(), Some("dog"));
    }

    #[test]
    fn missing_translations() {
        assert_eq!(parse_deepl_response(&serde_json::json!({ "message": "x" })), None);
    }

    #[tokio::test]
    async fn missing_key_is_rejected_before_request() {
        let translator = DeepLTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let result = translator
            .translate("犬", "ja".to_string(), "en".to_string())
            .await;
        assert!(matches!(result, Err(TranslateError::AuthenticationError)));
    }
}
