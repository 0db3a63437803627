use async_trait::async_trait;
use hindo_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate client (`client=gtx` endpoint)
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_API_URL.to_string())
    }

    pub fn with_url(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", from.as_str()),
            ("tl", to.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
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

        let translated_text = parse_gtx_response(&json)
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
        }
    }
}

/// The first element is a list of `[translated, original, ...]` segments
fn parse_gtx_response(json: &serde_json::Value) -> Option<String> {
    let segments = json.get(0)?.as_array()?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0)?.as_str())
        .collect();

    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_segments() {
        let json = serde_json::json!([
            [["I am ", "私は", null, null, 10], ["a student", "学生です", null, null, 10]],
            null,
            "ja"
        ]);
        assert_eq!(parse_gtx_response(&json).as_deref(), Some("I am a student"));
    }

    #[test]
    fn single_word() {
        let json = serde_json::json!([[["dog", "犬", null, null, 10]], null, "ja"]);
        assert_eq!(parse_gtx_response(&json).as_deref(), Some("dog"));
    }

    #[test]
    fn unexpected_shape() {
        assert_eq!(parse_gtx_response(&serde_json::json!({ "error": 1 })), None);
        assert_eq!(parse_gtx_response(&serde_json::json!([null, null, "ja"])), None);
    }
}
