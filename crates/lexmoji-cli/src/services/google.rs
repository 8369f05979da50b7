//! Translator backed by Google's public `translate_a/single` endpoint.

use std::time::Duration;

use lexmoji::{TranslateError, Translator};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

const TIMEOUT: Duration = Duration::from_secs(10);

pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(TIMEOUT).build()?,
            endpoint: endpoint.into(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, word: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let body: Value = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", word),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|e| TranslateError::Backend(Box::new(e)))?;

        let translated = parse_translation(&body).ok_or_else(|| TranslateError::Empty {
            word: word.to_string(),
        })?;
        debug!(word, translated = %translated, "google translation");
        Ok(translated)
    }
}

/// Joins the translated segments of a `translate_a/single` answer.
///
/// The answer looks like `[[["cat", "chat", null, null, 10]], null, "fr"]`:
/// the first element lists segments whose first item is the translation.
fn parse_translation(body: &Value) -> Option<String> {
    let text: String = body
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0)?.as_str())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_single_segment() {
        let body = json!([[["cat", "chat", null, null, 10]], null, "fr"]);
        assert_eq!(parse_translation(&body), Some("cat".to_string()));
    }

    #[test]
    fn joins_multiple_segments() {
        let body = json!([[["ice ", "glace ", null], ["cream", "crème", null]], null, "fr"]);
        assert_eq!(parse_translation(&body), Some("ice cream".to_string()));
    }

    #[test]
    fn unexpected_shapes_yield_none() {
        assert_eq!(parse_translation(&json!({"error": "quota"})), None);
        assert_eq!(parse_translation(&json!([null, null, "fr"])), None);
        assert_eq!(parse_translation(&json!([[["  ", "x"]]])), None);
    }
}
