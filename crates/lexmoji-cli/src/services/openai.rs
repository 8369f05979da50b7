//! Suggestion source backed by an OpenAI-compatible chat completions API.

use std::time::Duration;

use lexmoji::{SuggestError, SuggestionRequest, SuggestionSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_SUGGEST_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAiSuggester {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Error)]
#[error("suggestion API error {status}: {body}")]
struct ApiError {
    status: u16,
    body: String,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

impl OpenAiSuggester {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(TIMEOUT).build()?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

impl SuggestionSource for OpenAiSuggester {
    fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestError> {
        let body = json!({
            "model": &self.model,
            "messages": [
                {"role": "user", "content": request.prompt()}
            ],
            "temperature": 0.3
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| SuggestError::Backend(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(SuggestError::Backend(Box::new(ApiError { status, body })));
        }

        let api_response: ApiResponse = response
            .json()
            .map_err(|e| SuggestError::Backend(Box::new(e)))?;
        first_content(api_response)
    }
}

fn first_content(response: ApiResponse) -> Result<String, SuggestError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(SuggestError::NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, SuggestError> {
        first_content(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn extracts_first_choice_content() {
        let body = r#"{"choices": [
            {"message": {"role": "assistant", "content": "{\"chat\": \"🐱\"}"}},
            {"message": {"role": "assistant", "content": "ignored"}}
        ]}"#;
        assert_eq!(parse(body).unwrap(), r#"{"chat": "🐱"}"#);
    }

    #[test]
    fn missing_or_blank_content_is_no_content() {
        assert!(matches!(parse(r#"{"choices": []}"#), Err(SuggestError::NoContent)));
        assert!(matches!(
            parse(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(SuggestError::NoContent)
        ));
        assert!(matches!(
            parse(r#"{"choices": [{"message": {"content": "  "}}]}"#),
            Err(SuggestError::NoContent)
        ));
    }

    #[test]
    fn api_error_displays_status() {
        let err = ApiError {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "suggestion API error 429: rate limited");
    }
}
