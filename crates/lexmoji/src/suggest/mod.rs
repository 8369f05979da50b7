//! Gap filling through an external generative suggestion source.

mod client;
mod response;

use bon::Builder;
use serde_json::Value;
use thiserror::Error;

use crate::BoxError;

pub use client::{
    BatchSuggestionClient, DEFAULT_BATCH_SIZE, DEFAULT_DELAY, DEFAULT_MAX_WORDS, SuggestReport,
};
pub use response::{ResponseError, Suggestions, parse_suggestions, strip_wrapping};

/// An external service that proposes one emoji per word.
///
/// The service returns its raw text payload; parsing is done by the caller
/// with [`parse_suggestions`] so that malformed answers degrade uniformly.
pub trait SuggestionSource {
    fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestError>;
}

impl<T: SuggestionSource + ?Sized> SuggestionSource for &T {
    fn suggest(&self, request: &SuggestionRequest) -> Result<String, SuggestError> {
        (**self).suggest(request)
    }
}

/// A failed suggestion request.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The backend could not be reached or rejected the request.
    #[error("suggestion backend failed: {0}")]
    Backend(#[source] BoxError),

    /// The backend answered without any content.
    #[error("suggestion backend returned no content")]
    NoContent,
}

/// One bounded batch of words to send to a [`SuggestionSource`].
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(on(String, into))]
pub struct SuggestionRequest {
    pub words: Vec<String>,

    /// Language the words are written in.
    #[builder(default = "French".to_string())]
    pub language: String,

    /// Who the emojis are chosen for.
    #[builder(default = "young children".to_string())]
    pub audience: String,
}

impl SuggestionRequest {
    /// Renders the instruction text asking for a strict JSON object.
    pub fn prompt(&self) -> String {
        let words = Value::from(self.words.clone());
        format!(
            "You are an emoji expert. For each {language} word below, suggest ONE single emoji \
             that visually represents the concept, chosen to be obvious to {audience}.\n\
             \n\
             STRICT RULES:\n\
             - Reply ONLY with a valid JSON object\n\
             - Format: {{\"word\": \"emoji\"}} where emoji is a single emoji character\n\
             - Use each word exactly as given as the key\n\
             - If no emoji really fits, use null\n\
             - No explanations, no extra text\n\
             \n\
             Words: {words}",
            language = self.language,
            audience = self.audience,
        )
    }
}
