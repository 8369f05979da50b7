//! HTTP clients for the external translation and suggestion services.

mod google;
mod openai;

pub use google::{GoogleTranslator, DEFAULT_TRANSLATE_URL};
pub use openai::{OpenAiSuggester, DEFAULT_MODEL, DEFAULT_SUGGEST_URL};
