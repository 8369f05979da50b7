//! Cross-language fallback: the translator boundary and its persistent cache.

mod cache;

use thiserror::Error;

use crate::BoxError;

pub use cache::{TranslationCache, TranslationOutcome};

/// An external machine-translation backend.
///
/// Implementations should be treated as unreliable: any call may fail on
/// network errors, timeouts or quotas. Callers go through
/// [`TranslationCache::translate`], which records failures so they are not
/// retried.
pub trait Translator {
    /// Translates a single word from `source` to `target` locale.
    fn translate(&self, word: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, word: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        (**self).translate(word, source, target)
    }
}

/// A failed translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The backend could not be reached or rejected the request.
    #[error("translation backend failed: {0}")]
    Backend(#[source] BoxError),

    /// The backend answered but the answer holds no usable text.
    #[error("translation backend returned no text for '{word}'")]
    Empty { word: String },
}
