use std::error::Error;

pub mod catalog;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod overrides;
pub mod pipeline;
pub mod stopwords;
pub mod store;
pub mod suggest;
pub mod translation;
pub mod types;

pub use catalog::{EmojiCatalog, NameIndex, NameIndexSet};
pub use error::{LoadError, StoreError};
pub use normalize::normalize;
pub use overrides::ManualOverrides;
pub use pipeline::{Decision, ResolveRun, ResolveStats, Resolver, Stage};
pub use stopwords::StopWords;
pub use store::{Checkpoint, JsonCheckpoint, NoCheckpoint};
pub use suggest::{
    BatchSuggestionClient, ResponseError, SuggestError, SuggestReport, SuggestionRequest,
    SuggestionSource,
};
pub use translation::{TranslateError, TranslationCache, TranslationOutcome, Translator};
pub use types::{
    CategoryFilter, Emoji, EmojiRecord, InvalidEmoji, Resolution, ResolutionIndex, WordEntry,
};

/// Boxed error type carried by external-service failures.
pub type BoxError = Box<dyn Error + Send + Sync>;
