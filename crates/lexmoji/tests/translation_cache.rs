//! Tests for the translation cache.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use lexmoji::{TranslateError, TranslationCache, TranslationOutcome, Translator};

/// Dictionary-backed translator that records every call.
struct Recording {
    answers: BTreeMap<&'static str, &'static str>,
    calls: RefCell<Vec<String>>,
}

impl Recording {
    fn new(answers: &[(&'static str, &'static str)]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Translator for Recording {
    fn translate(&self, word: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        assert_eq!((source, target), ("fr", "en"));
        self.calls.borrow_mut().push(word.to_string());
        match self.answers.get(word) {
            Some(answer) => Ok((*answer).to_string()),
            None => Err(TranslateError::Backend(Box::new(io::Error::other("timed out")))),
        }
    }
}

// =========================================================================
// Hits and misses
// =========================================================================

#[test]
fn miss_calls_translator_and_caches_normalized_result() {
    let translator = Recording::new(&[("ordinateur", " Computer ")]);
    let mut cache = TranslationCache::new();

    let outcome = cache.translate("ordinateur", &translator, "fr", "en");
    assert_eq!(outcome, TranslationOutcome::Fetched(Some("computer".to_string())));
    assert_eq!(cache.get("ordinateur"), Some(Some("computer")));
}

#[test]
fn hit_does_not_call_translator() {
    let translator = Recording::new(&[("chien", "dog")]);
    let mut cache = TranslationCache::new();

    cache.translate("chien", &translator, "fr", "en");
    let outcome = cache.translate("chien", &translator, "fr", "en");
    assert_eq!(outcome, TranslationOutcome::Cached(Some("dog".to_string())));
    assert_eq!(translator.calls(), vec!["chien"]);
}

#[test]
fn failure_is_cached_as_null_and_never_retried() {
    let translator = Recording::new(&[]);
    let mut cache = TranslationCache::new();

    let first = cache.translate("nébuleuse", &translator, "fr", "en");
    assert_eq!(first, TranslationOutcome::Fetched(None));
    assert_eq!(cache.get("nébuleuse"), Some(None));

    for _ in 0..3 {
        let again = cache.translate("nébuleuse", &translator, "fr", "en");
        assert_eq!(again, TranslationOutcome::Cached(None));
    }
    assert_eq!(translator.calls().len(), 1);
}

#[test]
fn empty_translation_is_cached_as_null() {
    let translator = Recording::new(&[("bof", "   ")]);
    let mut cache = TranslationCache::new();
    assert_eq!(cache.translate("bof", &translator, "fr", "en").word(), None);
    assert!(cache.contains("bof"));
}

// =========================================================================
// Persistence format
// =========================================================================

#[test]
fn cache_round_trips_through_flat_json() {
    let cache: TranslationCache =
        serde_json::from_str(r#"{"chien": "dog", "nébuleuse": null}"#).unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("chien"), Some(Some("dog")));
    assert_eq!(cache.get("nébuleuse"), Some(None));
    assert_eq!(cache.get("chat"), None);

    let json = serde_json::to_string(&cache).unwrap();
    assert_eq!(json, r#"{"chien":"dog","nébuleuse":null}"#);
}

#[test]
fn loaded_cache_entries_are_not_retranslated() {
    let translator = Recording::new(&[("chien", "hound")]);
    let mut cache: TranslationCache = serde_json::from_str(r#"{"chien": "dog"}"#).unwrap();
    assert_eq!(cache.translate("chien", &translator, "fr", "en").word(), Some("dog"));
    assert!(translator.calls().is_empty());
}
