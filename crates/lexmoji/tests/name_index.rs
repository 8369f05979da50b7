//! Tests for catalog tokenization and the inverted name index.

use lexmoji::catalog::{MIN_TOKEN_CHARS, tokenize_name};
use lexmoji::{Emoji, EmojiCatalog, EmojiRecord, NameIndex, NameIndexSet};

fn record(glyph: &str, fr: &str, en: &str) -> EmojiRecord {
    EmojiRecord::new(Emoji::new(glyph).unwrap())
        .with_name("fr", fr)
        .with_name("en", en)
}

fn sample_catalog() -> EmojiCatalog {
    EmojiCatalog::new(vec![
        record("😺", ":chat_qui_sourit:", "grinning cat"),
        record("🐱", "tête de chat", "cat face"),
        record("💻", "ordinateur portable", "laptop computer"),
        record("🖥️", "ordinateur de bureau", "desktop computer"),
        record("🌈", "arc-en-ciel", "rainbow"),
        EmojiRecord::new(Emoji::new("🫥").unwrap()).with_name("en", "dotted line face"),
    ])
}

// =========================================================================
// Tokenization
// =========================================================================

#[test]
fn tokenize_splits_shortcodes_and_whitespace() {
    let words: Vec<String> = tokenize_name(":Tête_de_Chat:").collect();
    assert_eq!(words, vec!["tête", "de", "chat"]);

    let words: Vec<String> = tokenize_name("visage  « souriant »").collect();
    assert_eq!(words, vec!["visage", "souriant"]);
}

#[test]
fn tokenize_keeps_inner_hyphens() {
    let words: Vec<String> = tokenize_name("arc-en-ciel").collect();
    assert_eq!(words, vec!["arc-en-ciel"]);
}

#[test]
fn tokenize_strips_edge_punctuation() {
    let words: Vec<String> = tokenize_name("drapeau : France.").collect();
    assert_eq!(words, vec!["drapeau", "france"]);
}

// =========================================================================
// Build
// =========================================================================

#[test]
fn first_record_in_catalog_order_wins() {
    let index = NameIndex::build(&sample_catalog(), "fr");
    assert_eq!(index.get("chat").unwrap().as_str(), "😺");
    assert_eq!(index.get("ordinateur").unwrap().as_str(), "💻");
    assert_eq!(index.get("bureau").unwrap().as_str(), "🖥️");
}

#[test]
fn short_words_are_excluded() {
    let index = NameIndex::build(&sample_catalog(), "fr");
    assert_eq!(MIN_TOKEN_CHARS, 3);
    assert!(index.get("de").is_none());
    assert!(index.get("qui").is_some());
    assert!(index.words().keys().all(|word| word.chars().count() > 2));
}

#[test]
fn records_without_locale_name_are_skipped() {
    let index = NameIndex::build(&sample_catalog(), "fr");
    assert!(index.words().values().all(|emoji| emoji.as_str() != "🫥"));

    let english = NameIndex::build(&sample_catalog(), "en");
    assert_eq!(english.get("dotted").unwrap().as_str(), "🫥");
}

#[test]
fn unknown_locale_builds_an_empty_index() {
    let index = NameIndex::build(&sample_catalog(), "de");
    assert!(index.is_empty());
    assert_eq!(index.locale(), "de");
}

#[test]
fn build_is_deterministic() {
    let catalog = sample_catalog();
    let first = serde_json::to_string(NameIndex::build(&catalog, "fr").words()).unwrap();
    let second = serde_json::to_string(NameIndex::build(&catalog, "fr").words()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn index_set_builds_each_locale() {
    let set = NameIndexSet::build(&sample_catalog(), &["fr", "en"]);
    assert_eq!(set.get("en").unwrap().get("computer").unwrap().as_str(), "💻");
    assert_eq!(set.get("fr").unwrap().get("chat").unwrap().as_str(), "😺");
    assert!(set.get("es").is_none());
}

// =========================================================================
// Near misses
// =========================================================================

#[test]
fn near_misses_finds_close_words_closest_first() {
    let index = NameIndex::build(&sample_catalog(), "fr");

    // "chats" is one edit from "chat"
    assert_eq!(index.near_misses("chats"), vec!["chat"]);

    // exact match is not a near miss
    assert!(!index.near_misses("chat").contains(&"chat".to_string()));

    // "xyzzy" is far from everything
    assert!(index.near_misses("xyzzy").is_empty());
}

#[test]
fn near_misses_limits_to_three() {
    let catalog: EmojiCatalog = ["aaaa", "aaab", "aaac", "aaad", "aaae"]
        .into_iter()
        .map(|name| EmojiRecord::new(Emoji::new("⭐").unwrap()).with_name("fr", name))
        .collect();
    let index = NameIndex::build(&catalog, "fr");
    assert_eq!(index.near_misses("aaaz").len(), 3);
}
