//! Tests for the resolution pipeline.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::io;

use lexmoji::{
    CategoryFilter, Checkpoint, Emoji, EmojiCatalog, EmojiRecord, ManualOverrides, NameIndexSet,
    NoCheckpoint, Resolution, ResolutionIndex, Resolver, Stage, StopWords, StoreError,
    TranslateError, TranslationCache, Translator, WordEntry,
};

struct FakeTranslator {
    answers: BTreeMap<&'static str, &'static str>,
    calls: Cell<usize>,
}

impl FakeTranslator {
    fn new(answers: &[(&'static str, &'static str)]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            calls: Cell::new(0),
        }
    }
}

impl Translator for FakeTranslator {
    fn translate(&self, word: &str, _: &str, _: &str) -> Result<String, TranslateError> {
        self.calls.set(self.calls.get() + 1);
        self.answers
            .get(word)
            .map(|answer| (*answer).to_string())
            .ok_or_else(|| TranslateError::Backend(Box::new(io::Error::other("quota exceeded"))))
    }
}

/// Records the cache size at every commit.
#[derive(Default)]
struct CommitLog {
    sizes: Vec<usize>,
}

impl Checkpoint<TranslationCache> for CommitLog {
    fn save(&mut self, cache: &TranslationCache) -> Result<(), StoreError> {
        self.sizes.push(cache.len());
        Ok(())
    }
}

/// Fails the first `failures` commits, then records sizes like [`CommitLog`].
struct FlakyCommits {
    failures: usize,
    attempts: usize,
    sizes: Vec<usize>,
}

impl FlakyCommits {
    fn failing(failures: usize) -> Self {
        Self {
            failures,
            attempts: 0,
            sizes: Vec::new(),
        }
    }
}

impl Checkpoint<TranslationCache> for FlakyCommits {
    fn save(&mut self, cache: &TranslationCache) -> Result<(), StoreError> {
        self.attempts += 1;
        if self.failures > 0 {
            self.failures -= 1;
            return Err(StoreError::Io {
                path: "translation_cache.json".into(),
                source: io::Error::other("disk full"),
            });
        }
        self.sizes.push(cache.len());
        Ok(())
    }
}

fn emoji(glyph: &str) -> Emoji {
    Emoji::new(glyph).unwrap()
}

fn catalog() -> EmojiCatalog {
    EmojiCatalog::new(vec![
        EmojiRecord::new(emoji("🐈"))
            .with_name("fr", "chat")
            .with_name("en", "cat"),
        EmojiRecord::new(emoji("🦁"))
            .with_name("fr", "lion")
            .with_name("en", "lion"),
        EmojiRecord::new(emoji("🥐"))
            .with_name("fr", "croissant")
            .with_name("en", "croissant"),
        EmojiRecord::new(emoji("💻")).with_name("en", "laptop computer"),
        EmojiRecord::new(emoji("🐕")).with_name("en", "dog"),
        // "le" is too short to be indexed, "les" is not.
        EmojiRecord::new(emoji("🍃")).with_name("fr", "les feuilles"),
    ])
}

struct Fixture {
    overrides: ManualOverrides,
    indices: NameIndexSet,
    stopwords: StopWords,
}

impl Fixture {
    fn new() -> Self {
        Self {
            overrides: ManualOverrides::from_pairs([("chat", "🐱")]).unwrap(),
            indices: NameIndexSet::build(&catalog(), &["fr", "en"]),
            stopwords: StopWords::french(),
        }
    }

    fn resolver<'a>(&'a self, translator: Option<&'a dyn Translator>) -> Resolver<'a> {
        Resolver::builder()
            .overrides(&self.overrides)
            .indices(&self.indices)
            .stopwords(&self.stopwords)
            .maybe_translator(translator)
            .build()
    }
}

fn entries() -> Vec<WordEntry> {
    vec![
        WordEntry::new("Chat", "NOM"),
        WordEntry::new("le", "ART:def"),
        WordEntry::new("les", "ART:def"),
        WordEntry::new("lion", "NOM"),
        WordEntry::new("ordinateur", "NOM"),
        WordEntry::new("chien", "NOM"),
        WordEntry::new("nébuleuse", "NOM"),
    ]
}

fn run(resolver: &Resolver<'_>, entries: &[WordEntry], prior: ResolutionIndex) -> ResolutionIndex {
    resolver
        .run(entries, prior, &mut TranslationCache::new(), &mut NoCheckpoint)
        .index
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn override_wins_over_name_index() {
    let fixture = Fixture::new();
    let index = run(&fixture.resolver(None), &entries(), ResolutionIndex::new());
    // the catalog maps "chat" to 🐈 but the override says 🐱
    assert_eq!(index.emoji_for("chat").unwrap().as_str(), "🐱");
}

#[test]
fn stop_word_is_suppressed_even_when_indexed() {
    let fixture = Fixture::new();
    assert!(fixture.indices.get("fr").unwrap().get("les").is_some());

    let index = run(&fixture.resolver(None), &entries(), ResolutionIndex::new());
    assert_eq!(index.get("le"), Some(&Resolution::Suppressed));
    assert_eq!(index.get("les"), Some(&Resolution::Suppressed));
}

#[test]
fn translation_fallback_resolves_through_secondary_index() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("ordinateur", "Computer"), ("chien", "dog")]);
    let resolver = fixture.resolver(Some(&translator));

    let run = resolver.run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );
    assert_eq!(run.index.emoji_for("ordinateur").unwrap().as_str(), "💻");
    assert_eq!(run.index.emoji_for("chien").unwrap().as_str(), "🐕");
    assert_eq!(run.stats.via_translation, 2);
    assert_eq!(run.stats.stage(Stage::Translation), 2);
}

#[test]
fn primary_index_resolves_before_translation() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("lion", "lion")]);
    let index = run(&fixture.resolver(Some(&translator)), &entries(), ResolutionIndex::new());
    assert_eq!(index.emoji_for("lion").unwrap().as_str(), "🦁");
    assert_eq!(translator.calls.get(), 3); // ordinateur, chien, nébuleuse
}

#[test]
fn unresolved_words_are_explicit() {
    let fixture = Fixture::new();
    let index = run(&fixture.resolver(None), &entries(), ResolutionIndex::new());
    assert_eq!(index.get("nébuleuse"), Some(&Resolution::Unresolved));
    assert_eq!(index.get("ordinateur"), Some(&Resolution::Unresolved));
}

// =========================================================================
// Statistics
// =========================================================================

#[test]
fn stats_break_down_by_stage() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("ordinateur", "computer")]);
    let run = fixture.resolver(Some(&translator)).run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );

    assert_eq!(run.stats.total, 7);
    assert_eq!(run.stats.resolved, 3);
    assert_eq!(run.stats.stage(Stage::Override), 1);
    assert_eq!(run.stats.stage(Stage::StopWord), 2);
    assert_eq!(run.stats.stage(Stage::PrimaryName), 1);
    assert_eq!(run.stats.stage(Stage::Translation), 1);
    assert_eq!(run.stats.stage(Stage::Unresolved), 2);
    assert_eq!(run.stats.stage(Stage::Prior), 0);
}

#[test]
fn category_filter_skips_entries_without_counting_them() {
    let fixture = Fixture::new();
    let resolver = Resolver::builder()
        .overrides(&fixture.overrides)
        .indices(&fixture.indices)
        .stopwords(&fixture.stopwords)
        .category_filter(CategoryFilter::nouns())
        .build();

    let run = resolver.run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );
    assert_eq!(run.stats.total, 5);
    assert_eq!(run.index.get("le"), None);
    assert_eq!(run.stats.stage(Stage::StopWord), 0);
}

#[test]
fn blank_lemmas_are_skipped() {
    let fixture = Fixture::new();
    let run = fixture.resolver(None).run(
        &[WordEntry::new("   ", "NOM"), WordEntry::new("lion", "NOM")],
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );
    assert_eq!(run.stats.total, 1);
    assert_eq!(run.index.len(), 1);
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn rerun_is_idempotent() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("ordinateur", "computer")]);
    let resolver = fixture.resolver(Some(&translator));
    let mut cache = TranslationCache::new();

    let first = resolver
        .run(&entries(), ResolutionIndex::new(), &mut cache, &mut NoCheckpoint)
        .index;
    let second = resolver
        .run(&entries(), first.clone(), &mut cache, &mut NoCheckpoint)
        .index;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn prior_emoji_is_kept_but_never_over_an_override() {
    let fixture = Fixture::new();
    let prior: ResolutionIndex = [
        ("lion".to_string(), emoji("🐯")),
        ("chat".to_string(), emoji("🙀")),
    ]
    .into_iter()
    .collect();

    let run = fixture.resolver(None).run(
        &entries(),
        prior,
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );
    assert_eq!(run.index.emoji_for("lion").unwrap().as_str(), "🐯");
    assert_eq!(run.index.emoji_for("chat").unwrap().as_str(), "🐱");
    assert_eq!(run.stats.stage(Stage::Prior), 1);
}

#[test]
fn prior_emoji_fills_a_word_local_data_cannot_resolve() {
    let fixture = Fixture::new();
    let prior: ResolutionIndex = [("nébuleuse".to_string(), emoji("🌌"))].into_iter().collect();
    let index = run(&fixture.resolver(None), &entries(), prior);
    assert_eq!(index.emoji_for("nébuleuse").unwrap().as_str(), "🌌");
}

#[test]
fn prior_emoji_on_a_stop_word_is_suppressed() {
    let fixture = Fixture::new();
    let prior: ResolutionIndex = [("le".to_string(), emoji("🍃"))].into_iter().collect();
    let index = run(&fixture.resolver(None), &entries(), prior);
    assert_eq!(index.get("le"), Some(&Resolution::Suppressed));
}

#[test]
fn prior_null_is_resolved_again() {
    let fixture = Fixture::new();
    let prior: ResolutionIndex = serde_json::from_str(r#"{"lion": null}"#).unwrap();
    let index = run(&fixture.resolver(None), &entries(), prior);
    assert_eq!(index.emoji_for("lion").unwrap().as_str(), "🦁");
}

#[test]
fn translator_called_at_most_once_per_word_across_runs() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[]);
    let resolver = fixture.resolver(Some(&translator));
    let mut cache = TranslationCache::new();

    for _ in 0..3 {
        resolver.run(&entries(), ResolutionIndex::new(), &mut cache, &mut NoCheckpoint);
    }
    // ordinateur, chien, nébuleuse: failures cached as null
    assert_eq!(translator.calls.get(), 3);
    assert_eq!(cache.get("chien"), Some(None));
}

#[test]
fn failed_translation_does_not_abort_the_run() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("chien", "dog")]);
    let run = fixture.resolver(Some(&translator)).run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut NoCheckpoint,
    );
    assert_eq!(run.stats.total, 7);
    assert_eq!(run.index.emoji_for("chien").unwrap().as_str(), "🐕");
}

// =========================================================================
// Cache commits
// =========================================================================

#[test]
fn cache_is_committed_periodically_and_at_the_end() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[]);
    let resolver = Resolver::builder()
        .overrides(&fixture.overrides)
        .indices(&fixture.indices)
        .stopwords(&fixture.stopwords)
        .translator(&translator)
        .flush_every(2)
        .build();

    let entries: Vec<WordEntry> = ["alpha", "bravo", "charlie", "delta", "echo"]
        .into_iter()
        .map(|word| WordEntry::new(word, "NOM"))
        .collect();
    let mut log = CommitLog::default();
    resolver.run(&entries, ResolutionIndex::new(), &mut TranslationCache::new(), &mut log);
    assert_eq!(log.sizes, vec![2, 4, 5]);
}

#[test]
fn failed_cache_commit_is_retried_and_the_run_completes() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("delta", "dog")]);
    let resolver = Resolver::builder()
        .overrides(&fixture.overrides)
        .indices(&fixture.indices)
        .stopwords(&fixture.stopwords)
        .translator(&translator)
        .flush_every(2)
        .build();

    let entries: Vec<WordEntry> = ["alpha", "bravo", "charlie", "delta", "echo"]
        .into_iter()
        .map(|word| WordEntry::new(word, "NOM"))
        .collect();
    let mut cache = TranslationCache::new();
    let mut commits = FlakyCommits::failing(1);
    let run = resolver.run(&entries, ResolutionIndex::new(), &mut cache, &mut commits);

    assert_eq!(run.stats.total, 5);
    assert_eq!(run.stats.resolved, 1);
    assert_eq!(run.index.emoji_for("delta").unwrap().as_str(), "🐕");
    assert_eq!(commits.attempts, 3);
    assert_eq!(commits.sizes, vec![4, 5]);
    assert_eq!(cache.len(), 5);
}

#[test]
fn failed_final_commit_does_not_lose_the_index() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[]);
    let mut commits = FlakyCommits::failing(usize::MAX);
    let run = fixture.resolver(Some(&translator)).run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut commits,
    );

    assert_eq!(run.stats.total, 7);
    assert_eq!(run.index.emoji_for("chat").unwrap().as_str(), "🐱");
    assert_eq!(commits.attempts, 1);
    assert!(commits.sizes.is_empty());
}

#[test]
fn unchanged_cache_is_not_committed() {
    let fixture = Fixture::new();
    let mut log = CommitLog::default();
    fixture.resolver(None).run(
        &entries(),
        ResolutionIndex::new(),
        &mut TranslationCache::new(),
        &mut log,
    );
    assert!(log.sizes.is_empty());
}

// =========================================================================
// Single word
// =========================================================================

#[test]
fn resolve_word_explains_the_deciding_stage() {
    let fixture = Fixture::new();
    let translator = FakeTranslator::new(&[("ordinateur", "computer")]);
    let resolver = fixture.resolver(Some(&translator));
    let mut cache = TranslationCache::new();

    let decision = resolver.resolve_word("  Ordinateur ", &mut cache);
    assert_eq!(decision.stage, Stage::Translation);
    assert_eq!(decision.translation.as_deref(), Some("computer"));
    assert_eq!(decision.resolution, Resolution::Emoji(emoji("💻")));

    let decision = resolver.resolve_word("le", &mut cache);
    assert_eq!(decision.stage, Stage::StopWord);
}
