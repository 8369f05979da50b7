use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::Emoji;

/// One entry of the emoji catalog: a glyph and its canonical name per locale.
///
/// Names may be plain text (`tête de chat`) or shortcode form
/// (`:tête_de_chat:`); the name index tokenizer accepts both. A locale whose
/// name is not a string (`"en": null`) is dropped on load without affecting
/// the other locales.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    pub code: Emoji,
    #[serde(default, deserialize_with = "string_names")]
    pub names: BTreeMap<String, String>,
}

impl EmojiRecord {
    pub fn new(code: Emoji) -> Self {
        Self {
            code,
            names: BTreeMap::new(),
        }
    }

    /// Adds a canonical name for `locale`, replacing any previous one.
    pub fn with_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    /// Canonical name for `locale`, or `None` when missing or blank.
    pub fn canonical_name(&self, locale: &str) -> Option<&str> {
        self.names
            .get(locale)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

fn string_names<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let document = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(document
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(locale, name)| match name {
            Value::String(name) => Some((locale, name)),
            _ => None,
        })
        .collect())
}
