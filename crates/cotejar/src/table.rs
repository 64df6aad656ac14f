//! Translation tables
//!
//! A [`TranslationTable`] is the copy deck for one surface: locale code
//! to key to expected string. Decks load from JSON or YAML files whose
//! top level maps locale codes to key/value objects:
//!
//! ```json
//! {
//!   "en": { "title": "Sign up", "submit_text": "Sign up" },
//!   "fr": { "title": "Inscription", "submit_text": "S'inscrire" }
//! }
//! ```
//!
//! Locale codes and keys are matched case-insensitively; decks written
//! with `EN`/`Title` and lookups using `en`/`title` meet in the middle.
//! A missing entry is not an error: [`get_or_empty`] yields `""`, and
//! the verifier turns that into a failing check instead of a crash.
//!
//! [`get_or_empty`]: TranslationTable::get_or_empty

use crate::result::CotejarResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Expected copy per locale and key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already-parsed locale map, folding codes and keys
    /// to lowercase.
    #[must_use]
    pub fn from_entries(raw: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        let mut table = Self::new();
        for (locale, strings) in raw {
            for (key, value) in strings {
                table.insert(&locale, &key, value);
            }
        }
        table
    }

    /// Parse a deck from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a locale/key/value map.
    pub fn from_json_str(text: &str) -> CotejarResult<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(text)?;
        Ok(Self::from_entries(raw))
    }

    /// Parse a deck from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a locale/key/value map.
    pub fn from_yaml_str(text: &str) -> CotejarResult<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_yaml_ng::from_str(text)?;
        Ok(Self::from_entries(raw))
    }

    /// Load a deck from a `.json` or `.yaml`/`.yml` file, deciding the
    /// format by extension and defaulting to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CotejarResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    /// Insert or replace one string.
    pub fn insert(&mut self, locale: &str, key: &str, value: impl Into<String>) {
        self.entries
            .entry(locale.to_lowercase())
            .or_default()
            .insert(key.to_lowercase(), value.into());
    }

    /// Expected copy for `(locale, key)`, `None` when absent.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&locale.to_lowercase())?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    /// Expected copy for `(locale, key)`, `""` when absent.
    #[must_use]
    pub fn get_or_empty(&self, locale: &str, key: &str) -> &str {
        self.get(locale, key).unwrap_or("")
    }

    /// Whether the table carries any strings for `locale`.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.entries.contains_key(&locale.to_lowercase())
    }

    /// Locale codes present, in sorted order.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Union of keys across all locales, in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .values()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys present for one locale, in sorted order.
    #[must_use]
    pub fn keys_for(&self, locale: &str) -> Vec<&str> {
        self.entries
            .get(&locale.to_lowercase())
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All strings for one locale, in key order.
    #[must_use]
    pub fn strings_for(&self, locale: &str) -> Vec<(&str, &str)> {
        self.entries
            .get(&locale.to_lowercase())
            .map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
            .unwrap_or_default()
    }

    /// Fold `other` into this table; on collisions `other` wins.
    pub fn merge(&mut self, other: Self) {
        for (locale, strings) in other.entries {
            let slot = self.entries.entry(locale).or_default();
            slot.extend(strings);
        }
    }

    /// Whether the table has no strings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }

    /// Total number of strings across all locales.
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }
}
