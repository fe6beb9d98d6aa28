//! Insertion-ordered map keyed by language code.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A map from language code to `V` that keeps insertion order.
///
/// Serializes as a JSON object whose keys appear in insertion order, so the
/// registry's member order survives into the response. Consumers must still
/// treat it as a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for LanguageMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> LanguageMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `language`, returning the previous value if the
    /// language was already present. A replaced entry keeps its position.
    pub fn insert(&mut self, language: impl Into<String>, value: V) -> Option<V> {
        let language = language.into();
        match self.get_mut(&language) {
            Some(existing) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((language, value));
                None
            }
        }
    }

    pub fn get(&self, language: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, language: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(code, _)| code == language)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    /// Language codes in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(code, value)| (code.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for LanguageMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, value) in &self.entries {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}
