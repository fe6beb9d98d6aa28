//! Known languages: the request-scoped list of languages the catalog serves.
//!
//! The list comes from the translation registry at the start of a request
//! and stays immutable until the request finishes. There is no global
//! instance; each request builds its own.

use crate::i18n::Language;

/// Immutable, ordered list of known languages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownLanguages {
    languages: Vec<Language>,
}

impl KnownLanguages {
    /// Wrap a list of languages as reported by the registry.
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    /// Get a language by its short code.
    ///
    /// # Returns
    /// * `Some(&Language)` if the code is known
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Find the first language whose locale field equals `locale`.
    ///
    /// Registry order decides ties when two languages share a locale.
    pub fn find_by_locale(&self, locale: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.matches_locale(locale))
    }

    /// Check whether a short code is known.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
