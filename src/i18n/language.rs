//! Language type: a short code plus an optional long-form locale.
//!
//! Languages are supplied by the translation registry per request. Unlike a
//! compiled-in list, any code the registry reports is accepted here; the
//! resolver decides what to do with codes it has never seen.

use serde::{Deserialize, Serialize};

/// A language known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Short language code (e.g., "en", "fr")
    pub code: String,

    /// Long-form locale (e.g., "en_US", "fr_FR"), if the registry has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Language {
    /// Create a language with no locale.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            locale: None,
        }
    }

    /// Create a language with a long-form locale.
    ///
    /// # Example
    /// ```
    /// use catalog_translations::i18n::Language;
    ///
    /// let french = Language::with_locale("fr", "fr_FR");
    /// assert_eq!(french.locale(), Some("fr_FR"));
    /// ```
    pub fn with_locale(code: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            locale: Some(locale.into()),
        }
    }

    /// Get the short language code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the long-form locale, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Check whether this language's locale field equals `locale`.
    ///
    /// Comparison is exact: "fr_FR" does not match "fr-FR" or "fr_fr".
    /// A language without a locale never matches.
    pub fn matches_locale(&self, locale: &str) -> bool {
        self.locale.as_deref() == Some(locale)
    }
}
