//! Internationalization (i18n) module: languages and request language resolution.
//!
//! # Architecture
//!
//! - `language`: the `Language` type (short code plus optional locale)
//! - `registry`: `KnownLanguages`, the request-scoped list reported by the translation registry
//! - `sanitize`: plain-text reduction applied to every request-supplied value
//! - `resolver`: the prioritized signal chain and its request adapters
//!
//! # Example
//!
//! ```rust
//! use catalog_translations::i18n::{resolve_language, KnownLanguages, Language, LanguageSignals};
//!
//! let known = KnownLanguages::new(vec![Language::with_locale("en", "en_US")]);
//! let signals = LanguageSignals {
//!     lang: Some("fr".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(resolve_language(&signals, &known).as_deref(), Some("fr"));
//! ```

mod language;
mod registry;
mod resolver;
mod sanitize;

pub use language::Language;
pub use registry::KnownLanguages;
pub use resolver::{
    resolve_language, AmbientSignals, LanguageSignals, RequestSignals, SignalSource,
    AMBIENT_LANGUAGE_HEADER, AMBIENT_QUERY_STRING, LANGUAGE_HEADER, LANG_PARAM, LOCALE_PARAM,
};
pub use sanitize::sanitize_text;
