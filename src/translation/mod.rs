//! Translation metadata: per-language maps and cross-language summaries.
//!
//! # Architecture
//!
//! - `builder`: `TranslationMapBuilder` and the per-request `RequestScope`
//! - `cache`: the request-scoped lookup cache and its statistics
//! - `map`: `LanguageMap`, an insertion-ordered map keyed by language code
//! - `projection`: fixed-shape display records and the term display mode
//!
//! # Example
//!
//! ```rust,ignore
//! let builder = TranslationMapBuilder::new(collaborators, DisplayMode::NamesOnly);
//!
//! let mut scope = builder.begin_request();
//! let translations = scope.build_translation_map(100, ItemKind::Product);
//! let categories = scope.build_category_summary(100);
//! scope.finish();
//! ```

mod builder;
mod cache;
mod map;
mod projection;

pub use builder::{RequestScope, TranslationMapBuilder};
pub use cache::{CacheReport, RequestCache};
pub use map::LanguageMap;
pub use projection::{DisplayMode, Projection, TermEntry};

/// Language code → projection of that language's variant.
pub type TranslationMap = LanguageMap<Projection>;

/// Language code → rendered term.
pub type TermTranslationMap = LanguageMap<TermEntry>;

/// Language code → de-duplicated terms attached to that language's variant.
pub type CategorySummary = LanguageMap<Vec<TermEntry>>;
