use crate::catalog::ItemKind;
use thiserror::Error;

/// Failure of an explicit cross-language lookup.
///
/// Enrichment never fails; only lookups a caller asked for directly report
/// what was missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No item of the kind carries the slug.
    #[error("No {kind} found with slug '{slug}'")]
    NotFound { kind: ItemKind, slug: String },

    /// The item exists but has no variant in the requested language.
    #[error("{kind} '{slug}' has no translation in '{language}'")]
    MissingTranslation {
        kind: ItemKind,
        slug: String,
        language: String,
    },

    /// The catalog collaborators are not configured.
    #[error("Catalog is unavailable")]
    Unavailable,
}
