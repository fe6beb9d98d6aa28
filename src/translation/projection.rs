//! Fixed-shape display records and the term display mode.

use crate::catalog::{ItemId, ItemRecord, Term};
use serde::Serialize;

/// Display fields of one language variant.
///
/// Every field is always present; data the store lacks is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
}

impl Projection {
    /// Project a store record, or an empty record if the store had none.
    pub fn from_record(id: ItemId, record: Option<ItemRecord>) -> Self {
        let record = record.unwrap_or_default();
        Self {
            id,
            name: record.display_name.unwrap_or_default(),
            slug: record.slug.unwrap_or_default(),
        }
    }
}

impl From<Term> for Projection {
    fn from(term: Term) -> Self {
        Self {
            id: term.id,
            name: term.name,
            slug: term.slug,
        }
    }
}

/// How term projections are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Each term is its bare name.
    #[default]
    NamesOnly,
    /// Each term is `{id, name, slug}`.
    FullTerms,
}

impl DisplayMode {
    /// Map the `full_term_projection` configuration switch to a mode.
    pub fn from_full_term_projection(full: bool) -> Self {
        if full {
            DisplayMode::FullTerms
        } else {
            DisplayMode::NamesOnly
        }
    }

    /// Render a projection in this mode.
    pub fn render(&self, projection: Projection) -> TermEntry {
        match self {
            DisplayMode::NamesOnly => TermEntry::Name(projection.name),
            DisplayMode::FullTerms => TermEntry::Full(projection),
        }
    }
}

/// A term as rendered in a response: a full record or a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TermEntry {
    Full(Projection),
    Name(String),
}

impl TermEntry {
    pub fn name(&self) -> &str {
        match self {
            TermEntry::Full(projection) => &projection.name,
            TermEntry::Name(name) => name,
        }
    }
}
