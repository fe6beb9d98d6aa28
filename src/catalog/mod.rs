//! Catalog collaborators: the content store and the translation registry.
//!
//! The translation core only ever reads through the two traits defined here.
//! [`InMemoryCatalog`] is the implementation this crate ships; any other
//! backing store plugs in by implementing the same traits.

mod memory;

pub use memory::{
    CatalogFile, InMemoryCatalog, LineItem, Order, ProductRecord, TermRecord, VariationRecord,
};

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a catalog item, unique within its kind.
pub type ItemId = u64;

/// Taxonomy a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Category,
    Tag,
}

impl Taxonomy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Category => "category",
            Taxonomy::Tag => "tag",
        }
    }

    /// Parse a taxonomy name as it appears in URLs and catalog documents.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "category" => Some(Taxonomy::Category),
            "tag" => Some(Taxonomy::Tag),
            _ => None,
        }
    }
}

/// Kind of a catalog item.
///
/// `LineItemProduct` is a reference from an order line to a product or one
/// of its variations; it has no translation group of its own and must be
/// resolved to its canonical product first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Product,
    Term(Taxonomy),
    LineItemProduct,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Product => write!(f, "product"),
            ItemKind::Term(taxonomy) => write!(f, "{}", taxonomy.as_str()),
            ItemKind::LineItemProduct => write!(f, "line item product"),
        }
    }
}

/// Display fields of a stored item. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    pub display_name: Option<String>,
    pub slug: Option<String>,
    pub language: Option<String>,
}

/// A taxonomy term attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
}

/// The items representing one logical entity across languages.
///
/// Members keep the order the registry reported them in. A group holds at
/// most one member per language; when a source reports a language twice,
/// the first member is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationGroup {
    members: Vec<(String, ItemId)>,
}

impl TranslationGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from `(language, id)` pairs.
    pub fn from_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, ItemId)>,
        S: Into<String>,
    {
        let mut group = Self::new();
        for (language, id) in members {
            group.insert(language, id);
        }
        group
    }

    /// Add a member. Returns `false` (and keeps the existing member) when
    /// the language is already present.
    pub fn insert(&mut self, language: impl Into<String>, id: ItemId) -> bool {
        let language = language.into();
        if self.get(&language).is_some() {
            return false;
        }
        self.members.push((language, id));
        true
    }

    /// The member in `language`, if any.
    pub fn get(&self, language: &str) -> Option<ItemId> {
        self.members
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemId)> {
        self.members.iter().map(|(code, id)| (code.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group links at least two languages.
    pub fn is_translated(&self) -> bool {
        self.members.len() > 1
    }
}

/// Read access to catalog items.
pub trait ContentStore: Send + Sync {
    /// Display fields of an item, or `None` if it does not exist.
    fn get_item(&self, id: ItemId, kind: ItemKind) -> Option<ItemRecord>;

    /// Terms of `taxonomy` attached to an item, in attachment order.
    fn get_terms_for_item(&self, item: ItemId, taxonomy: Taxonomy) -> Vec<Term>;

    /// The base product a variation belongs to.
    fn resolve_canonical_item(&self, variant: ItemId) -> Option<ItemId>;

    /// The item of `kind` carrying `slug`.
    fn find_by_slug(&self, slug: &str, kind: ItemKind) -> Option<ItemId>;
}

/// Read access to translation links between items.
pub trait TranslationRegistry: Send + Sync {
    /// The translation group of an item; empty when it has none.
    fn get_translation_group(&self, id: ItemId, kind: ItemKind) -> TranslationGroup;

    /// All languages the catalog serves, in registry order.
    fn list_known_languages(&self) -> Vec<Language>;
}

/// The collaborators backing the translation core.
///
/// Availability is decided once, when the core is constructed. Every
/// operation on an `Unavailable` backend yields the same empty results as
/// missing data.
#[derive(Clone)]
pub enum Collaborators {
    Available {
        store: Arc<dyn ContentStore>,
        registry: Arc<dyn TranslationRegistry>,
    },
    Unavailable,
}

impl Collaborators {
    pub fn available(store: Arc<dyn ContentStore>, registry: Arc<dyn TranslationRegistry>) -> Self {
        Collaborators::Available { store, registry }
    }

    /// Use one value as both store and registry.
    pub fn from_catalog<C>(catalog: Arc<C>) -> Self
    where
        C: ContentStore + TranslationRegistry + 'static,
    {
        let store: Arc<dyn ContentStore> = catalog.clone();
        let registry: Arc<dyn TranslationRegistry> = catalog;
        Collaborators::Available { store, registry }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Collaborators::Available { .. })
    }

    pub(crate) fn parts(&self) -> Option<(&dyn ContentStore, &dyn TranslationRegistry)> {
        match self {
            Collaborators::Available { store, registry } => Some((store.as_ref(), registry.as_ref())),
            Collaborators::Unavailable => None,
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborators::Available { .. } => write!(f, "Collaborators::Available"),
            Collaborators::Unavailable => write!(f, "Collaborators::Unavailable"),
        }
    }
}
