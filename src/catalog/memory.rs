use super::{
    ContentStore, ItemId, ItemKind, ItemRecord, Taxonomy, Term, TranslationGroup,
    TranslationRegistry,
};
use crate::i18n::Language;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ItemId,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub categories: Vec<ItemId>,
    #[serde(default)]
    pub tags: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationRecord {
    pub id: ItemId,
    pub parent: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: ItemId,
    pub taxonomy: Taxonomy,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum GroupKind {
    Product,
    Category,
    Tag,
}

impl From<GroupKind> for ItemKind {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Product => ItemKind::Product,
            GroupKind::Category => ItemKind::Term(Taxonomy::Category),
            GroupKind::Tag => ItemKind::Term(Taxonomy::Tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GroupMember {
    language: String,
    id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GroupRecord {
    kind: GroupKind,
    members: Vec<GroupMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ItemId,
    #[serde(default)]
    pub variation_id: Option<ItemId>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// The most specific product this line refers to.
    pub fn referenced_item(&self) -> ItemId {
        self.variation_id.unwrap_or(self.product_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: ItemId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub variations: Vec<VariationRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    #[serde(default)]
    groups: Vec<GroupRecord>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// A read-only catalog held in memory, implementing both collaborators.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    languages: Vec<Language>,
    products: BTreeMap<ItemId, ProductRecord>,
    variations: HashMap<ItemId, ItemId>,
    terms: BTreeMap<(Taxonomy, ItemId), TermRecord>,
    groups: Vec<TranslationGroup>,
    group_index: HashMap<(ItemKind, ItemId), usize>,
    orders: BTreeMap<ItemId, Order>,
}

impl InMemoryCatalog {
    /// Load a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read catalog at {}", path.display()))?;
        let catalog = Self::from_json(&content)
            .context(format!("Failed to load catalog at {}", path.display()))?;

        info!(
            "Loaded catalog: {} languages, {} products, {} terms, {} translation groups",
            catalog.languages.len(),
            catalog.products.len(),
            catalog.terms.len(),
            catalog.groups.len()
        );

        Ok(catalog)
    }

    /// Parse a catalog document.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(content).context("Failed to parse catalog JSON")?;
        Self::from_file(file)
    }

    /// Index a parsed catalog document, checking translation group invariants.
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        let mut catalog = Self {
            languages: file.languages,
            ..Self::default()
        };

        for product in file.products {
            catalog.products.insert(product.id, product);
        }

        for variation in file.variations {
            if !catalog.products.contains_key(&variation.parent) {
                warn!(
                    "Variation {} references unknown parent product {}",
                    variation.id, variation.parent
                );
            }
            catalog.variations.insert(variation.id, variation.parent);
        }

        for term in file.terms {
            catalog.terms.insert((term.taxonomy, term.id), term);
        }

        for (index, record) in file.groups.into_iter().enumerate() {
            let kind = ItemKind::from(record.kind);
            let mut group = TranslationGroup::new();

            for member in record.members {
                if group.iter().any(|(_, id)| id == member.id) {
                    bail!(
                        "Translation group #{} lists {} {} more than once",
                        index,
                        kind,
                        member.id
                    );
                }
                if !group.insert(member.language.clone(), member.id) {
                    bail!(
                        "Translation group #{} has more than one member in '{}'",
                        index,
                        member.language
                    );
                }
                if catalog.group_index.contains_key(&(kind, member.id)) {
                    bail!(
                        "{} {} belongs to more than one translation group",
                        kind,
                        member.id
                    );
                }
                catalog.group_index.insert((kind, member.id), index);
            }

            catalog.groups.push(group);
        }

        for order in file.orders {
            catalog.orders.insert(order.id, order);
        }

        Ok(catalog)
    }

    /// Products in `language`, or every product when `language` is `None`, ordered by id.
    pub fn products_in(&self, language: Option<&str>) -> Vec<&ProductRecord> {
        self.products
            .values()
            .filter(|product| match language {
                Some(code) => product.language.as_deref() == Some(code),
                None => true,
            })
            .collect()
    }

    pub fn product(&self, id: ItemId) -> Option<&ProductRecord> {
        self.products.get(&id)
    }

    pub fn term(&self, taxonomy: Taxonomy, id: ItemId) -> Option<&TermRecord> {
        self.terms.get(&(taxonomy, id))
    }

    pub fn order(&self, id: ItemId) -> Option<&Order> {
        self.orders.get(&id)
    }

    fn term_record(record: &TermRecord) -> ItemRecord {
        ItemRecord {
            display_name: record.name.clone(),
            slug: record.slug.clone(),
            language: record.language.clone(),
        }
    }

    fn product_record(record: &ProductRecord) -> ItemRecord {
        ItemRecord {
            display_name: record.name.clone(),
            slug: record.slug.clone(),
            language: record.language.clone(),
        }
    }
}

impl ContentStore for InMemoryCatalog {
    fn get_item(&self, id: ItemId, kind: ItemKind) -> Option<ItemRecord> {
        match kind {
            ItemKind::Product => self.products.get(&id).map(Self::product_record),
            ItemKind::Term(taxonomy) => self.terms.get(&(taxonomy, id)).map(Self::term_record),
            ItemKind::LineItemProduct => self
                .resolve_canonical_item(id)
                .and_then(|base| self.products.get(&base))
                .map(Self::product_record),
        }
    }

    fn get_terms_for_item(&self, item: ItemId, taxonomy: Taxonomy) -> Vec<Term> {
        let Some(product) = self.products.get(&item) else {
            return Vec::new();
        };

        let ids = match taxonomy {
            Taxonomy::Category => &product.categories,
            Taxonomy::Tag => &product.tags,
        };

        ids.iter()
            .filter_map(|id| self.terms.get(&(taxonomy, *id)))
            .map(|record| Term {
                id: record.id,
                name: record.name.clone().unwrap_or_default(),
                slug: record.slug.clone().unwrap_or_default(),
            })
            .collect()
    }

    fn resolve_canonical_item(&self, variant: ItemId) -> Option<ItemId> {
        if let Some(parent) = self.variations.get(&variant) {
            return Some(*parent);
        }
        self.products.contains_key(&variant).then_some(variant)
    }

    fn find_by_slug(&self, slug: &str, kind: ItemKind) -> Option<ItemId> {
        match kind {
            ItemKind::Product | ItemKind::LineItemProduct => self
                .products
                .values()
                .find(|product| product.slug.as_deref() == Some(slug))
                .map(|product| product.id),
            ItemKind::Term(taxonomy) => self
                .terms
                .values()
                .find(|term| term.taxonomy == taxonomy && term.slug.as_deref() == Some(slug))
                .map(|term| term.id),
        }
    }
}

impl TranslationRegistry for InMemoryCatalog {
    fn get_translation_group(&self, id: ItemId, kind: ItemKind) -> TranslationGroup {
        self.group_index
            .get(&(kind, id))
            .and_then(|index| self.groups.get(*index))
            .cloned()
            .unwrap_or_default()
    }

    fn list_known_languages(&self) -> Vec<Language> {
        self.languages.clone()
    }
}
