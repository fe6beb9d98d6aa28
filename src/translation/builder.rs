use super::cache::{CacheReport, RequestCache};
use super::{CategorySummary, DisplayMode, Projection, TermTranslationMap, TranslationMap};
use crate::catalog::{
    Collaborators, ContentStore, ItemId, ItemKind, Taxonomy, TranslationGroup,
    TranslationRegistry,
};
use crate::error::LookupError;
use crate::i18n::KnownLanguages;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Builds translation maps and cross-language summaries.
///
/// The builder is immutable and cheap to clone. Work for one request happens
/// in a [`RequestScope`] obtained from [`TranslationMapBuilder::begin_request`],
/// which owns that request's lookup cache.
#[derive(Debug, Clone)]
pub struct TranslationMapBuilder {
    collaborators: Collaborators,
    mode: DisplayMode,
}

impl TranslationMapBuilder {
    pub fn new(collaborators: Collaborators, mode: DisplayMode) -> Self {
        if !collaborators.is_available() {
            warn!("Catalog collaborators unavailable, translation metadata will be empty");
        }
        Self {
            collaborators,
            mode,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Languages reported by the registry; empty when it is unavailable.
    pub fn known_languages(&self) -> KnownLanguages {
        match self.collaborators.parts() {
            Some((_, registry)) => KnownLanguages::new(registry.list_known_languages()),
            None => KnownLanguages::default(),
        }
    }

    /// Start a request. The returned scope and its cache live until the
    /// caller drops them.
    pub fn begin_request(&self) -> RequestScope<'_> {
        RequestScope {
            builder: self,
            cache: RequestCache::new(),
        }
    }
}

/// One request's view of the builder, owning the request-scoped cache.
#[derive(Debug)]
pub struct RequestScope<'a> {
    builder: &'a TranslationMapBuilder,
    cache: RequestCache,
}

impl<'a> RequestScope<'a> {
    pub fn mode(&self) -> DisplayMode {
        self.builder.mode
    }

    /// Per-language projections of an item's translation group.
    ///
    /// Line-item products are resolved to their canonical product first.
    /// The map is empty when the item has no canonical product, when its
    /// group has fewer than two members, or when the catalog is unavailable.
    /// When non-empty it contains every member, the item itself included.
    pub fn build_translation_map(&mut self, id: ItemId, kind: ItemKind) -> TranslationMap {
        let builder = self.builder;
        let Some((store, registry)) = builder.collaborators.parts() else {
            debug!("Skipping translation map for {} {}: catalog unavailable", kind, id);
            return TranslationMap::new();
        };

        let (resolved, kind) = match kind {
            ItemKind::LineItemProduct => match self.canonical_item(store, id) {
                Some(base) => (base, ItemKind::Product),
                None => {
                    debug!("No canonical product for line item product {}", id);
                    return TranslationMap::new();
                }
            },
            other => (id, other),
        };

        if let Some(map) = self.cache.get_map(kind, resolved) {
            return map;
        }

        let map = project_group(store, registry, resolved, kind);
        self.cache.put_map(kind, resolved, map.clone());
        map
    }

    /// Per-language rendering of a term's translation group, shaped by the
    /// builder's display mode.
    pub fn build_term_translation_map(
        &mut self,
        term_id: ItemId,
        taxonomy: Taxonomy,
    ) -> TermTranslationMap {
        let mode = self.mode();
        let projections = self.build_translation_map(term_id, ItemKind::Term(taxonomy));

        let mut map = TermTranslationMap::new();
        for (language, projection) in projections.iter() {
            map.insert(language, mode.render(projection.clone()));
        }
        map
    }

    /// Categories of every language variant of a product, per language.
    pub fn build_category_summary(&mut self, base_id: ItemId) -> CategorySummary {
        self.build_taxonomy_summary(base_id, Taxonomy::Category)
    }

    /// Terms of `taxonomy` attached to every language variant of a product.
    ///
    /// Entries are de-duplicated per language by term id, keeping the first
    /// occurrence and its name. Languages without terms are left out. An
    /// ungrouped product counts as a group of one, so it still reports its
    /// own terms under its own language.
    pub fn build_taxonomy_summary(&mut self, base_id: ItemId, taxonomy: Taxonomy) -> CategorySummary {
        let mode = self.mode();
        let Some((store, registry)) = self.builder.collaborators.parts() else {
            debug!("Skipping {} summary for product {}: catalog unavailable", taxonomy.as_str(), base_id);
            return CategorySummary::new();
        };

        let group = group_or_self(store, registry, base_id, ItemKind::Product);
        let mut summary = CategorySummary::new();
        let mut seen: HashMap<&str, HashSet<ItemId>> = HashMap::new();

        for (language, member) in group.iter() {
            let seen_ids = seen.entry(language).or_default();

            for term in store.get_terms_for_item(member, taxonomy) {
                if !seen_ids.insert(term.id) {
                    continue;
                }
                let entry = mode.render(Projection::from(term));
                match summary.get_mut(language) {
                    Some(entries) => entries.push(entry),
                    None => {
                        summary.insert(language, vec![entry]);
                    }
                }
            }
        }

        summary
    }

    /// Find the variant of the item carrying `slug` in `language`.
    ///
    /// Unlike the enrichment operations this reports what was missing: an
    /// unknown slug, a missing language variant, or an unavailable catalog.
    pub fn find_translation(
        &mut self,
        kind: ItemKind,
        slug: &str,
        language: &str,
    ) -> Result<Projection, LookupError> {
        let Some((store, registry)) = self.builder.collaborators.parts() else {
            return Err(LookupError::Unavailable);
        };

        let kind = match kind {
            ItemKind::LineItemProduct => ItemKind::Product,
            other => other,
        };

        let id = store
            .find_by_slug(slug, kind)
            .ok_or_else(|| LookupError::NotFound {
                kind,
                slug: slug.to_string(),
            })?;

        let target = group_or_self(store, registry, id, kind)
            .get(language)
            .ok_or_else(|| LookupError::MissingTranslation {
                kind,
                slug: slug.to_string(),
                language: language.to_string(),
            })?;

        Ok(Projection::from_record(target, store.get_item(target, kind)))
    }

    pub fn cache_report(&self) -> CacheReport {
        self.cache.report()
    }

    /// End the request, logging its cache statistics.
    pub fn finish(self) -> CacheReport {
        let report = self.cache.report();
        debug!("Translation cache: {}", report);
        report
    }

    fn canonical_item(&mut self, store: &dyn ContentStore, variant: ItemId) -> Option<ItemId> {
        if let Some(base) = self.cache.get_canonical(variant) {
            return base;
        }
        let base = store.resolve_canonical_item(variant);
        self.cache.put_canonical(variant, base);
        base
    }
}

/// The item's translation group, or a group holding only the item itself
/// when the registry links it to nothing.
///
/// An item without a language cannot stand in for its own group, so the
/// result is then empty.
fn group_or_self(
    store: &dyn ContentStore,
    registry: &dyn TranslationRegistry,
    id: ItemId,
    kind: ItemKind,
) -> TranslationGroup {
    let mut group = registry.get_translation_group(id, kind);
    if group.is_empty() {
        if let Some(language) = store.get_item(id, kind).and_then(|record| record.language) {
            group.insert(language, id);
        }
    }
    group
}

fn project_group(
    store: &dyn ContentStore,
    registry: &dyn TranslationRegistry,
    id: ItemId,
    kind: ItemKind,
) -> TranslationMap {
    let group = registry.get_translation_group(id, kind);
    if !group.is_translated() {
        return TranslationMap::new();
    }

    let mut map = TranslationMap::new();
    for (language, member) in group.iter() {
        map.insert(language, Projection::from_record(member, store.get_item(member, kind)));
    }
    map
}
