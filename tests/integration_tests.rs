//! Integration tests for the catalog translations crate
//!
//! These tests exercise the public API end to end: a catalog document on
//! disk, language resolution from request signals, and translation metadata
//! built from the loaded catalog.

use std::sync::Arc;
use tempfile::TempDir;

use catalog_translations::catalog::{
    Collaborators, InMemoryCatalog, ItemKind, Taxonomy, TranslationRegistry,
};
use catalog_translations::i18n::{
    resolve_language, AmbientSignals, KnownLanguages, Language, LanguageSignals,
};
use catalog_translations::translation::{DisplayMode, TermEntry, TranslationMapBuilder};
use catalog_translations::LookupError;

// ==================== Test Helpers ====================

const CHAIR_CATALOG: &str = r#"{
    "languages": [
        {"code": "en", "locale": "en_US"},
        {"code": "fr", "locale": "fr_FR"}
    ],
    "products": [
        {"id": 100, "language": "en", "name": "Chair", "slug": "chair", "categories": [7]},
        {"id": 101, "language": "fr", "name": "Chaise", "slug": "chaise-fr", "categories": [9]},
        {"id": 500, "language": "en", "name": "Table", "slug": "table"}
    ],
    "variations": [{"id": 501, "parent": 500}],
    "terms": [
        {"id": 7, "taxonomy": "category", "language": "en", "name": "Chairs", "slug": "chairs"},
        {"id": 9, "taxonomy": "category", "language": "fr", "name": "Chaises", "slug": "chaises"}
    ],
    "groups": [
        {"kind": "product", "members": [{"language": "en", "id": 100}, {"language": "fr", "id": 101}]},
        {"kind": "product", "members": [{"language": "en", "id": 500}, {"language": "fr", "id": 510}]},
        {"kind": "category", "members": [{"language": "en", "id": 7}, {"language": "fr", "id": 9}]}
    ]
}"#;

/// Write the catalog to a temp dir and load it back
fn load_catalog(temp_dir: &TempDir) -> Arc<InMemoryCatalog> {
    let path = temp_dir.path().join("catalog.json");
    std::fs::write(&path, CHAIR_CATALOG).expect("Failed to write catalog");
    Arc::new(InMemoryCatalog::load(&path).expect("Failed to load catalog"))
}

fn create_builder(temp_dir: &TempDir, mode: DisplayMode) -> TranslationMapBuilder {
    TranslationMapBuilder::new(Collaborators::from_catalog(load_catalog(temp_dir)), mode)
}

// ==================== End-to-End Tests ====================

#[test]
fn test_locale_request_then_translation_map() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = create_builder(&temp_dir, DisplayMode::NamesOnly);

    let known = KnownLanguages::new(vec![Language::with_locale("fr", "fr_FR")]);
    let signals = LanguageSignals {
        locale: Some("fr_FR".to_string()),
        ..Default::default()
    };
    assert_eq!(resolve_language(&signals, &known).as_deref(), Some("fr"));

    let mut scope = builder.begin_request();
    let map = scope.build_translation_map(100, ItemKind::Product);

    let json = serde_json::to_value(&map).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "en": {"id": 100, "name": "Chair", "slug": "chair"},
            "fr": {"id": 101, "name": "Chaise", "slug": "chaise-fr"}
        })
    );
}

#[test]
fn test_known_languages_come_from_catalog() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = create_builder(&temp_dir, DisplayMode::NamesOnly);

    let source = AmbientSignals::from_vars(vec![("QUERY_STRING", "locale=fr_FR")]);
    assert_eq!(
        resolve_language(&source, &builder.known_languages()).as_deref(),
        Some("fr")
    );
}

#[test]
fn test_line_item_variant_matches_base_product() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = create_builder(&temp_dir, DisplayMode::NamesOnly);

    let mut scope = builder.begin_request();
    let via_line_item = scope.build_translation_map(501, ItemKind::LineItemProduct);
    let direct = scope.build_translation_map(500, ItemKind::Product);

    assert_eq!(via_line_item, direct);
    let keys: Vec<_> = direct.keys().collect();
    assert_eq!(keys, vec!["en", "fr"]);

    // 510 is linked by the registry but missing from the store
    let fr = direct.get("fr").expect("fr key present");
    assert_eq!(fr.id, 510);
    assert_eq!(fr.name, "");
    assert_eq!(fr.slug, "");
}

#[test]
fn test_category_summary_modes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let names = create_builder(&temp_dir, DisplayMode::NamesOnly);
    let mut scope = names.begin_request();
    let summary = serde_json::to_value(scope.build_category_summary(100)).expect("serialize");
    assert_eq!(
        summary,
        serde_json::json!({"en": ["Chairs"], "fr": ["Chaises"]})
    );

    let full = create_builder(&temp_dir, DisplayMode::FullTerms);
    let mut scope = full.begin_request();
    let summary = scope.build_category_summary(101);
    assert_eq!(
        summary.get("fr").and_then(|entries| entries.first()),
        Some(&TermEntry::Full(catalog_translations::translation::Projection {
            id: 9,
            name: "Chaises".to_string(),
            slug: "chaises".to_string(),
        }))
    );
}

#[test]
fn test_term_translation_map() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = create_builder(&temp_dir, DisplayMode::NamesOnly);

    let mut scope = builder.begin_request();
    let map = scope.build_term_translation_map(7, Taxonomy::Category);
    let json = serde_json::to_value(&map).expect("serialize");
    assert_eq!(json, serde_json::json!({"en": "Chairs", "fr": "Chaises"}));
}

#[test]
fn test_lookup_by_slug() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = create_builder(&temp_dir, DisplayMode::NamesOnly);
    let mut scope = builder.begin_request();

    let found = scope
        .find_translation(ItemKind::Product, "chaise-fr", "en")
        .expect("English variant exists");
    assert_eq!(found.id, 100);

    let missing = scope.find_translation(ItemKind::Product, "bench", "en");
    assert!(matches!(missing, Err(LookupError::NotFound { .. })));
}

#[test]
fn test_unavailable_collaborators_never_fail_enrichment() {
    let builder = TranslationMapBuilder::new(Collaborators::Unavailable, DisplayMode::NamesOnly);
    let mut scope = builder.begin_request();

    assert_eq!(
        serde_json::to_string(&scope.build_translation_map(100, ItemKind::Product))
            .expect("serialize"),
        "{}"
    );
    assert!(scope.build_category_summary(100).is_empty());
}

// ==================== Shipped Catalog Tests ====================

#[test]
fn test_shipped_catalog_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json");
    let catalog = InMemoryCatalog::load(path).expect("Shipped catalog should load");

    assert_eq!(catalog.list_known_languages().len(), 3);
    let group = catalog.get_translation_group(100, ItemKind::Product);
    assert_eq!(group.len(), 3);
}

#[test]
fn test_shipped_untranslated_product_keeps_own_categories() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json");
    let catalog = Arc::new(InMemoryCatalog::load(path).expect("Shipped catalog should load"));
    let builder = TranslationMapBuilder::new(Collaborators::from_catalog(catalog), DisplayMode::NamesOnly);

    let mut scope = builder.begin_request();
    let summary = serde_json::to_value(scope.build_category_summary(200)).expect("serialize");
    assert_eq!(summary, serde_json::json!({"en": ["Furniture"]}));
    assert!(scope.build_translation_map(200, ItemKind::Product).is_empty());
}
