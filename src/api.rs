//! HTTP read surface: resolves the request language, then enriches catalog
//! items with translation metadata.
//!
//! Each handler owns one [`RequestScope`] for the whole request, so an item
//! appearing several times in a response is projected once.

use crate::catalog::{ContentStore, InMemoryCatalog, ItemId, ItemKind, ProductRecord, Taxonomy};
use crate::error::LookupError;
use crate::i18n::{resolve_language, sanitize_text, RequestSignals};
use crate::translation::{
    CategorySummary, DisplayMode, Projection, RequestScope, TermTranslationMap, TranslationMap,
    TranslationMapBuilder,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<InMemoryCatalog>,
    pub builder: TranslationMapBuilder,
}

impl AppState {
    pub fn new(catalog: Arc<InMemoryCatalog>, mode: DisplayMode) -> Self {
        let builder = TranslationMapBuilder::new(
            crate::catalog::Collaborators::from_catalog(catalog.clone()),
            mode,
        );
        Self { catalog, builder }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/terms/:taxonomy/:id", get(get_term))
        .route("/orders/:id", get(get_order))
        .route("/translations/:kind/:slug", get(find_translation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Payloads ====================

#[derive(Debug, Serialize)]
pub struct TermPayload {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    pub translations: TermTranslationMap,
}

#[derive(Debug, Serialize)]
pub struct ProductPayload {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    pub lang: String,
    pub translations: TranslationMap,
    pub categories: Vec<TermPayload>,
    pub categories_translations: CategorySummary,
}

#[derive(Debug, Serialize)]
pub struct LineItemPayload {
    pub product_id: ItemId,
    pub variation_id: Option<ItemId>,
    pub quantity: u32,
    pub name: String,
    pub translations: TranslationMap,
}

#[derive(Debug, Serialize)]
pub struct OrderPayload {
    pub id: ItemId,
    pub line_items: Vec<LineItemPayload>,
}

// ==================== Errors ====================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("No language could be resolved for this request")]
    NoLanguage,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NoLanguage => StatusCode::BAD_REQUEST,
            ApiError::Lookup(LookupError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Lookup(_) => StatusCode::NOT_FOUND,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// ==================== Handlers ====================

pub async fn health() -> &'static str {
    "OK"
}

/// List products in the request language, or all products if none resolves.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Vec<ProductPayload>> {
    let known = state.builder.known_languages();
    let language = resolve_language(&RequestSignals::new(&params, &headers), &known);
    debug!("Listing products for language {:?}", language);

    let mut scope = state.builder.begin_request();
    let products = state
        .catalog
        .products_in(language.as_deref())
        .into_iter()
        .map(|product| product_payload(&state.catalog, &mut scope, product))
        .collect();
    scope.finish();

    Json(products)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<ProductPayload>, ApiError> {
    let product = state
        .catalog
        .product(id)
        .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))?;

    let mut scope = state.builder.begin_request();
    let payload = product_payload(&state.catalog, &mut scope, product);
    scope.finish();

    Ok(Json(payload))
}

pub async fn get_term(
    State(state): State<AppState>,
    Path((taxonomy, id)): Path<(String, ItemId)>,
) -> Result<Json<TermPayload>, ApiError> {
    let taxonomy = Taxonomy::parse(&taxonomy)
        .ok_or_else(|| ApiError::NotFound(format!("Taxonomy '{}'", taxonomy)))?;
    let term = state
        .catalog
        .term(taxonomy, id)
        .ok_or_else(|| ApiError::NotFound(format!("{} {}", taxonomy.as_str(), id)))?;

    let mut scope = state.builder.begin_request();
    let payload = TermPayload {
        id: term.id,
        name: term.name.clone().unwrap_or_default(),
        slug: term.slug.clone().unwrap_or_default(),
        translations: scope.build_term_translation_map(term.id, taxonomy),
    };
    scope.finish();

    Ok(Json(payload))
}

/// An order whose line items carry the translations of their base product.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<OrderPayload>, ApiError> {
    let order = state
        .catalog
        .order(id)
        .ok_or_else(|| ApiError::NotFound(format!("Order {}", id)))?;

    let mut scope = state.builder.begin_request();
    let line_items = order
        .line_items
        .iter()
        .map(|item| {
            let referenced = item.referenced_item();
            let name = state
                .catalog
                .get_item(referenced, ItemKind::LineItemProduct)
                .and_then(|record| record.display_name)
                .unwrap_or_default();

            LineItemPayload {
                product_id: item.product_id,
                variation_id: item.variation_id,
                quantity: item.quantity,
                name,
                translations: scope.build_translation_map(referenced, ItemKind::LineItemProduct),
            }
        })
        .collect();
    scope.finish();

    Ok(Json(OrderPayload {
        id: order.id,
        line_items,
    }))
}

/// Cross-reference lookup: the variant of `slug` in the request language.
pub async fn find_translation(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Projection>, ApiError> {
    let kind = match kind.as_str() {
        "product" => ItemKind::Product,
        other => ItemKind::Term(
            Taxonomy::parse(other).ok_or_else(|| ApiError::NotFound(format!("Kind '{}'", other)))?,
        ),
    };

    let known = state.builder.known_languages();
    let language = resolve_language(&RequestSignals::new(&params, &headers), &known)
        .ok_or(ApiError::NoLanguage)?;

    let mut scope = state.builder.begin_request();
    let result = scope.find_translation(kind, &sanitize_text(&slug), &language);
    scope.finish();

    Ok(Json(result?))
}

fn product_payload(
    catalog: &InMemoryCatalog,
    scope: &mut RequestScope<'_>,
    product: &ProductRecord,
) -> ProductPayload {
    let categories = catalog
        .get_terms_for_item(product.id, Taxonomy::Category)
        .into_iter()
        .map(|term| TermPayload {
            translations: scope.build_term_translation_map(term.id, Taxonomy::Category),
            id: term.id,
            name: term.name,
            slug: term.slug,
        })
        .collect();

    ProductPayload {
        id: product.id,
        name: product.name.clone().unwrap_or_default(),
        slug: product.slug.clone().unwrap_or_default(),
        lang: product.language.clone().unwrap_or_default(),
        translations: scope.build_translation_map(product.id, ItemKind::Product),
        categories,
        categories_translations: scope.build_category_summary(product.id),
    }
}
