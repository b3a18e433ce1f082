//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::catalog::{fallback_by_id, fallback_models, Category, CategoryFilter, Factor, ModelRecord};
use crate::error::{AtlasError, Result};
use crate::query::{by_category, format_price, paginate, search, strengths_of};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Upstream proxy
        .route("/api/models", get(list_models))
        .route("/api/models/*id", get(get_model))
        // Browsing
        .route("/api/categories", get(list_categories))
        .route("/api/catalog", get(browse_catalog))
        .route("/api/catalog/refresh", post(refresh_catalog))
        // Recommendations
        .route("/api/recommend", post(recommend))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_enabled {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime().as_secs(),
        "catalog": {
            "source": state.store.source_name(),
            "origin": snapshot.origin(),
            "count": snapshot.len(),
            "loaded_at": snapshot.loaded_at(),
        },
    }))
}

/// Pass the upstream listing through, or the fallback list on failure
async fn list_models(State(state): State<Arc<AppState>>) -> Response {
    match state.upstream.fetch_body().await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "upstream listing failed, serving fallback list");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch models",
                    "message": e.to_string(),
                    "fallback": true,
                    "data": fallback_models(),
                })),
            )
                .into_response()
        },
    }
}

/// A fallback record flagged as such
#[derive(Serialize)]
struct FallbackDetail {
    #[serde(flatten)]
    model: ModelRecord,
    fallback: bool,
}

/// Single model from the upstream listing, else from the fallback list
async fn get_model(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let upstream = match state.upstream.fetch_body().await {
        Ok(body) => find_listed_model(&body, &id),
        Err(e) => Err(e),
    };

    let fallback = || {
        fallback_by_id(&id).map(|model| FallbackDetail {
            model,
            fallback: true,
        })
    };

    match upstream {
        Ok(Some(model)) => (StatusCode::OK, Json(model)).into_response(),
        Ok(None) => match fallback() {
            Some(detail) => (StatusCode::OK, Json(detail)).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Model not found"})),
            )
                .into_response(),
        },
        Err(e) => {
            tracing::warn!(model = %id, error = %e, "upstream detail lookup failed");
            match fallback() {
                Some(detail) => (StatusCode::OK, Json(detail)).into_response(),
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to fetch model details",
                        "message": e.to_string(),
                    })),
                )
                    .into_response(),
            }
        },
    }
}

/// Find a raw record by id in a listing body
fn find_listed_model(body: &str, id: &str) -> Result<Option<Value>> {
    let listing: Value = serde_json::from_str(body)?;
    let data = match &listing {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(AtlasError::Server("listing has no data array".to_string())),
        },
        _ => return Err(AtlasError::Server("unexpected listing shape".to_string())),
    };

    Ok(data
        .iter()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
        .cloned())
}

/// The six categories with how many current records carry each
async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current();

    let categories: Vec<Value> = Category::ALL
        .iter()
        .map(|category| {
            json!({
                "id": category,
                "name": category.display_name(),
                "description": category.description(),
                "count": by_category(snapshot.records(), CategoryFilter::Only(*category)).len(),
            })
        })
        .collect();

    Json(categories)
}

/// Catalog browse query
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Category tag or `all`
    #[serde(default)]
    pub category: Option<String>,
    /// Search text
    #[serde(default)]
    pub q: Option<String>,
    /// 1-based page
    #[serde(default)]
    pub page: Option<usize>,
    /// Items per page
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// A catalog entry with its display text
#[derive(Serialize)]
struct CatalogItem<'a> {
    #[serde(flatten)]
    model: &'a ModelRecord,
    strengths: String,
    price: String,
}

/// Filter, search and paginate the current snapshot
async fn browse_catalog(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let filter = match query.category.as_deref() {
        None | Some("") => CategoryFilter::All,
        Some(raw) => match raw.parse::<CategoryFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                let error = AtlasError::InvalidRequest(e).to_string();
                return (StatusCode::BAD_REQUEST, Json(json!({"error": error}))).into_response();
            },
        },
    };

    let snapshot = state.store.current();
    let records = snapshot.records();

    let matched: Vec<&ModelRecord> = match query.q.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => search(records, text)
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect(),
        _ => by_category(records, filter),
    };

    let page_size = query.page_size.unwrap_or(state.config.page_size);
    let page = paginate(&matched, page_size, query.page.unwrap_or(1));

    let items: Vec<CatalogItem<'_>> = page
        .items
        .iter()
        .map(|&model| CatalogItem {
            model,
            strengths: strengths_of(model),
            price: format_price(model),
        })
        .collect();

    Json(json!({
        "items": items,
        "page": page.page,
        "total_pages": page.total_pages,
        "total": page.total,
        "origin": snapshot.origin(),
    }))
    .into_response()
}

/// Reload the catalog now
async fn refresh_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.load().await;

    Json(json!({
        "origin": snapshot.origin(),
        "count": snapshot.len(),
        "loaded_at": snapshot.loaded_at(),
    }))
}

/// Recommendation request
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Free-text description of the need
    pub needs: String,
    /// Metrics to weigh
    #[serde(default)]
    pub factors: Vec<Factor>,
}

/// Recommend models for a need statement
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendRequest>,
) -> Response {
    if req.needs.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": AtlasError::InvalidRequest(
                    "describe what you need the model for".to_string()
                )
                .to_string(),
            })),
        )
            .into_response();
    }

    if req.factors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": AtlasError::InvalidRequest("at least one factor is required".to_string())
                    .to_string(),
            })),
        )
            .into_response();
    }

    let needed = state.recommender.classifier().classify(&req.needs);
    let snapshot = state.store.current();
    let recommendations = state
        .recommender
        .recommend_for(snapshot.records(), &needed, &req.factors);

    tracing::debug!(
        categories = ?needed,
        count = recommendations.len(),
        "recommendation served"
    );

    (
        StatusCode::OK,
        Json(json!({
            "categories": needed,
            "recommendations": recommendations,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_listed_model() {
        let body = r#"{"data": [{"id": "a/one"}, {"id": "b/two", "name": "Two"}]}"#;
        let found = find_listed_model(body, "b/two").unwrap().unwrap();
        assert_eq!(found["name"], "Two");
        assert!(find_listed_model(body, "c/three").unwrap().is_none());
    }

    #[test]
    fn test_find_listed_model_bad_shapes() {
        assert!(find_listed_model("not json", "a").is_err());
        assert!(find_listed_model(r#"{"models": []}"#, "a").is_err());
        assert!(find_listed_model(r#"[{"id": "a"}]"#, "a").unwrap().is_some());
    }
}
