//! End-to-end catalog tests against a mock upstream.
//!
//! Each test starts a small axum server on an ephemeral port that plays the
//! listing API, then points an `HttpSource` at it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use atlas::catalog::{
    CatalogOrigin, CatalogSource, CatalogStore, Category, HttpSource, FALLBACK_MODELS,
    METRIC_CEILING, METRIC_FLOOR,
};
use atlas::error::AtlasError;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing is listening on
async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn listing() -> Value {
    json!({
        "data": [
            {
                "id": "openai/gpt-4o",
                "name": "OpenAI: GPT-4o",
                "description": "Multimodal flagship with strong reasoning and vision.",
                "context_length": 128000,
                "pricing": {"prompt": "0.000005", "completion": "0.000015"}
            },
            {
                "id": "mistralai/codestral",
                "name": "Codestral",
                "description": "Built for code completion.",
                "pricing": {"prompt": "0.0000003", "completion": "0.0000009"}
            },
            {"name": "record without an id"}
        ]
    })
}

fn source(addr: SocketAddr) -> HttpSource {
    HttpSource::new(format!("http://{addr}/models"), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_live_listing_is_enhanced() {
    let addr = spawn_upstream(Router::new().route("/models", get(|| async { Json(listing()) }))).await;

    let store = CatalogStore::new(source(addr)).with_seed(3);
    let snapshot = store.load().await;

    assert_eq!(snapshot.origin(), CatalogOrigin::Live);
    assert_eq!(snapshot.len(), 2);

    // "vision" only in the description does not make it a media model
    let gpt = snapshot.get("openai/gpt-4o").unwrap();
    assert_eq!(gpt.provider_name(), "OpenAI");
    assert_eq!(
        gpt.capability_list(),
        &[Category::Chat, Category::ProblemSolving]
    );

    let codestral = snapshot.get("mistralai/codestral").unwrap();
    assert_eq!(codestral.provider_name(), "Mistral AI");
    assert!(codestral.has_capability(Category::Coding));

    for record in snapshot.records() {
        let metrics = record.metrics.unwrap();
        for value in [metrics.accuracy, metrics.performance, metrics.price] {
            assert!((METRIC_FLOOR..=METRIC_CEILING).contains(&value));
        }
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    async fn guarded(headers: HeaderMap) -> impl IntoResponse {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "Bearer sk-test");
        if authorized {
            (StatusCode::OK, Json(listing()))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"error": "no key"})))
        }
    }

    let addr = spawn_upstream(Router::new().route("/models", get(guarded))).await;

    let anonymous = source(addr).fetch().await;
    assert!(matches!(
        anonymous,
        Err(AtlasError::Upstream { status: 401, .. })
    ));

    let keyed = source(addr).with_api_key(Some("sk-test".to_string()));
    assert_eq!(keyed.fetch().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let addr = spawn_upstream(Router::new().route(
        "/models",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;

    let store = CatalogStore::new(source(addr));
    let snapshot = store.load().await;

    assert_eq!(snapshot.origin(), CatalogOrigin::Fallback);
    assert_eq!(snapshot.len(), FALLBACK_MODELS.len());
}

#[tokio::test]
async fn test_unreachable_upstream_falls_back() {
    let addr = closed_addr().await;
    let err = source(addr).fetch().await.unwrap_err();
    assert!(matches!(err, AtlasError::Network(_)));

    let snapshot = CatalogStore::new(source(addr)).load().await;
    assert_eq!(snapshot.origin(), CatalogOrigin::Fallback);
    assert!(snapshot.get("stability/stable-diffusion-xl").is_some());
}

#[tokio::test]
async fn test_empty_and_garbage_listings_fall_back() {
    let addr = spawn_upstream(
        Router::new()
            .route("/models", get(|| async { Json(json!({"data": []})) }))
            .route("/garbage", get(|| async { "<html>oops</html>" })),
    )
    .await;

    let empty = CatalogStore::new(source(addr)).load().await;
    assert_eq!(empty.origin(), CatalogOrigin::Fallback);

    let garbage = HttpSource::new(format!("http://{addr}/garbage"), None).unwrap();
    let snapshot = CatalogStore::new(garbage).load().await;
    assert_eq!(snapshot.origin(), CatalogOrigin::Fallback);
    assert_eq!(snapshot.len(), FALLBACK_MODELS.len());
}

#[tokio::test]
async fn test_reload_swaps_snapshot() {
    let listing = Arc::new(Mutex::new(json!({"data": [{"id": "a/one", "name": "One"}]})));

    let router = Router::new()
        .route(
            "/models",
            get(|State(listing): State<Arc<Mutex<Value>>>| async move {
                Json(listing.lock().unwrap().clone())
            }),
        )
        .with_state(Arc::clone(&listing));
    let addr = spawn_upstream(router).await;

    let store = CatalogStore::new(source(addr)).with_seed(9);
    let first = store.load().await;
    assert_eq!(first.len(), 1);

    *listing.lock().unwrap() = json!({"data": [{"id": "a/one"}, {"id": "b/two"}]});
    let second = store.load().await;

    assert_eq!(second.len(), 2);
    assert_eq!(store.current().len(), 2);
    // Readers holding the old snapshot still see it whole
    assert_eq!(first.len(), 1);
    assert_eq!(first.records()[0].name, "One");
}

#[tokio::test]
async fn test_auto_refresh_reloads_periodically() {
    let hits = Arc::new(AtomicUsize::new(0));

    let router = Router::new()
        .route(
            "/models",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(listing())
            }),
        )
        .with_state(Arc::clone(&hits));
    let addr = spawn_upstream(router).await;

    let store = Arc::new(CatalogStore::new(source(addr)));
    assert_eq!(store.current().origin(), CatalogOrigin::Fallback);

    let handle = Arc::clone(&store).spawn_auto_refresh(Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.abort();

    assert!(hits.load(Ordering::SeqCst) >= 2);
    assert_eq!(store.current().origin(), CatalogOrigin::Live);
}
