//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers); tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/fragment", get(http::http_get_fragment).put(http::http_put_fragment))
        .route("/api/v1/kvp/parse", post(http::http_post_kvp_parse))
        .route("/api/v1/kvp/get", post(http::http_post_kvp_get))
        .route("/api/v1/kvp/set", post(http::http_post_kvp_set))
        .route("/api/v1/kvp/remove", post(http::http_post_kvp_remove))
        .route("/api/v1/format", post(http::http_post_format))
        .route("/api/v1/truncate", post(http::http_post_truncate))
        .route("/api/v1/numbers/commas", post(http::http_post_commas))
        .route("/api/v1/numbers/two_digits", post(http::http_post_two_digits))
        .route("/api/v1/unique", post(http::http_post_unique))
        .route("/api/v1/nl2br", post(http::http_post_nl2br))
        .route("/api/v1/selectors", post(http::http_post_selectors))
        .route("/api/v1/popup", post(http::http_post_popup))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::HelperConfig;

    fn app(fragment: &str) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::from_config(HelperConfig {
            fragment: fragment.into(),
            ..HelperConfig::default()
        }));
        (build_router(state.clone()), state)
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (router, _) = app("");
        let req = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_kvp_parse_explicit_source() {
        let (router, _) = app("");
        let (status, body) =
            post_json(router, "/api/v1/kvp/parse", json!({ "source": "nav&orphan1&k=v&orphan2" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "noKeyHash": "nav", "k": "v", "noKeys": ["orphan1", "orphan2"] }));
    }

    #[tokio::test]
    async fn test_kvp_get_status_codes() {
        let (router, _) = app("a=1");
        let (status, body) = post_json(router.clone(), "/api/v1/kvp/get", json!({ "key": "a" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "key": "a", "value": "1" }));

        let (status, body) = post_json(router.clone(), "/api/v1/kvp/get", json!({ "key": "missing" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");

        let (status, _) = post_json(router, "/api/v1/kvp/get", json!({ "key": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_kvp_set_and_remove() {
        let (router, state) = app("");
        let (status, body) =
            post_json(router.clone(), "/api/v1/kvp/set", json!({ "updates": { "b": "2" }, "source": "a=1" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "kvp": "a=1&b=2", "written": false }));
        assert_eq!(state.fragment().await, "");

        let (_, body) = post_json(router.clone(), "/api/v1/kvp/set", json!({ "updates": { "page": "3" } })).await;
        assert_eq!(body, json!({ "written": true, "fragment": "#page=3" }));

        let (_, body) = post_json(router, "/api/v1/kvp/remove", json!({ "key": "page" })).await;
        assert_eq!(body, json!({ "written": true, "fragment": "" }));
        assert_eq!(state.fragment().await, "");
    }

    #[tokio::test]
    async fn test_kvp_set_rejects_non_object_updates() {
        let (router, _) = app("");
        let (status, _) = post_json(router, "/api/v1/kvp/set", json!({ "updates": "b=2" })).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_text_helpers() {
        let (router, _) = app("");
        let (status, body) = post_json(
            router.clone(),
            "/api/v1/format",
            json!({ "template": "The big {color} fox", "markers": { "kind": "map", "values": { "color": "red" } } }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "The big red fox");

        let (status, _) = post_json(
            router.clone(),
            "/api/v1/format",
            json!({ "template": "", "markers": { "kind": "positional", "values": ["x"] } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) =
            post_json(router.clone(), "/api/v1/truncate", json!({ "text": "The quick brown fox", "maxChars": 10 })).await;
        assert_eq!(body["text"], "The&#8230;");

        let (_, body) = post_json(router.clone(), "/api/v1/numbers/commas", json!({ "num": 1234567.89 })).await;
        assert_eq!(body["text"], "1,234,567.89");

        let (_, body) = post_json(router, "/api/v1/unique", json!({ "items": [1, 1, 2, "2", 3] })).await;
        assert_eq!(body["items"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_popup_endpoint() {
        let (router, _) = app("");
        let (status, body) =
            post_json(router.clone(), "/api/v1/popup", json!({ "url": "/help", "options": { "center": false } })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "popWindow");
        assert_eq!(body["features"], "toolbar=no,menubar=no,resizable=yes,scrollbars=yes,width=790,height=600");

        let (status, _) = post_json(router, "/api/v1/popup", json!({ "url": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
