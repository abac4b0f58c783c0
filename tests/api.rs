//! HTTP surface tests using in-process requests against the full router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use lawsmith::api::{AppState, create_router};
use lawsmith::config::AppConfig;
use lawsmith::embeddings::MockEmbeddingProvider;
use lawsmith::engine::QueryEngine;
use lawsmith::generation::ScriptedGenerator;
use lawsmith::ingestion::ingest_document;
use lawsmith::stores::MemorySectionStore;

const API_KEY: &str = "test-key";

const LAWS: &str = "1 The King's Peace\n\
    All roads belong to the crown.\n\
    \n\
    2 Trials by combat\n\
    Any knight accused of a crime may demand trial by combat.";

async fn test_router() -> Router {
    let store = Arc::new(MemorySectionStore::new());
    let embeddings = Arc::new(MockEmbeddingProvider::new());
    ingest_document(store.as_ref(), embeddings.as_ref(), LAWS)
        .await
        .unwrap();
    let generator = Arc::new(ScriptedGenerator::new("Roads are safe [1]. Trials exist [2]."));
    let engine = Arc::new(QueryEngine::new(store, embeddings, generator));

    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_key: API_KEY.to_string(),
        allowed_origin: "http://localhost:3000".to_string(),
        document_path: PathBuf::from("docs/laws.txt"),
        db_path: PathBuf::from("unused.sqlite"),
        top_k: 2,
        rebuild: false,
        openai_api_key: None,
        embedding_model: "mock".to_string(),
        embedding_dims: MockEmbeddingProvider::DIMENSIONS,
        completion_model: "scripted".to_string(),
    };

    create_router(AppState::new(engine, Arc::new(config)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_is_open_and_reports_the_index_size() {
    let router = test_router().await;
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["service_initialized"], true);
    assert_eq!(json["data"]["indexed_sections"], 2);
    assert_eq!(json["meta"]["api_version"], "1.0");
}

#[tokio::test]
async fn query_without_a_key_is_rejected() {
    let router = test_router().await;
    let response = router
        .oneshot(post("/query", None, json!({"query": "who rules?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Invalid API key");
    assert_eq!(json["errors"][0]["code"], "401");
}

#[tokio::test]
async fn query_with_a_wrong_key_is_rejected() {
    let router = test_router().await;
    let response = router
        .oneshot(post("/query", Some("nope"), json!({"query": "who rules?"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_query_returns_the_enveloped_answer() {
    let router = test_router().await;
    let response = router
        .oneshot(post(
            "/query",
            Some(API_KEY),
            json!({"query": "are the roads safe?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Success");
    assert_eq!(json["data"]["query"], "are the roads safe?");
    assert_eq!(json["data"]["response"], "Roads are safe [1]. Trials exist [2].");
    assert_eq!(json["data"]["citations"].as_array().unwrap().len(), 2);
    assert!(json["meta"]["latency_ms"].as_f64().unwrap() >= 0.0);
    assert!(json["errors"].is_null());

    let segments = json["data"]["response_segments"].as_array().unwrap();
    let rebuilt: String = segments
        .iter()
        .map(|s| s["text"].as_str().unwrap())
        .collect();
    assert_eq!(rebuilt, "Roads are safe [1]. Trials exist [2].");
}

#[tokio::test]
async fn overlong_queries_are_rejected_with_400() {
    let router = test_router().await;
    let long_query = "a".repeat(1001);
    let response = router
        .oneshot(post("/query", Some(API_KEY), json!({"query": long_query})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Query too long (max 1000 characters)");
    assert_eq!(json["errors"][0]["code"], "400");
}

#[tokio::test]
async fn query_at_exactly_1000_characters_is_accepted() {
    let router = test_router().await;
    let query = "a".repeat(1000);
    let response = router
        .oneshot(post("/query", Some(API_KEY), json!({"query": query})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn retrieval_depth_outside_bounds_is_rejected() {
    let router = test_router().await;
    for k in [0, 21] {
        let response = router
            .clone()
            .oneshot(post("/query", Some(API_KEY), json!({"query": "q", "k": k})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "k = {k}");
    }

    let response = router
        .oneshot(post("/query", Some(API_KEY), json!({"query": "q", "k": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn feedback_is_acknowledged() {
    let router = test_router().await;
    let body = json!({
        "feedback": "positive",
        "result": {
            "query": "q",
            "response": "r",
            "response_segments": [],
            "citations": []
        },
        "timestamp": "2025-06-01T12:00:00Z"
    });
    let response = router
        .oneshot(post("/feedback", Some(API_KEY), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["received"], true);
}

#[tokio::test]
async fn feedback_value_must_be_positive_or_negative() {
    let router = test_router().await;
    let body = json!({
        "feedback": "meh",
        "result": {
            "query": "q",
            "response": "r",
            "response_segments": [],
            "citations": []
        },
        "timestamp": "2025-06-01T12:00:00Z"
    });
    let response = router
        .oneshot(post("/feedback", Some(API_KEY), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn feedback_requires_the_api_key_too() {
    let router = test_router().await;
    let body = json!({
        "result": {
            "query": "q",
            "response": "r",
            "response_segments": [],
            "citations": []
        },
        "timestamp": "2025-06-01T12:00:00Z"
    });
    let response = router.oneshot(post("/feedback", None, body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
