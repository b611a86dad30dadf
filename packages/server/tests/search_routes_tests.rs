//! HTTP route integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use server_core::server::{build_app, AppState};
use timeline::testing::{
    FailingStore, MockEventGenerator, MockExtractProvider, MockImageProvider,
};
use timeline::{Event, Image, MemorySearchHistory, MemoryStore, SearchHistory, TimelineService};

struct TestApp {
    router: axum::Router,
    extracts: Arc<MockExtractProvider>,
    history: Arc<MemorySearchHistory>,
}

fn setup_test_app() -> TestApp {
    let extracts = Arc::new(
        MockExtractProvider::new()
            .with_extract("Rome", "Rome is the capital city of Italy.")
            .with_missing("Qwxzzy"),
    );
    let generator = Arc::new(MockEventGenerator::new(vec![
        Event::new("476", "Fall of the Western Roman Empire"),
        Event::new("753 BC", "Founding of Rome"),
        Event::new("1871", "Rome becomes capital of Italy"),
    ]));
    let images = Arc::new(MockImageProvider::new(vec![Image::new(
        "https://img/colosseum.jpg",
        "Colosseum",
    )]));

    let timelines = TimelineService::new(
        Arc::new(MemoryStore::new()),
        extracts.clone(),
        generator,
        images,
    );
    let history = Arc::new(MemorySearchHistory::new());
    let state = AppState::new(timelines, history.clone());

    TestApp {
        router: build_app(state, &[]),
        extracts,
        history,
    }
}

async fn json_response(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request failed");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    let value: Value = serde_json::from_slice(&body).expect("invalid json");
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let (status, body) = json_response(&app.router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_search_generates_then_serves_cache() {
    let app = setup_test_app();

    let (status, body) = json_response(&app.router, get("/search?q=Rome")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["extract"], "Rome is the capital city of Italy.");
    assert_eq!(body["source"], "mock-extract + mock-generator");
    assert_eq!(body["timelineEvents"][0]["date"], "753 BC");
    assert_eq!(body["timelineEvents"][2]["date"], "1871");
    assert_eq!(body["images"][0]["src"], "https://img/colosseum.jpg");
    assert!(body.get("degraded").is_none());

    let (status, body) = json_response(&app.router, get("/search?q=ROME")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "cache");
    assert_eq!(body["timelineEvents"].as_array().unwrap().len(), 3);
    assert_eq!(app.extracts.call_count(), 1);
}

#[tokio::test]
async fn test_search_year_range() {
    let app = setup_test_app();

    let (status, body) = json_response(
        &app.router,
        get("/search?q=Rome&startYear=800%20BC&endYear=500"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body["timelineEvents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["753 BC", "476"]);
}

#[tokio::test]
async fn test_search_not_found() {
    let app = setup_test_app();

    let (status, body) = json_response(&app.router, get("/search?q=Qwxzzy")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "not found");
    assert_eq!(body["timelineEvents"], json!([]));
    assert_eq!(body["images"], json!([]));
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = setup_test_app();

    for uri in ["/search", "/search?q=", "/search?q=%20%20"] {
        let (status, body) = json_response(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Query parameter \"q\" is required.");
    }
    assert_eq!(app.extracts.call_count(), 0);
}

#[tokio::test]
async fn test_search_failure_is_500() {
    let timelines = TimelineService::new(
        Arc::new(FailingStore::all()),
        Arc::new(MockExtractProvider::new()),
        Arc::new(MockEventGenerator::default()),
        Arc::new(MockImageProvider::default()),
    );
    let router = build_app(
        AppState::new(timelines, Arc::new(MemorySearchHistory::new())),
        &[],
    );

    let (status, body) = json_response(&router, get("/search?q=Rome")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process search request.");
    assert!(body["details"].as_str().unwrap().contains("store unavailable"));
}

#[tokio::test]
async fn test_search_records_history_for_user() {
    let app = setup_test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/search?q=Rome")
        .header("x-user-id", "u-1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = json_response(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.history.recent("u-1").await.unwrap(), vec!["rome"]);

    // Anonymous searches are not recorded anywhere
    json_response(&app.router, get("/search?q=Rome")).await;
    assert_eq!(app.history.recent("u-1").await.unwrap(), vec!["rome"]);
}

#[tokio::test]
async fn test_history_routes() {
    let app = setup_test_app();

    let (status, body) =
        json_response(&app.router, get("/api/users/search-history/u-7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for query in ["Rome", "Carthage", "  rome "] {
        let (status, _) = json_response(
            &app.router,
            post_json(
                "/api/users/search-history",
                json!({"userId": "u-7", "query": query}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) =
        json_response(&app.router, get("/api/users/search-history/u-7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["carthage", "rome"]));
}

#[tokio::test]
async fn test_history_rejects_blank_query() {
    let app = setup_test_app();

    let (status, body) = json_response(
        &app.router,
        post_json(
            "/api/users/search-history",
            json!({"userId": "u-7", "query": "   "}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");
}
