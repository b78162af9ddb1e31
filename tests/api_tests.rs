//! End-to-end tests for the REST API, driving the router in-process.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use hook_gateway::api;
use hook_gateway::app_state::AppState;
use hook_gateway::domain::EventBus;
use hook_gateway::persistence::InMemoryHookStore;
use hook_gateway::service::HookService;

const ADMIN_ID: &str = "6d9035be-5b8c-4f02-9b9c-0f4bdb45fd45";

fn test_state() -> AppState {
    let store = Arc::new(InMemoryHookStore::new());
    let event_bus = EventBus::new(1000);
    let hook_service = Arc::new(HookService::new(store, event_bus.clone(), 3));
    AppState {
        hook_service,
        event_bus,
    }
}

fn test_app(state: AppState) -> Router {
    api::build_router().with_state(state)
}

fn create_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/hooks")
        .header("content-type", "application/json")
        .header("x-actor-id", ADMIN_ID)
        .header("x-actor-roles", "hooks:admin")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, url: &str) -> StatusCode {
    let body = json!({
        "endpoint_url": url,
        "event_types": ["issue"],
    });
    let response = app.clone().oneshot(create_request(&body)).await.unwrap();
    response.status()
}

#[tokio::test]
async fn health_returns_200() {
    let app = test_app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn event_type_catalog_lists_all_kinds() {
    let app = test_app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/config/event-types")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let kinds: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"issue"));
    assert!(kinds.contains(&"milestone"));
}

#[tokio::test]
async fn create_hook_returns_created_with_deduplicated_event_types() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "secret": "s3cret",
        "event_types": ["issue", "issue", "milestone"],
    });
    let response = app.oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["endpoint_url"], "https://example.com/hook");
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["has_secret"], true);
    assert_eq!(body["is_active"], true);
    let types = body["event_types"].as_array().unwrap();
    assert_eq!(types.len(), 2);
    // The secret itself is never echoed.
    assert!(body.get("secret").is_none());
}

#[tokio::test]
async fn create_hook_without_identity_is_unauthorized() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/hooks")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_hook_without_admin_role_is_unauthorized() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/hooks")
                .header("content-type", "application/json")
                .header("x-actor-id", ADMIN_ID)
                .header("x-actor-roles", "hooks:reader")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_hook_with_invalid_url_is_bad_request() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "ftp://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app.oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn create_hook_without_event_types_is_bad_request() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
    });
    let response = app.oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 1002);
}

#[tokio::test]
async fn create_hook_with_empty_event_types_is_accepted() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": [],
    });
    let response = app.oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["event_types"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_endpoint_is_conflict() {
    let app = test_app(test_state());

    assert_eq!(
        register(&app, "https://example.com/hook").await,
        StatusCode::CREATED
    );

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app.clone().oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 2001);

    // Exactly one row survives.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/hooks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn fourth_hook_exceeds_quota() {
    let app = test_app(test_state());

    for i in 0..3 {
        assert_eq!(
            register(&app, &format!("https://example.com/hook/{i}")).await,
            StatusCode::CREATED
        );
    }

    let body = json!({
        "endpoint_url": "https://example.com/hook/3",
        "event_types": ["issue"],
    });
    let response = app.clone().oneshot(create_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 2002);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/hooks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn get_and_delete_round_trip() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["release"],
    });
    let response = app.clone().oneshot(create_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Fetch it back.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete requires the admin role.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/hooks/{id}"))
                .header("x-actor-id", ADMIN_ID)
                .header("x-actor-roles", "hooks:admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone now.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_hook_is_not_found() {
    let app = test_app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 2003);
}

#[tokio::test]
async fn new_hook_has_empty_delivery_history() {
    let app = test_app(test_state());

    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app.clone().oneshot(create_request(&body)).await.unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks/{id}/deliveries"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deliveries_for_unknown_hook_is_not_found() {
    let app = test_app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks/{}/deliveries", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forwarded_request_id_becomes_causation_id() {
    let state = test_state();
    let mut rx = state.event_bus.subscribe();
    let app = test_app(state);

    let request_id = Uuid::new_v4();
    let body = json!({
        "endpoint_url": "https://example.com/hook",
        "event_types": ["issue"],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/hooks")
                .header("content-type", "application/json")
                .header("x-actor-id", ADMIN_ID)
                .header("x-actor-roles", "hooks:admin")
                .header("x-request-id", request_id.to_string())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let event = rx.recv().await.unwrap();
    let hook_gateway::domain::HookEvent::HookCreated { causation_id, .. } = event else {
        panic!("expected HookCreated");
    };
    assert_eq!(causation_id, request_id);
}

#[tokio::test]
async fn list_paginates() {
    let app = test_app(test_state());

    for i in 0..3 {
        assert_eq!(
            register(&app, &format!("https://example.com/hook/{i}")).await,
            StatusCode::CREATED
        );
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/hooks?page=2&per_page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
}

#[tokio::test]
async fn list_with_extreme_page_number_returns_empty_page() {
    let app = test_app(test_state());

    assert_eq!(
        register(&app, "https://example.com/hook").await,
        StatusCode::CREATED
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/hooks?page={}&per_page=100", u32::MAX))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
}
