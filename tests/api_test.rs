//! API integration tests
//!
//! Exercises the HTTP surface through the router with in-memory storage
//! and the mock telephony client.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use callbridge::application::auth::{LoginUseCase, RegisterUseCase};
use callbridge::application::calls::{
    EndCallUseCase, InitiateCallUseCase, StartCallUseCase, TerminateCallUseCase,
};
use callbridge::application::history::ListHistoryUseCase;
use callbridge::domain::call::CallRepository;
use callbridge::domain::shared::clock::{Clock, SystemClock};
use callbridge::domain::telephony::TelephonyService;
use callbridge::infrastructure::auth::JwtService;
use callbridge::infrastructure::persistence::{MemoryCallRepository, MemoryUserRepository};
use callbridge::infrastructure::telephony::MockClient;
use callbridge::interface::api::{build_router, init_metrics, AppState};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tower::ServiceExt; // For `oneshot`

// The recorder is process-global; install it once for every test
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE.get_or_init(init_metrics).clone()
}

fn test_app() -> Router {
    let call_repo: Arc<dyn CallRepository> = Arc::new(MemoryCallRepository::new());
    let user_repo = Arc::new(MemoryUserRepository::new());
    let telephony: Arc<dyn TelephonyService> = Arc::new(MockClient::new());
    let jwt = Arc::new(JwtService::new("test-secret".to_string()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = AppState {
        register: Arc::new(RegisterUseCase::new(user_repo.clone(), clock.clone())),
        login: Arc::new(LoginUseCase::new(user_repo.clone(), jwt.clone())),
        start_call: Arc::new(StartCallUseCase::new(call_repo.clone(), clock.clone())),
        end_call: Arc::new(EndCallUseCase::new(call_repo.clone(), clock.clone())),
        initiate_call: Arc::new(InitiateCallUseCase::new(
            call_repo.clone(),
            telephony.clone(),
            None,
            clock.clone(),
        )),
        terminate_call: Arc::new(TerminateCallUseCase::new(
            call_repo.clone(),
            telephony.clone(),
            clock.clone(),
        )),
        list_history: Arc::new(ListHistoryUseCase::new(call_repo)),
        jwt,
        voice_tokens: None,
    };

    build_router(state, prometheus_handle())
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Register and log in a user, returning their bearer token
async fn authenticate(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "email": email, "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let response = app
        .oneshot(get_request("/system/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_call_flow() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    // Place a call
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/webrtc/calls",
            Some(&token),
            json!({ "phone_number": "+491512345678" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "connecting");
    let call_id = body["call_id"].as_str().unwrap().to_string();
    let session_id = body["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());
    assert!(body["sdp_offer"].as_str().unwrap().contains("m=audio"));
    assert!(body.get("voice_token").is_none());

    // Hang up
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/webrtc/calls/terminate",
            Some(&token),
            json!({ "call_id": call_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "completed");
    assert!(body["duration"].as_i64().unwrap() >= 0);

    // The call shows up in history
    let response = app
        .clone()
        .oneshot(get_request("/api/calls/history", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["calls"][0]["call_id"], call_id);
    assert_eq!(body["calls"][0]["status"], "completed");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app();
    authenticate(&app, "alice@example.com").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "email": "alice@example.com", "password": "secret123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = test_app();
    authenticate(&app, "alice@example.com").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_initiate_requires_authentication() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/api/webrtc/calls",
            None,
            json!({ "phone_number": "+491512345678" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_initiate_with_malformed_number() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/webrtc/calls",
            Some(&token),
            json!({ "phone_number": "12345" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "validation_error");

    // Nothing landed in history
    let response = app
        .oneshot(get_request("/api/calls/history", Some(&token)))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_terminate_foreign_call_is_forbidden() {
    let app = test_app();
    let alice = authenticate(&app, "alice@example.com").await;
    let mallory = authenticate(&app, "mallory@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/webrtc/calls",
            Some(&alice),
            json!({ "phone_number": "+491512345678" }),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    let call_id = body["call_id"].as_str().unwrap();

    let response = app
        .oneshot(post_json(
            "/api/webrtc/calls/terminate",
            Some(&mallory),
            json!({ "call_id": call_id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_terminate_unknown_call_is_not_found() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    let response = app
        .oneshot(post_json(
            "/api/webrtc/calls/terminate",
            Some(&token),
            json!({ "call_id": "no-such-call" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_terminate_twice_is_conflict() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/webrtc/calls",
            Some(&token),
            json!({ "phone_number": "+491512345678" }),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    let call_id = body["call_id"].as_str().unwrap().to_string();

    let terminate = post_json(
        "/api/webrtc/calls/terminate",
        Some(&token),
        json!({ "call_id": call_id }),
    );
    let response = app.clone().oneshot(terminate).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            "/api/webrtc/calls/terminate",
            Some(&token),
            json!({ "call_id": call_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_voice_token_unavailable_without_config() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    let response = app
        .oneshot(get_request("/api/webrtc/token", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_record_only_call_flow() {
    let app = test_app();
    let token = authenticate(&app, "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/calls",
            Some(&token),
            json!({ "phone_number": "+491512345678" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    let call_id = body["call_id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/calls/{}", call_id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = test_app();

    let response = app.oneshot(get_request("/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
