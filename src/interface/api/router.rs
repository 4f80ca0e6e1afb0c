//! API Router configuration

use super::auth_handler::{login, logout, register};
use super::calls_handler::{end_call, start_call};
use super::history_handler::list_history;
use super::metrics_handler::metrics_handler;
use super::state::AppState;
use super::webrtc_handler::{initiate_call, terminate_call, voice_token};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout));

    let call_routes = Router::new()
        .route("/calls", post(start_call))
        .route("/calls/:id", put(end_call))
        .route("/calls/history", get(list_history));

    let webrtc_routes = Router::new()
        .route("/webrtc/calls", post(initiate_call))
        .route("/webrtc/calls/terminate", post(terminate_call))
        .route("/webrtc/token", get(voice_token));

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .route("/system/health", get(health_check))
        .nest(
            "/api",
            Router::new()
                .merge(auth_routes)
                .merge(call_routes)
                .merge(webrtc_routes),
        )
        .with_state(state)
        .merge(metrics_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
