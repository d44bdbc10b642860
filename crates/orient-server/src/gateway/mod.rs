//! HTTP gateway (axum) for occupation search.
//!
//! This module is primarily used by the `orient` server binary.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::search_handler;
pub use state::HandlerState;

use crate::judge::JudgeBackend;
use crate::translate::TranslationBackend;

/// Response header reporting how the ranking was produced
/// (`first_stage` / `reranked` / `fallback`).
pub const RANK_HEADER: &str = "x-orient-rank";

pub fn create_router_with_state<J, T>(state: HandlerState<J, T>) -> Router
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/search", get(handler::search_handler))
        .route(
            "/catalog",
            get(handler::get_catalog_handler).put(handler::replace_catalog_handler),
        )
        .route("/careers", get(handler::list_careers_handler))
        .route("/careers/path", get(handler::career_path_handler))
        .route(
            "/audit",
            get(handler::list_audit_handler).post(handler::record_audit_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub catalog_records: usize,
    pub embedder_mode: &'static str,
    pub judge: &'static str,
    pub translation: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<J, T>(State(state): State<HandlerState<J, T>>) -> Response
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let catalog = state.catalog.snapshot();

    let embedder_mode = if state.retriever.embedder().is_stub() {
        "stub"
    } else {
        "real"
    };

    let judge = if state.judge.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    let components = ComponentStatus {
        http: "ready",
        catalog_records: catalog.len(),
        embedder_mode,
        judge,
        translation: "ready",
    };

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
