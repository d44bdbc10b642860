use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use orient::catalog::{SourceRecord, build_catalog};
use orient::retrieval::RetrievalError;

use crate::audit::AuditEvent;
use crate::gateway::RANK_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::judge::JudgeBackend;
use crate::translate::TranslationBackend;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub lang: String,
}

/// The core pipeline: retrieve -> dedup+score -> sort+truncate ->
/// [rerank | identity] -> [localize | identity] -> respond.
#[instrument(skip(state, params), fields(lang = %params.lang))]
pub async fn search_handler<J, T>(
    State(state): State<HandlerState<J, T>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err(GatewayError::EmptyQuery);
    }

    let catalog = state.catalog.snapshot();
    debug!(catalog_size = catalog.len(), "Running occupation search");

    // Embedding + similarity scan are CPU-bound; keep them off the runtime.
    let reduced = {
        let retriever = state.retriever.clone();
        let reducer = state.reducer;
        let catalog = catalog.clone();
        let query = query.clone();

        tokio::task::spawn_blocking(move || {
            let candidates = retriever.retrieve(&catalog, &query)?;
            Ok::<_, RetrievalError>(reducer.reduce(&candidates, catalog.len()))
        })
        .await
        .map_err(|e| GatewayError::Internal(format!("search task failed: {e}")))?
        .map_err(|e| {
            warn!(error = %e, "Retrieval failed");
            GatewayError::SearchFailed(e.to_string())
        })?
    };

    let (results, outcome) = state.judge.rerank(&query, reduced).await;
    let results = state.localizer.localize(results, &params.lang).await;

    state.audit.record_detached(AuditEvent::new(
        "server",
        "search",
        serde_json::json!({
            "query": query,
            "lang": params.lang,
            "results": results.len(),
            "rank": outcome.as_header_value(),
        }),
    ));

    let mut headers = HeaderMap::new();
    headers.insert(RANK_HEADER, HeaderValue::from_static(outcome.as_header_value()));

    Ok((StatusCode::OK, headers, Json(results)).into_response())
}

pub async fn get_catalog_handler<J, T>(State(state): State<HandlerState<J, T>>) -> Response
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let catalog = state.catalog.snapshot();
    Json(catalog.records().to_vec()).into_response()
}

#[derive(Debug, Serialize)]
pub struct ReplaceCatalogResponse {
    pub status: &'static str,
    pub records: usize,
}

/// Administrative bulk replace. The incoming records are validated and
/// embedded off the request thread, then swapped into the handle atomically;
/// in-flight searches keep the snapshot they started with.
#[instrument(skip(state, records), fields(records = records.len()))]
pub async fn replace_catalog_handler<J, T>(
    State(state): State<HandlerState<J, T>>,
    Json(records): Json<Vec<SourceRecord>>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let retriever = state.retriever.clone();
    let catalog = tokio::task::spawn_blocking(move || {
        build_catalog(records, retriever.embedder())
    })
    .await
    .map_err(|e| GatewayError::Internal(format!("catalog build task failed: {e}")))?
    .map_err(|e| GatewayError::InvalidCatalog(e.to_string()))?;

    let count = catalog.len();
    state.catalog.swap(catalog);
    info!(records = count, "Catalog replaced");

    Ok((
        StatusCode::OK,
        Json(ReplaceCatalogResponse {
            status: "ok",
            records: count,
        }),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct CareerTitle {
    pub title: String,
}

pub async fn list_careers_handler<J, T>(State(state): State<HandlerState<J, T>>) -> Response
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let titles: Vec<CareerTitle> = state
        .careers
        .titles()
        .into_iter()
        .map(|title| CareerTitle {
            title: title.to_string(),
        })
        .collect();

    Json(titles).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CareerPathParams {
    #[serde(default)]
    pub title: String,
}

pub async fn career_path_handler<J, T>(
    State(state): State<HandlerState<J, T>>,
    Query(params): Query<CareerPathParams>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    match state.careers.get(&params.title) {
        Some(path) => Ok(Json(path.clone()).into_response()),
        None => Err(GatewayError::CareerNotFound(params.title)),
    }
}

fn default_device() -> String {
    "Unknown".to_string()
}

fn default_action() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub status: &'static str,
}

pub async fn record_audit_handler<J, T>(
    State(state): State<HandlerState<J, T>>,
    Json(request): Json<AuditRequest>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let audit = state.audit.clone();
    let event = AuditEvent::new(request.device, request.action, request.details);

    tokio::task::spawn_blocking(move || audit.record(event))
        .await
        .map_err(|e| GatewayError::Internal(format!("audit task failed: {e}")))?
        .map_err(|e| GatewayError::AuditFailed(e.to_string()))?;

    Ok(Json(AuditResponse { status: "ok" }).into_response())
}

pub async fn list_audit_handler<J, T>(
    State(state): State<HandlerState<J, T>>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend,
    T: TranslationBackend,
{
    let audit = state.audit.clone();

    let events = tokio::task::spawn_blocking(move || audit.entries())
        .await
        .map_err(|e| GatewayError::Internal(format!("audit task failed: {e}")))?
        .map_err(|e| GatewayError::AuditFailed(e.to_string()))?;

    Ok(Json(events).into_response())
}
