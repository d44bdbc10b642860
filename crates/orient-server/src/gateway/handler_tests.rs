//! Unit tests driving the handlers as plain async functions.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use orient::catalog::{CatalogHandle, SourceRecord, build_catalog};
use orient::embedding::SentenceEmbedder;
use orient::retrieval::Retriever;
use orient::scoring::{ResultReducer, ScoredResult};

use crate::audit::AuditLog;
use crate::careers::CareerPathStore;
use crate::gateway::RANK_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::handler::*;
use crate::gateway::state::HandlerState;
use crate::judge::{RelevanceJudge, mock::MockJudge};
use crate::translate::{Localizer, mock::MockTranslator};

fn source_record(code: &str, title: &str) -> SourceRecord {
    SourceRecord {
        code: code.to_string(),
        title: title.to_string(),
        description: format!("Works as a {}", title.to_lowercase()),
        frequency: 1,
        embedding: None,
    }
}

fn sample_records() -> Vec<SourceRecord> {
    vec![
        source_record("7115", "Carpenter"),
        source_record("7212", "Welder"),
        source_record("7126", "Plumber"),
    ]
}

struct TestHarness {
    state: HandlerState<MockJudge, MockTranslator>,
    _audit_dir: tempfile::TempDir,
}

fn harness(records: Vec<SourceRecord>) -> TestHarness {
    harness_with_judge(records, RelevanceJudge::disabled())
}

fn harness_with_judge(
    records: Vec<SourceRecord>,
    judge: RelevanceJudge<MockJudge>,
) -> TestHarness {
    let embedder = SentenceEmbedder::stub().unwrap();
    let catalog = build_catalog(records, &embedder).unwrap();

    let audit_dir = tempfile::tempdir().unwrap();
    let audit = AuditLog::new(audit_dir.path().join("audit_log.json")).unwrap();

    let state = HandlerState::new(
        Arc::new(CatalogHandle::new(catalog)),
        Arc::new(Retriever::with_default_top_k(embedder)),
        ResultReducer::new(),
        Arc::new(judge),
        Arc::new(Localizer::new(MockTranslator::tagging(), "en")),
        audit,
        CareerPathStore::empty(),
    );

    TestHarness {
        state,
        _audit_dir: audit_dir,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_search_returns_ranked_results() {
    let h = harness(sample_records());

    let response = search_handler(
        State(h.state.clone()),
        Query(SearchParams {
            query: "carpenter".to_string(),
            lang: String::new(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(RANK_HEADER).unwrap(),
        "first_stage"
    );

    let results: Vec<ScoredResult> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(results.len(), 3);
    for result in &results {
        assert!((0.0..=100.0).contains(&result.confidence_score));
    }
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let h = harness(sample_records());

    let err = search_handler(
        State(h.state.clone()),
        Query(SearchParams {
            query: "   ".to_string(),
            lang: String::new(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GatewayError::EmptyQuery));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "empty query");
}

#[tokio::test]
async fn test_search_empty_catalog_is_empty_response() {
    let h = harness(Vec::new());

    let response = search_handler(
        State(h.state.clone()),
        Query(SearchParams {
            query: "anything".to_string(),
            lang: String::new(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_search_localizes_when_lang_differs() {
    let h = harness(sample_records());

    let response = search_handler(
        State(h.state.clone()),
        Query(SearchParams {
            query: "carpenter".to_string(),
            lang: "hi".to_string(),
        }),
    )
    .await
    .unwrap();

    let results: Vec<ScoredResult> = serde_json::from_value(body_json(response).await).unwrap();
    assert!(results.iter().all(|r| r.title.starts_with("[hi] ")));
}

#[tokio::test]
async fn test_search_judge_fallback_keeps_first_stage_order() {
    let hanging = harness_with_judge(
        sample_records(),
        RelevanceJudge::new(
            MockJudge::hanging(Duration::from_secs(60)),
            Duration::from_millis(20),
        ),
    );
    let disabled = harness(sample_records());

    let params = || SearchParams {
        query: "carpenter".to_string(),
        lang: String::new(),
    };

    let with_fallback = search_handler(State(hanging.state.clone()), Query(params()))
        .await
        .unwrap();
    assert_eq!(
        with_fallback.headers().get(RANK_HEADER).unwrap(),
        "fallback"
    );

    let first_stage = search_handler(State(disabled.state.clone()), Query(params()))
        .await
        .unwrap();

    // Identical catalog + deterministic stub embedder: the fallback body must
    // equal the pre-rerank ranking exactly.
    assert_eq!(
        body_json(with_fallback).await,
        body_json(first_stage).await
    );
}

#[tokio::test]
async fn test_replace_catalog_swaps_store() {
    let h = harness(sample_records());

    let response = replace_catalog_handler(
        State(h.state.clone()),
        axum::Json(vec![source_record("9999", "Astronomer")]),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["records"], 1);

    let catalog = h.state.catalog.snapshot();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.records()[0].title, "Astronomer");
}

#[tokio::test]
async fn test_replace_catalog_invalid_payload_leaves_store_untouched() {
    let h = harness(sample_records());

    let mut bad = source_record("0", "Broken");
    bad.frequency = 0;

    let err = replace_catalog_handler(State(h.state.clone()), axum::Json(vec![bad]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidCatalog(_)));

    assert_eq!(h.state.catalog.snapshot().len(), 3);
}

#[tokio::test]
async fn test_get_catalog_omits_embeddings() {
    let h = harness(sample_records());

    let response = get_catalog_handler(State(h.state.clone())).await;
    let body = body_json(response).await;

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records[0].get("embedding").is_none());
    assert!(records[0].get("title").is_some());
}

#[tokio::test]
async fn test_career_path_not_found() {
    let h = harness(sample_records());

    let err = career_path_handler(
        State(h.state.clone()),
        Query(CareerPathParams {
            title: "Astronaut".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GatewayError::CareerNotFound(_)));
}

#[tokio::test]
async fn test_audit_roundtrip() {
    let h = harness(sample_records());

    let response = record_audit_handler(
        State(h.state.clone()),
        axum::Json(AuditRequest {
            device: "kiosk-1".to_string(),
            action: "search".to_string(),
            details: serde_json::json!({"query": "carpenter"}),
        }),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = list_audit_handler(State(h.state.clone())).await.unwrap();
    let body = body_json(response).await;
    let events = body.as_array().unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["device"], "kiosk-1");
    assert_eq!(events[0]["action"], "search");
}
