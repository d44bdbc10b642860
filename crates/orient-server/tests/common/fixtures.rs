//! Test fixtures for integration tests.

use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use orient::catalog::{CatalogHandle, SourceRecord, build_catalog};
use orient::embedding::SentenceEmbedder;
use orient::retrieval::Retriever;
use orient::scoring::ResultReducer;

use orient_server::audit::AuditLog;
use orient_server::careers::CareerPathStore;
use orient_server::gateway::{HandlerState, create_router_with_state};
use orient_server::judge::{RelevanceJudge, mock::MockJudge};
use orient_server::translate::{Localizer, mock::MockTranslator};

pub fn source_record(code: &str, title: &str, frequency: u32) -> SourceRecord {
    SourceRecord {
        code: code.to_string(),
        title: title.to_string(),
        description: format!("Works as a {}", title.to_lowercase()),
        frequency,
        embedding: None,
    }
}

/// A small occupation catalog with a generic/specific title pair.
pub fn occupation_catalog() -> Vec<SourceRecord> {
    vec![
        source_record("7115", "Carpenter", 5),
        source_record("7115.2", "Master Carpenter", 1),
        source_record("7212", "Welder", 2),
        source_record("7126", "Plumber", 1),
    ]
}

pub struct TestApp {
    pub router: Router,
    pub state: HandlerState<MockJudge, MockTranslator>,
    _audit_dir: TempDir,
}

pub struct TestAppConfig {
    pub records: Vec<SourceRecord>,
    pub judge: RelevanceJudge<MockJudge>,
    pub translator: MockTranslator,
    pub careers: CareerPathStore,
}

impl Default for TestAppConfig {
    fn default() -> Self {
        Self {
            records: occupation_catalog(),
            judge: RelevanceJudge::disabled(),
            translator: MockTranslator::tagging(),
            careers: CareerPathStore::empty(),
        }
    }
}

pub fn spawn_test_app(config: TestAppConfig) -> TestApp {
    let embedder = SentenceEmbedder::stub().unwrap();
    let catalog = build_catalog(config.records, &embedder).unwrap();

    let audit_dir = tempfile::tempdir().unwrap();
    let audit = AuditLog::new(audit_dir.path().join("audit_log.json")).unwrap();

    let state = HandlerState::new(
        Arc::new(CatalogHandle::new(catalog)),
        Arc::new(Retriever::with_default_top_k(embedder)),
        ResultReducer::new(),
        Arc::new(config.judge),
        Arc::new(Localizer::new(config.translator, "en")),
        audit,
        config.careers,
    );

    TestApp {
        router: create_router_with_state(state.clone()),
        state,
        _audit_dir: audit_dir,
    }
}
