mod common;

use std::collections::HashSet;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use common::fixtures::{TestAppConfig, occupation_catalog, source_record, spawn_test_app};
use common::request;

use orient_server::careers::CareerPathStore;
use orient_server::judge::{RelevanceJudge, mock::MockJudge};
use orient_server::translate::mock::MockTranslator;

#[tokio::test]
async fn test_healthz() {
    let app = spawn_test_app(TestAppConfig::default());

    let (status, _, body) = request(&app.router, "GET", "/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_components() {
    let app = spawn_test_app(TestAppConfig::default());

    let (status, _, body) = request(&app.router, "GET", "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["embedder_mode"], "stub");
    assert_eq!(body["components"]["judge"], "disabled");
    assert_eq!(body["components"]["catalog_records"], 4);
}

#[tokio::test]
async fn test_search_blank_query_is_bad_request() {
    let app = spawn_test_app(TestAppConfig::default());

    let (status, _, body) = request(&app.router, "GET", "/search?query=%20%20", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty query");
}

#[tokio::test]
async fn test_search_missing_query_is_bad_request() {
    let app = spawn_test_app(TestAppConfig::default());

    let (status, _, _) = request(&app.router, "GET", "/search", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_dedup_and_result_cap() {
    // 15 unique titles -> exactly 10 results, no title repeated.
    let records = (0..15)
        .map(|i| source_record(&format!("{i}"), &format!("Occupation {i}"), 1))
        .collect();
    let app = spawn_test_app(TestAppConfig {
        records,
        ..Default::default()
    });

    let (status, rank, body) =
        request(&app.router, "GET", "/search?query=occupation%20work", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(rank.as_deref(), Some("first_stage"));

    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 10);

    let titles: HashSet<&str> = results
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 10);

    for result in results {
        let confidence = result["confidence_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&confidence));
    }
}

#[tokio::test]
async fn test_search_confidence_is_sorted_descending_without_judge() {
    let app = spawn_test_app(TestAppConfig::default());

    let (_, _, body) = request(&app.router, "GET", "/search?query=woodworking", None).await;

    let scores: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["confidence_score"].as_f64().unwrap())
        .collect();

    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn test_search_native_language_is_byte_identical() {
    let app = spawn_test_app(TestAppConfig::default());

    let (_, _, untranslated) =
        request(&app.router, "GET", "/search?query=woodworking", None).await;
    let (_, _, native) =
        request(&app.router, "GET", "/search?query=woodworking&lang=en", None).await;

    assert_eq!(untranslated, native);

    let catalog_titles: HashSet<String> = occupation_catalog()
        .into_iter()
        .map(|r| r.title)
        .collect();
    for result in native.as_array().unwrap() {
        assert!(catalog_titles.contains(result["title"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_search_translates_other_language() {
    let app = spawn_test_app(TestAppConfig::default());

    let (_, _, body) =
        request(&app.router, "GET", "/search?query=woodworking&lang=hi", None).await;

    for result in body.as_array().unwrap() {
        assert!(result["title"].as_str().unwrap().starts_with("[hi] "));
        assert!(result["description"].as_str().unwrap().starts_with("[hi] "));
    }
}

#[tokio::test]
async fn test_search_translation_failure_keeps_original_text() {
    let failing = spawn_test_app(TestAppConfig {
        translator: MockTranslator::failing(),
        ..Default::default()
    });
    let reference = spawn_test_app(TestAppConfig::default());

    let (_, _, degraded) =
        request(&failing.router, "GET", "/search?query=woodworking&lang=hi", None).await;
    let (_, _, original) =
        request(&reference.router, "GET", "/search?query=woodworking", None).await;

    assert_eq!(degraded, original);
}

#[tokio::test]
async fn test_search_judge_timeout_falls_back_to_first_stage() {
    let hanging = spawn_test_app(TestAppConfig {
        judge: RelevanceJudge::new(
            MockJudge::hanging(Duration::from_secs(60)),
            Duration::from_millis(20),
        ),
        ..Default::default()
    });
    let disabled = spawn_test_app(TestAppConfig::default());

    let (status, rank, with_fallback) =
        request(&hanging.router, "GET", "/search?query=woodworking", None).await;
    let (_, _, first_stage) =
        request(&disabled.router, "GET", "/search?query=woodworking", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(rank.as_deref(), Some("fallback"));
    assert_eq!(with_fallback, first_stage);
}

#[tokio::test]
async fn test_search_judge_garbage_falls_back_to_first_stage() {
    let garbled = spawn_test_app(TestAppConfig {
        judge: RelevanceJudge::new(
            MockJudge::replying("Sure! Here are my thoughts..."),
            Duration::from_secs(1),
        ),
        ..Default::default()
    });
    let disabled = spawn_test_app(TestAppConfig::default());

    let (_, rank, with_fallback) =
        request(&garbled.router, "GET", "/search?query=woodworking", None).await;
    let (_, _, first_stage) =
        request(&disabled.router, "GET", "/search?query=woodworking", None).await;

    assert_eq!(rank.as_deref(), Some("fallback"));
    assert_eq!(with_fallback, first_stage);
}

#[tokio::test]
async fn test_search_judge_verdicts_reorder_results() {
    // Two records only, so the reduced set is exactly both and the scripted
    // verdicts form an exact cover.
    let records = vec![
        source_record("1", "Carpenter", 1),
        source_record("2", "Shipwright", 1),
    ];
    let verdicts = serde_json::json!([
        {"code": "1", "title": "Carpenter", "score": 40.0, "reasoning": "generic match"},
        {"code": "2", "title": "Shipwright", "score": 90.0, "reasoning": "specialist match"}
    ])
    .to_string();

    let app = spawn_test_app(TestAppConfig {
        records,
        judge: RelevanceJudge::new(MockJudge::replying(verdicts), Duration::from_secs(1)),
        ..Default::default()
    });

    let (_, rank, body) = request(&app.router, "GET", "/search?query=boats", None).await;

    assert_eq!(rank.as_deref(), Some("reranked"));
    let results = body.as_array().unwrap();
    assert_eq!(results[0]["code"], "2");
    assert_eq!(results[0]["judge_score"], 90.0);
    assert_eq!(results[0]["judge_reasoning"], "specialist match");
    assert_eq!(results[1]["code"], "1");
}

#[tokio::test]
async fn test_catalog_replace_and_search_new_store() {
    let app = spawn_test_app(TestAppConfig::default());

    let replacement = serde_json::json!([
        {"code": "2111", "title": "Physicist", "description": "Studies matter and energy"}
    ]);
    let (status, _, body) = request(&app.router, "PUT", "/catalog", Some(replacement)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], 1);

    let (_, _, catalog) = request(&app.router, "GET", "/catalog", None).await;
    let records = catalog.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Physicist");
    // optional frequency defaulted
    assert_eq!(records[0]["frequency"], 1);

    let (_, _, results) = request(&app.router, "GET", "/search?query=physics", None).await;
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["title"], "Physicist");
}

#[tokio::test]
async fn test_catalog_replace_rejects_invalid_records() {
    let app = spawn_test_app(TestAppConfig::default());

    let replacement = serde_json::json!([
        {"code": "x", "title": "Broken", "description": "", "frequency": 0}
    ]);
    let (status, _, _) = request(&app.router, "PUT", "/catalog", Some(replacement)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    // old store untouched
    let (_, _, catalog) = request(&app.router, "GET", "/catalog", None).await;
    assert_eq!(catalog.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_careers_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("career_paths.json");
    std::fs::write(
        &path,
        r#"{"Carpenter": {"stages": ["Apprentice", "Master"]}}"#,
    )
    .unwrap();

    let app = spawn_test_app(TestAppConfig {
        careers: CareerPathStore::load(&path).unwrap(),
        ..Default::default()
    });

    let (status, _, titles) = request(&app.router, "GET", "/careers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles, serde_json::json!([{"title": "Carpenter"}]));

    let (status, _, path_body) =
        request(&app.router, "GET", "/careers/path?title=Carpenter", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(path_body["stages"][1], "Master");

    let (status, _, _) =
        request(&app.router, "GET", "/careers/path?title=Astronaut", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audit_endpoints() {
    let app = spawn_test_app(TestAppConfig::default());

    let event = serde_json::json!({
        "device": "kiosk-7",
        "action": "search",
        "details": {"query": "welder"}
    });
    let (status, _, body) = request(&app.router, "POST", "/audit", Some(event)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, events) = request(&app.router, "GET", "/audit", None).await;
    assert_eq!(status, StatusCode::OK);

    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["device"], "kiosk-7");
    assert_eq!(events[0]["details"]["query"], "welder");
}

#[tokio::test]
async fn test_audit_defaults_missing_fields() {
    let app = spawn_test_app(TestAppConfig::default());

    let (status, _, _) = request(&app.router, "POST", "/audit", Some(Value::Object(Default::default()))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, events) = request(&app.router, "GET", "/audit", None).await;
    assert_eq!(events[0]["device"], "Unknown");
    assert_eq!(events[0]["action"], "Unknown");
}
