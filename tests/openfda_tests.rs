mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use pulseboard::api::{build_http_client, OpenFdaClient};
use pulseboard::models::FetchResult;

use common::{client, dead_base_url, openfda_router, spawn, Recorded};

async fn fda_with(status: StatusCode, body: String) -> (OpenFdaClient, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let base = spawn(openfda_router(status, body, recorded.clone())).await;
    (OpenFdaClient::new(client(), &base), recorded)
}

#[tokio::test]
async fn test_single_headache_report() {
    let body = json!({
        "results": [{"patient": {"reaction": [{"reactionmeddrapt": "Headache"}]}}]
    });
    let (fda, recorded) = fda_with(StatusCode::OK, body.to_string()).await;

    let result = fda.fetch_adverse_events("minoxidil", 5).await;
    let reports = result.success().expect("expected success");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].drug, "minoxidil");
    assert_eq!(reports[0].reactions, vec!["Headache".to_string()]);

    let queries = recorded.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].get("search").map(String::as_str),
        Some("patient.drug.medicinalproduct:\"minoxidil\"")
    );
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("5"));
}

#[tokio::test]
async fn test_never_returns_more_than_limit() {
    let record = json!({"patient": {"reaction": [{"reactionmeddrapt": "Dizziness"}]}});
    let body = json!({"results": vec![record; 8]});
    let (fda, _) = fda_with(StatusCode::OK, body.to_string()).await;

    for limit in [1usize, 3, 8, 20] {
        let reports = fda.fetch_adverse_events("minoxidil", limit).await.success().unwrap();
        assert!(reports.len() <= limit);
    }
}

#[tokio::test]
async fn test_malformed_record_does_not_abort_the_rest() {
    let body = json!({
        "results": [
            {"patient": {"reaction": [{"reactionmeddrapt": "Headache"}]}},
            {"receivedate": "20200101"},
            {"patient": {"reaction": [{"reactionmeddrapt": "Hypertrichosis"}]}}
        ]
    });
    let (fda, _) = fda_with(StatusCode::OK, body.to_string()).await;

    let reports = fda.fetch_adverse_events("minoxidil", 5).await.success().unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].reactions, vec!["Headache"]);
    assert!(reports[1].reactions.is_empty());
    assert_eq!(reports[2].reactions, vec!["Hypertrichosis"]);
}

#[tokio::test]
async fn test_non_200_is_unavailable() {
    let body = json!({"error": {"code": "NOT_FOUND", "message": "No matches found!"}});
    let (fda, _) = fda_with(StatusCode::NOT_FOUND, body.to_string()).await;

    match fda.fetch_adverse_events("minoxidil", 5).await {
        FetchResult::Unavailable(reason) => {
            assert!(reason.contains("404"), "reason was {}", reason);
            assert!(reason.contains("No matches found!"), "reason was {}", reason);
        }
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_throttling_on_registry_is_still_unavailable() {
    let (fda, _) = fda_with(StatusCode::TOO_MANY_REQUESTS, String::new()).await;
    let result = fda.fetch_adverse_events("minoxidil", 5).await;
    assert!(matches!(result, FetchResult::Unavailable(_)));
}

#[tokio::test]
async fn test_unparsable_body_is_unavailable() {
    let (fda, _) = fda_with(StatusCode::OK, "<html>maintenance</html>".to_string()).await;
    let result = fda.fetch_adverse_events("minoxidil", 5).await;
    assert!(matches!(result, FetchResult::Unavailable(reason) if reason.contains("parse")));
}

#[tokio::test]
async fn test_network_failure_is_unavailable() {
    let fda = OpenFdaClient::new(client(), &dead_base_url().await);
    let result = fda.fetch_adverse_events("minoxidil", 5).await;
    assert!(matches!(result, FetchResult::Unavailable(reason) if reason.contains("Network error")));
}

#[tokio::test]
async fn test_invalid_arguments_skip_the_network() {
    let (fda, recorded) = fda_with(StatusCode::OK, json!({"results": []}).to_string()).await;

    assert!(matches!(
        fda.fetch_adverse_events("   ", 5).await,
        FetchResult::Unavailable(reason) if reason.contains("Invalid argument")
    ));
    assert!(matches!(
        fda.fetch_adverse_events("minoxidil", 0).await,
        FetchResult::Unavailable(_)
    ));
    assert!(recorded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_registry_times_out() {
    let router = Router::new().route(
        "/drug/event.json",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "{}"
        }),
    );
    let base = spawn(router).await;
    let _ = client();
    let fda = OpenFdaClient::new(build_http_client(Duration::from_millis(300)).unwrap(), &base);

    let result = fda.fetch_adverse_events("minoxidil", 5).await;
    assert!(matches!(result, FetchResult::Unavailable(reason) if reason.contains("timed out")));
}
