mod common;

use common::*;
use llm_lab_core::{ExperimentCreate, ExperimentId, ResponseId};
use llm_lab_sdk::{ExportFormat, LlmLabClient, SdkConfig, SdkError, NETWORK_ERROR_MESSAGE};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_uses_trailing_slash_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            experiment_json(1, "First"),
            experiment_json(2, "Second"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let experiments = client_for(&server).experiments().list().await.unwrap();

    assert_eq!(experiments.len(), 2);
    assert_eq!(experiments[1].id, ExperimentId::new(2));
    assert_eq!(experiments[1].name, "Second");
}

#[tokio::test]
async fn test_get_returns_detail_with_response_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_detail_json(5, "Sweep", 9)))
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .experiments()
        .get(ExperimentId::new(5))
        .await
        .unwrap();

    assert_eq!(detail.name(), "Sweep");
    assert_eq!(detail.response_count, 9);
}

#[tokio::test]
async fn test_create_posts_payload_and_returns_experiment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/experiments/"))
        .and(body_partial_json(json!({
            "name": "Creativity",
            "temperature_range": [0.2, 0.9],
            "top_p_range": [0.8, 0.9, 1.0],
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json(11, "Creativity")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ExperimentCreate::new("Creativity", "Write a haiku").with_temperatures(vec![0.2, 0.9]);
    let created = client_for(&server).experiments().create(&request).await.unwrap();

    assert_eq!(created.id, ExperimentId::new(11));
}

#[tokio::test]
async fn test_out_of_range_temperature_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json(1, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let request = ExperimentCreate::new("Too hot", "Say hi").with_temperatures(vec![2.5]);
    let err = client_for(&server).experiments().create(&request).await.unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
    assert!(err.to_string().contains("Temperature must be between 0.0 and 2.0"));
}

#[tokio::test]
async fn test_backend_detail_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/experiments/"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "Temperature out of range" })),
        )
        .mount(&server)
        .await;

    let request = ExperimentCreate::new("Edge", "Say hi");
    let err = client_for(&server).experiments().create(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "Temperature out of range");
    assert_eq!(err.status_code(), Some(422));
}

#[tokio::test]
async fn test_error_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/responses/4"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .responses()
        .get(ResponseId::new(4))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "An error occurred");
}

#[tokio::test]
async fn test_timeout_surfaces_network_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, Duration::from_millis(50));
    let err = client.experiments().list().await.unwrap_err();

    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    assert!(matches!(err, SdkError::Network { timed_out: true, .. }));
}

#[tokio::test]
async fn test_unreachable_backend_surfaces_network_message() {
    // Nothing listens on the discard port.
    let client = LlmLabClient::new(SdkConfig::new("http://127.0.0.1:9")).unwrap();

    let err = client.experiments().list().await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_delete_accepts_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiments/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Experiment deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .experiments()
        .delete(ExperimentId::new(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_responses_and_metrics_use_experiment_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/responses/experiment/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            response_json(1, 2, 0.5, 0.9, 0.6),
            response_json(2, 2, 1.0, 0.9, 0.9),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/metrics/experiment/2/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_summary_json()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let responses = client
        .responses()
        .get_by_experiment(ExperimentId::new(2))
        .await
        .unwrap();
    let summary = client.metrics().get_summary(ExperimentId::new(2)).await.unwrap();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1].overall_score(), Some(0.9));
    let overall = summary.get("overall_score").unwrap();
    assert_eq!(overall.best().map(|r| r.response_id), Some(ResponseId::new(2)));
}

#[tokio::test]
async fn test_export_downloads_into_directory() {
    let server = MockServer::start().await;
    let csv = "id,temperature,top_p,text\n1,0.5,0.9,hello\n";
    Mock::given(method("GET"))
        .and(path("/api/export/experiment/8/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/export/experiment/8/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "experiment": { "id": 8 } })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();

    let file = client.export().export_csv(ExperimentId::new(8)).await.unwrap();
    assert_eq!(file.filename, "experiment_8.csv");
    assert_eq!(file.bytes, csv.as_bytes());

    let csv_path = client
        .export()
        .download_csv(ExperimentId::new(8), dir.path())
        .await
        .unwrap();
    let json_path = client
        .export()
        .download(ExperimentId::new(8), ExportFormat::Json, dir.path())
        .await
        .unwrap();

    assert_eq!(csv_path, dir.path().join("experiment_8.csv"));
    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), csv);
    assert_eq!(json_path.file_name().unwrap(), "experiment_8.json");
}

#[tokio::test]
async fn test_export_of_missing_experiment_reports_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/experiment/99/json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Experiment not found" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = client_for(&server)
        .export()
        .download_json(ExperimentId::new(99), dir.path())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Experiment not found");
    assert!(!dir.path().join("experiment_99.json").exists());
}
