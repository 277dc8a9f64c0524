mod common;

use common::*;
use llm_lab_core::{ExperimentCreate, ExperimentId, ResponseId};
use llm_lab_sdk::{LoadState, QueryKey};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_concurrent_reads_of_one_key_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(experiment_detail_json(4, "Shared", 6))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let id = ExperimentId::new(4);

    let (a, b, c) = tokio::join!(store.experiment(id), store.experiment(id), store.experiment(id));

    for detail in [a, b, c] {
        assert_eq!(detail.unwrap().unwrap().name(), "Shared");
    }
    assert_eq!(store.stats().misses, 1);
    assert_eq!(store.stats().joins, 2);
}

#[tokio::test]
async fn test_detail_page_reads_are_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/responses/experiment/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([response_json(1, 2, 0.5, 0.9, 0.7)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/metrics/experiment/2/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_summary_json()))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let id = ExperimentId::new(2);

    for _ in 0..3 {
        let (responses, metrics) = tokio::join!(store.responses(id), store.metrics(id));
        assert_eq!(responses.unwrap().unwrap().len(), 1);
        assert_eq!(metrics.unwrap().unwrap().len(), 1);
    }
    assert_eq!(store.stats().hits, 4);
}

#[tokio::test]
async fn test_unset_ids_issue_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let unset = ExperimentId::default();

    assert_eq!(store.experiment(unset).await.unwrap(), None);
    assert_eq!(store.responses(unset).await.unwrap(), None);
    assert_eq!(store.metrics(unset).await.unwrap(), None);
    assert_eq!(store.response(ResponseId::default()).await.unwrap(), None);
    assert_eq!(store.status(&QueryKey::Experiment(unset)), LoadState::Idle);
}

#[tokio::test]
async fn test_list_after_delete_does_not_contain_deleted_experiment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            experiment_json(1, "Keep"),
            experiment_json(2, "Remove"),
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiments/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Experiment deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let before = store.experiments().await.unwrap();
    assert_eq!(before.len(), 2);

    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([experiment_json(1, "Keep")])))
        .expect(1)
        .mount(&server)
        .await;

    store.delete_experiment(ExperimentId::new(2)).await.unwrap();
    assert_eq!(store.status(&QueryKey::Experiments), LoadState::Idle);

    let after = store.experiments().await.unwrap();
    assert!(after.iter().all(|e| e.id != ExperimentId::new(2)));
}

#[tokio::test]
async fn test_delete_invalidates_everything_cached_for_the_experiment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metrics/experiment/3/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_summary_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/metrics/experiment/4/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_summary_json()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiments/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.metrics(ExperimentId::new(3)).await.unwrap();
    store.metrics(ExperimentId::new(4)).await.unwrap();

    store.delete_experiment(ExperimentId::new(3)).await.unwrap();

    let three = QueryKey::ExperimentMetrics(ExperimentId::new(3));
    let four = QueryKey::ExperimentMetrics(ExperimentId::new(4));
    assert_eq!(store.status(&three), LoadState::Idle);
    assert_eq!(store.status(&four), LoadState::Success(()));
}

#[tokio::test]
async fn test_delete_drops_cached_single_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/responses/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_json(21, 3, 0.5, 0.9, 0.7)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiments/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let response = store.response(ResponseId::new(21)).await.unwrap().unwrap();
    assert_eq!(response.experiment_id, ExperimentId::new(3));

    let key = QueryKey::Response(ResponseId::new(21));
    assert_eq!(store.status(&key), LoadState::Success(()));

    store.delete_experiment(ExperimentId::new(3)).await.unwrap();
    assert_eq!(store.status(&key), LoadState::Idle);
}

#[tokio::test]
async fn test_create_invalidates_list_and_returns_created() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([experiment_json(1, "Old")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json(9, "New")))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.experiments().await.unwrap();

    let created = store
        .create_experiment(&ExperimentCreate::new("New", "Say hi"))
        .await
        .unwrap();
    assert_eq!(created.id, ExperimentId::new(9));
    assert_eq!(store.status(&QueryKey::Experiments), LoadState::Idle);

    store.experiments().await.unwrap();
}

#[tokio::test]
async fn test_rejected_create_leaves_cache_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.experiments().await.unwrap();

    let request = ExperimentCreate::new("Bad", "Say hi").with_top_p_values(vec![1.5]);
    assert!(store.create_experiment(&request).await.is_err());
    assert_eq!(store.experiments_state(), LoadState::Success(vec![]));
}

#[tokio::test]
async fn test_failed_read_is_refetched_on_next_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "Backend warming up" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([experiment_json(1, "Ready")])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);

    let err = store.experiments().await.unwrap_err();
    assert_eq!(err.to_string(), "Backend warming up");
    assert_eq!(
        store.status(&QueryKey::Experiments),
        LoadState::Error("Backend warming up".to_string())
    );

    let experiments = store.experiments().await.unwrap();
    assert_eq!(experiments[0].name, "Ready");
}

#[tokio::test]
async fn test_refetch_and_prefix_invalidation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/experiments/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_detail_json(1, "One", 0)))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.experiments().await.unwrap();
    store.refetch_experiments().await.unwrap();
    store.experiment(ExperimentId::new(1)).await.unwrap();

    assert_eq!(store.invalidate("experiments"), 2);
    store.experiments().await.unwrap();
}
