#![allow(dead_code)]

use llm_lab_sdk::{LabStore, LlmLabClient, SdkConfig, SyncConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> LlmLabClient {
    LlmLabClient::new(SdkConfig::new(server.uri())).expect("valid config")
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> LlmLabClient {
    LlmLabClient::new(SdkConfig::new(server.uri()).with_timeout(timeout)).expect("valid config")
}

pub fn store_for(server: &MockServer) -> LabStore {
    LabStore::new(client_for(server), SyncConfig::default())
}

pub fn experiment_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "prompt": "Explain photosynthesis to a child",
        "created_at": "2024-03-05T14:30:00"
    })
}

pub fn experiment_detail_json(id: i64, name: &str, response_count: u64) -> Value {
    let mut value = experiment_json(id, name);
    value["response_count"] = json!(response_count);
    value
}

pub fn response_json(id: i64, experiment_id: i64, temperature: f64, top_p: f64, overall: f64) -> Value {
    json!({
        "id": id,
        "experiment_id": experiment_id,
        "temperature": temperature,
        "top_p": top_p,
        "max_tokens": 1000,
        "text": format!("Response {id}"),
        "finish_reason": "stop",
        "validation_metadata": {
            "is_valid": true,
            "is_corrupted": false,
            "is_truncated": false,
            "corruption_score": 0.0,
            "warnings": []
        },
        "created_at": "2024-03-05T14:31:00",
        "metrics": [
            { "name": "overall_score", "value": overall },
            { "name": "coherence_score", "value": 0.8 }
        ]
    })
}

pub fn metrics_summary_json() -> Value {
    json!({
        "overall_score": {
            "mean": 0.75, "median": 0.74, "min": 0.6, "max": 0.9, "std_dev": 0.1, "count": 2,
            "responses": [
                { "response_id": 1, "temperature": 0.5, "top_p": 0.9, "value": 0.6 },
                { "response_id": 2, "temperature": 1.0, "top_p": 0.9, "value": 0.9 }
            ]
        }
    })
}
