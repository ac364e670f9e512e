#![allow(dead_code)]

use lurebird::backend::OpenAiCompatibleBackend;
use lurebird::persona::{Persona, ScamType};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ASSESSMENT_JSON: &str = r#"{
    "primary_tactic": "urgency",
    "impersonation": "bank security team",
    "requested_action": "click verification link",
    "pressure_level": 8,
    "sophistication": 6,
    "red_flags": ["fake deadline", "suspicious link"]
}"#;

pub fn test_persona() -> Persona {
    Persona {
        name: "Margaret".to_string(),
        age: 68,
        occupation: "retired teacher".to_string(),
        location: "Adelaide, Australia".to_string(),
        tech_literacy: 3,
        personality_traits: vec!["trusting".into(), "chatty".into()],
        vulnerabilities: vec!["lives alone".into()],
        backstory: "Widowed two years ago, keeps busy with her garden.".to_string(),
        communication_style: "formal, wordy".to_string(),
        scam_type: ScamType::Phishing,
    }
}

pub fn backend(server: &MockServer) -> Arc<OpenAiCompatibleBackend> {
    Arc::new(OpenAiCompatibleBackend::new(
        "groq",
        &server.uri(),
        Some("gsk_test"),
        Duration::from_secs(5),
    ))
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"content": content}}]})
}

/// The analyzer is the only caller using the low analysis temperature, so
/// mocks discriminate the two request kinds by sampling temperature.
pub async fn mount_analysis(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({"temperature": 0.3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}

pub async fn mount_analysis_failure(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.3})))
        .respond_with(ResponseTemplate::new(status).set_body_string("backend exploded"))
        .mount(server)
        .await;
}

pub async fn mount_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.9})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}

pub async fn mount_reply_failure(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.9})))
        .respond_with(ResponseTemplate::new(status).set_body_string("backend exploded"))
        .mount(server)
        .await;
}

/// Persona generation uses its own temperature as well (0.8).
pub async fn mount_persona(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.8})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}
