//! Shared helpers for tests that talk to a mock Gemini server.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hediye_rotasi::config::Config;
use hediye_rotasi::form::AnswerSet;
use hediye_rotasi::log::RunLog;
use hediye_rotasi::provider::{make_provider, DynProvider};

pub const MODEL: &str = "gemini-test";
pub const API_KEY: &str = "test-key";

pub fn config_for(server: &MockServer) -> Config {
    Config {
        model: MODEL.into(),
        base_url: server.uri(),
        api_key: API_KEY.into(),
        timeout_secs: 5,
        ..Config::default()
    }
}

pub fn provider_for(server: &MockServer, run_log: Option<RunLog>) -> DynProvider {
    make_provider(&config_for(server), run_log).expect("provider should build")
}

/// Mount a single `generateContent` response.
pub async fn respond_with(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// A `generateContent` success body with one text part.
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// JSON body of the only request the server received.
pub async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("request recording is on");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).expect("request body is JSON")
}

pub fn answers() -> AnswerSet {
    AnswerSet {
        gender: "Woman".into(),
        age: "26-35".into(),
        profession: "Architect".into(),
        recipient: "Friend".into(),
        occasion: "Birthday".into(),
        interests: vec!["Photography".into(), "Hiking".into()],
        styles: vec!["Minimalist".into()],
        city: "Istanbul".into(),
        date: "2030-09-12".into(),
        ..Default::default()
    }
}
