//! Gemini provider over HTTP: auth header, artifacts, error mapping.

use serde_json::{json, Value};
use wiremock::MockServer;

use hediye_rotasi::errors::SuggestError;
use hediye_rotasi::log::RunLog;
use hediye_rotasi::provider::Provider;
use hediye_rotasi::wire::{GenerateRequest, GenerationMode, InlineImage};

use crate::support::{provider_for, respond_with, text_response};

fn request(image: bool) -> GenerateRequest {
    GenerateRequest {
        stage: "activity".into(),
        prompt: "find events".into(),
        image: image.then(|| InlineImage { mime_type: "image/png".into(), data: "aGVsbG8=".into() }),
        mode: GenerationMode::SearchGrounded,
    }
}

#[tokio::test]
async fn sends_key_header_and_returns_text() {
    let server = MockServer::start().await;
    // respond_with only matches when the x-goog-api-key header is present
    respond_with(&server, 200, text_response("[]")).await;

    let resp = provider_for(&server, None).send(&request(false)).await.unwrap();
    assert_eq!(resp.text, "[]");
    assert!(resp.sources.is_empty());
}

#[tokio::test]
async fn saves_redacted_exchange_when_enabled() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("[]")).await;
    let tmp = tempfile::tempdir().unwrap();
    let log = RunLog::new(tmp.path(), true, true);
    let dir = log.dir().to_path_buf();

    provider_for(&server, Some(log)).send(&request(true)).await.unwrap();

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("activity.request.json")).unwrap()).unwrap();
    assert_eq!(
        saved["body"]["contents"][0]["parts"][1]["inline_data"]["data"],
        "<8 base64 chars omitted>"
    );
    let resp: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("activity.response.json")).unwrap()).unwrap();
    assert_eq!(resp["body"]["candidates"][0]["content"]["parts"][0]["text"], "[]");
}

#[tokio::test]
async fn empty_candidates_is_empty_response() {
    let server = MockServer::start().await;
    respond_with(&server, 200, json!({ "candidates": [] })).await;

    let err = provider_for(&server, None).send(&request(false)).await.unwrap_err();
    assert!(matches!(err, SuggestError::EmptyResponse), "{err:?}");
}
