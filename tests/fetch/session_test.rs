//! Session driving a real fetcher end to end.

use serde_json::json;
use wiremock::MockServer;

use hediye_rotasi::errors::GENERIC_FETCH_MESSAGE;
use hediye_rotasi::fetch::ActivityFetcher;
use hediye_rotasi::session::{FetchState, SuggestionSession};

use crate::support::{answers, provider_for, respond_with, text_response};

#[tokio::test]
async fn run_lands_in_success() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response(r#"[{"activityName":"A","description":"d","reason":"r","category":"c"}]"#)).await;

    let fetcher = ActivityFetcher::new(provider_for(&server, None));
    let mut session = SuggestionSession::new();
    match session.run(&fetcher, &answers()).await {
        FetchState::Success(data) => assert_eq!(data.suggestions[0].activity_name, "A"),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn run_lands_in_error_with_format_message() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("no events")).await;

    let fetcher = ActivityFetcher::new(provider_for(&server, None));
    let mut session = SuggestionSession::new();
    let state = session.run(&fetcher, &answers()).await;
    assert_eq!(
        state,
        &FetchState::Error("The AI response came back in an unexpected format.".into())
    );
}

#[tokio::test]
async fn server_error_without_body_gets_a_message() {
    let server = MockServer::start().await;
    respond_with(&server, 503, json!({})).await;

    let fetcher = ActivityFetcher::new(provider_for(&server, None));
    let mut session = SuggestionSession::new();
    match session.run(&fetcher, &answers()).await {
        FetchState::Error(msg) => {
            assert!(!msg.is_empty());
            assert_ne!(msg, GENERIC_FETCH_MESSAGE);
            assert!(msg.contains("503"));
        }
        other => panic!("unexpected state: {other:?}"),
    }
}
