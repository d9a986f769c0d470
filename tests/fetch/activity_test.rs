//! Activity fetcher: search-grounded free text, bracket extraction, sources.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

use hediye_rotasi::errors::SuggestError;
use hediye_rotasi::fetch::{ActivityFetcher, SuggestionFetcher};
use hediye_rotasi::image::ImageAttachment;
use hediye_rotasi::wire::Source;

use crate::support::{answers, provider_for, respond_with, sent_body, text_response};

const CHATTY: &str = r#"Here are some ideas for Istanbul:
[
  {"activityName": "Bosphorus sunset cruise", "description": "Two hours on the water.", "reason": "Great light for photos.", "category": "Trip", "price": "750 TL", "ticketLink": "https://www.biletix.com/cruise"},
  {"activityName": "Belgrad Forest walk", "description": "Guided hike.", "reason": "Loves hiking.", "category": "Adventure", "price": "Not specified", "ticketLink": "Not specified", "link": "https://example.org/belgrad"}
]
Have fun!"#;

#[tokio::test]
async fn parses_embedded_array_and_grounding_sources() {
    let server = MockServer::start().await;
    let mut body = text_response(CHATTY);
    body["candidates"][0]["groundingMetadata"] = json!({
        "groundingChunks": [
            { "web": { "uri": "https://www.biletix.com/cruise", "title": "biletix.com" } },
            { "web": { "uri": "https://example.org/belgrad" } }
        ]
    });
    respond_with(&server, 200, body).await;

    let out = ActivityFetcher::new(provider_for(&server, None))
        .fetch(&answers())
        .await
        .expect("fetch should succeed");

    assert_eq!(out.suggestions.len(), 2);
    assert_eq!(out.suggestions[0].activity_name, "Bosphorus sunset cruise");
    assert_eq!(out.suggestions[0].primary_link(), Some("https://www.biletix.com/cruise"));
    assert_eq!(out.suggestions[1].display_price(), None);
    assert_eq!(out.suggestions[1].primary_link(), Some("https://example.org/belgrad"));
    assert_eq!(
        out.sources,
        vec![
            Source { uri: "https://www.biletix.com/cruise".into(), title: Some("biletix.com".into()) },
            Source { uri: "https://example.org/belgrad".into(), title: None },
        ]
    );
}

#[tokio::test]
async fn request_enables_search_without_schema() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("[]")).await;

    ActivityFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap();

    let sent = sent_body(&server).await;
    assert!(sent["tools"][0]["google_search"].is_object());
    assert!(sent.get("generationConfig").is_none());
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("- City: Istanbul"));
    assert!(prompt.contains("- Date: 2030-09-12"));
}

#[tokio::test]
async fn photo_rides_along_with_search_request() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("[]")).await;

    let mut a = answers();
    let img = ImageAttachment::from_bytes(b"webp-bytes", "image/webp");
    a.image = Some(img.clone());
    ActivityFetcher::new(provider_for(&server, None)).fetch(&a).await.unwrap();

    let sent = sent_body(&server).await;
    assert!(sent["tools"][0]["google_search"].is_object());
    let parts = sent["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/webp");
    assert_eq!(parts[1]["inline_data"]["data"], img.payload());
    assert!(parts[0]["text"].as_str().unwrap().contains("inspire the activity choice"));
}

#[tokio::test]
async fn missing_metadata_means_no_sources() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response(r#"[{"activityName":"A","description":"d","reason":"r","category":"c"}]"#)).await;

    let out = ActivityFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap();
    assert_eq!(out.suggestions.len(), 1);
    assert!(out.sources.is_empty());
}

#[tokio::test]
async fn prose_without_array_is_unexpected_format() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("Sorry, I could not find any events on that date.")).await;

    let err = ActivityFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap_err();
    assert!(matches!(err, SuggestError::UnexpectedFormat { .. }), "{err:?}");
}

#[tokio::test]
async fn broken_array_is_unexpected_format() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response(r#"[{"activityName": "A",]"#)).await;

    let err = ActivityFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap_err();
    assert!(matches!(err, SuggestError::UnexpectedFormat { .. }), "{err:?}");
}
