//! Gift fetcher: schema-constrained JSON in, gift cards out.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

use hediye_rotasi::errors::SuggestError;
use hediye_rotasi::fetch::{GiftFetcher, SuggestionFetcher};
use hediye_rotasi::form::Budget;
use hediye_rotasi::image::ImageAttachment;
use hediye_rotasi::wire::GiftSuggestion;

use crate::support::{answers, provider_for, respond_with, sent_body, text_response};

fn gifts() -> serde_json::Value {
    json!([
        {
            "giftName": "Film camera",
            "description": "A compact 35mm camera.",
            "reason": "She loves photography.",
            "category": "Electronics",
            "priceRange": "2000-3000 TL",
            "imageQuery": "35mm film camera",
            "trendyolLink": "https://www.trendyol.com/sr?q=film%20camera",
            "amazonLink": "https://www.amazon.com.tr/s?k=film%20camera",
            "hepsiburadaLink": "https://www.hepsiburada.com/ara?q=film%20camera"
        },
        {
            "giftName": "Trail guide",
            "description": "Hiking routes around Istanbul.",
            "reason": "Weekend hikes.",
            "category": "Books",
            "priceRange": "300-400 TL",
            "imageQuery": "hiking guide book",
            "trendyolLink": "https://www.trendyol.com/sr?q=trail%20guide",
            "amazonLink": "https://www.amazon.com.tr/s?k=trail%20guide",
            "hepsiburadaLink": "https://www.hepsiburada.com/ara?q=trail%20guide"
        }
    ])
}

#[tokio::test]
async fn returns_exactly_what_the_schema_response_holds() {
    let server = MockServer::start().await;
    let mut body = text_response(&format!("  {}\n", gifts()));
    // grounding metadata is ignored for gifts
    body["candidates"][0]["groundingMetadata"] =
        json!({ "groundingChunks": [{ "web": { "uri": "https://x.example" } }] });
    respond_with(&server, 200, body).await;

    let fetcher = GiftFetcher::new(provider_for(&server, None));
    let out = fetcher.fetch(&answers()).await.expect("fetch should succeed");

    let expected: Vec<GiftSuggestion> = serde_json::from_value(gifts()).unwrap();
    assert_eq!(out.suggestions, expected);
    assert!(out.sources.is_empty());
}

#[tokio::test]
async fn request_uses_schema_and_text_only_without_image() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("[]")).await;

    let mut a = answers();
    a.budget = Budget { min: Some(500), max: None };
    GiftFetcher::new(provider_for(&server, None)).fetch(&a).await.unwrap();

    let sent = sent_body(&server).await;
    assert_eq!(sent["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(sent["generationConfig"]["responseSchema"]["items"]["required"].as_array().unwrap().len(), 9);
    assert!(sent.get("tools").is_none());
    let parts = sent["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 1);
    let prompt = parts[0]["text"].as_str().unwrap();
    assert!(prompt.contains("- Budget: above 500 TL"));
    assert!(prompt.contains("Photography, Hiking"));
}

#[tokio::test]
async fn image_is_sent_as_inline_part() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response("[]")).await;

    let mut a = answers();
    let img = ImageAttachment::from_bytes(b"jpeg-bytes", "image/jpeg");
    a.image = Some(img.clone());
    GiftFetcher::new(provider_for(&server, None)).fetch(&a).await.unwrap();

    let sent = sent_body(&server).await;
    let parts = sent["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
    assert_eq!(parts[1]["inline_data"]["data"], img.payload());
    assert!(parts[0]["text"].as_str().unwrap().contains("attached photo"));
}

#[tokio::test]
async fn auth_failure_surfaces_api_message() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        400,
        json!({ "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" } }),
    )
    .await;

    let err = GiftFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap_err();
    match err {
        SuggestError::Provider { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("API key not valid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn record_missing_required_field_is_a_decode_error() {
    let server = MockServer::start().await;
    respond_with(&server, 200, text_response(r#"[{"giftName":"Mug"}]"#)).await;

    let err = GiftFetcher::new(provider_for(&server, None)).fetch(&answers()).await.unwrap_err();
    assert!(matches!(err, SuggestError::Decode(_)), "{err:?}");
}
