use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::Provider;
use crate::config::Config;
use crate::errors::SuggestError;
use crate::log::RunLog;
use crate::wire::{GenerateRequest, GenerateResponse, GenerationMode, Source};

/// Google Gemini `generateContent` over REST.
pub struct GeminiProvider {
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
    run_log: Option<RunLog>,
}

impl GeminiProvider {
    pub fn new(cfg: &Config) -> Result<Self, SuggestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            model: cfg.model.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            client,
            run_log: None,
        })
    }

    pub fn with_run_log(mut self, log: RunLog) -> Self {
        self.run_log = Some(log);
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn record(&self, stage: &str, body: &Value, raw: &str) {
        let Some(log) = &self.run_log else { return };
        match log.save_stage(stage, &redact_image(body), raw) {
            Ok(saved) => debug!(stage, dir = %saved.dir.display(), "exchange saved"),
            Err(e) => warn!(stage, error = %e, "failed to save exchange artifacts"),
        }
    }
}

/// JSON body for a `generateContent` call.
pub fn build_request_body(req: &GenerateRequest) -> Value {
    let mut parts = vec![json!({ "text": req.prompt })];
    if let Some(img) = &req.image {
        parts.push(json!({
            "inline_data": { "mime_type": img.mime_type, "data": img.data }
        }));
    }

    let mut body = json!({
        "contents": [{ "role": "user", "parts": parts }],
    });
    match &req.mode {
        GenerationMode::JsonSchema(schema) => {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        GenerationMode::SearchGrounded => {
            body["tools"] = json!([{ "google_search": {} }]);
        }
    }
    body
}

/// Replace inline image bytes with their length before writing to disk.
fn redact_image(body: &Value) -> Value {
    let mut out = body.clone();
    if let Some(parts) = out["contents"][0]["parts"].as_array_mut() {
        for part in parts {
            if let Some(data) = part.pointer_mut("/inline_data/data") {
                let len = data.as_str().map(str::len).unwrap_or(0);
                *data = json!(format!("<{len} base64 chars omitted>"));
            }
        }
    }
    out
}

/// Pull the answer text and grounding sources out of a `generateContent` response.
pub fn parse_response(data: &Value) -> Result<GenerateResponse, SuggestError> {
    let Some(candidate) = data["candidates"].get(0) else {
        if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
            return Err(SuggestError::Provider {
                status: 200,
                message: format!("prompt blocked ({reason})"),
            });
        }
        return Err(SuggestError::EmptyResponse);
    };

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter(|p| !p["thought"].as_bool().unwrap_or(false))
                .filter_map(|p| p["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish = candidate["finishReason"].as_str().unwrap_or("unknown");
        warn!(finish_reason = finish, "Gemini returned a candidate without text");
        return Err(SuggestError::EmptyResponse);
    }

    let sources = candidate["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    let web = chunk.get("web")?;
                    Some(Source {
                        uri: web.get("uri")?.as_str()?.to_string(),
                        title: web.get("title").and_then(|t| t.as_str()).map(str::to_string),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerateResponse { text, sources })
}

/// Message from a Gemini error body (`{"error":{"message":...}}`), else the raw body.
fn error_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));
    match from_json {
        Some(m) if !m.trim().is_empty() => m,
        _ if !body.trim().is_empty() => format!("Gemini API error ({status}): {}", body.trim()),
        _ => format!("Gemini API error ({status})"),
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn send(&self, req: &GenerateRequest) -> Result<GenerateResponse, SuggestError> {
        let body = build_request_body(req);
        let url = self.url();
        info!(
            model = %self.model,
            stage = %req.stage,
            has_image = req.image.is_some(),
            grounded = matches!(req.mode, GenerationMode::SearchGrounded),
            "calling Gemini"
        );

        // Header auth keeps the key out of URLs and logs.
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                SuggestError::Http(e)
            })?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(status = %status, bytes = text.len(), "Gemini responded");
        self.record(&req.stage, &body, &text);

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(SuggestError::Provider {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &text),
            });
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| SuggestError::Decode(format!("invalid Gemini response body: {e}")))?;
        parse_response(&data)
    }
}
