//! Suggestion fetchers: one provider call per wizard completion, turned into
//! typed suggestion records.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::errors::SuggestError;
use crate::form::AnswerSet;
use crate::prompt;
use crate::provider::DynProvider;
use crate::wire::{
    gift_response_schema, ActivitySuggestion, GenerateRequest, GenerationMode, GiftSuggestion,
    Suggestions,
};

#[async_trait]
pub trait SuggestionFetcher: Send + Sync {
    type Item: Send;

    async fn fetch(&self, answers: &AnswerSet) -> Result<Suggestions<Self::Item>, SuggestError>;
}

/// Parse the JSON array embedded in free text: everything from the first `[`
/// to the last `]`, inclusive.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, SuggestError> {
    let (start, end) = match (text.find('['), text.rfind(']')) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => {
            return Err(SuggestError::UnexpectedFormat {
                detail: "no JSON array found in response".into(),
            })
        }
    };
    let slice = &text[start..=end];
    serde_json::from_str(slice).map_err(|e| {
        warn!(error = %e, "embedded JSON array did not parse");
        SuggestError::UnexpectedFormat { detail: e.to_string() }
    })
}

fn request_for(stage: &str, prompt: String, answers: &AnswerSet, mode: GenerationMode) -> GenerateRequest {
    GenerateRequest {
        stage: stage.to_string(),
        prompt,
        image: answers.image.as_ref().map(|img| img.to_inline()),
        mode,
    }
}

/// Gift flow: schema-constrained JSON, never any sources.
pub struct GiftFetcher {
    provider: DynProvider,
}

impl GiftFetcher {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SuggestionFetcher for GiftFetcher {
    type Item = GiftSuggestion;

    async fn fetch(&self, answers: &AnswerSet) -> Result<Suggestions<GiftSuggestion>, SuggestError> {
        let req = request_for(
            "gift",
            prompt::build_gift_prompt(answers),
            answers,
            GenerationMode::JsonSchema(gift_response_schema()),
        );
        let resp = self.provider.send(&req).await?;
        let suggestions: Vec<GiftSuggestion> = serde_json::from_str(resp.text.trim())
            .map_err(|e| SuggestError::Decode(e.to_string()))?;
        info!(count = suggestions.len(), "gift suggestions received");
        Ok(Suggestions { suggestions, sources: Vec::new() })
    }
}

/// Activity flow: search-grounded free text with an embedded JSON array.
pub struct ActivityFetcher {
    provider: DynProvider,
}

impl ActivityFetcher {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SuggestionFetcher for ActivityFetcher {
    type Item = ActivitySuggestion;

    async fn fetch(&self, answers: &AnswerSet) -> Result<Suggestions<ActivitySuggestion>, SuggestError> {
        let req = request_for(
            "activity",
            prompt::build_activity_prompt(answers),
            answers,
            GenerationMode::SearchGrounded,
        );
        let resp = self.provider.send(&req).await?;
        let suggestions = extract_json_array::<ActivitySuggestion>(&resp.text)?;
        debug!(sources = resp.sources.len(), "grounding sources");
        info!(count = suggestions.len(), "activity suggestions received");
        Ok(Suggestions { suggestions, sources: resp.sources })
    }
}
