use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// ========================================
/// Suggestion records returned to the UI
/// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftSuggestion {
    pub gift_name: String,
    pub description: String,
    pub reason: String,
    pub category: String,
    pub price_range: String,
    pub image_query: String,
    pub trendyol_link: String,
    pub amazon_link: String,
    pub hepsiburada_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySuggestion {
    pub activity_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub ticket_link: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Free-text answers sometimes carry a bare number (`"price": 150`).
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => return Err(de::Error::custom(format!("expected text, found {other}"))),
    })
}

/// Placeholder the activity prompt asks the model to use for missing values.
pub const NOT_SPECIFIED: &str = "Not specified";

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(NOT_SPECIFIED))
}

impl ActivitySuggestion {
    /// Price text, unless the model left it empty or used the placeholder.
    pub fn display_price(&self) -> Option<&str> {
        present(&self.price)
    }

    /// Ticket link when available, otherwise the generic information link.
    pub fn primary_link(&self) -> Option<&str> {
        present(&self.ticket_link).or_else(|| present(&self.link))
    }
}

/// A web page the search-grounded answer was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Source {
    /// Title if the metadata carried one, else the host part of the URI.
    pub fn label(&self) -> String {
        if let Some(t) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            return t.to_string();
        }
        url::Url::parse(&self.uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.uri.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions<T> {
    pub suggestions: Vec<T>,
    pub sources: Vec<Source>,
}

impl<T> Default for Suggestions<T> {
    fn default() -> Self {
        Self { suggestions: Vec::new(), sources: Vec::new() }
    }
}

/// ========================================
/// Provider request/response
/// ========================================

/// Image bytes sent inline next to the prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without the `data:` prefix.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "schema")]
pub enum GenerationMode {
    /// Response body constrained to JSON matching the given schema.
    JsonSchema(Value),
    /// Free text with the web search tool enabled.
    SearchGrounded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Short label used for logs and artifact file names.
    pub stage: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
    pub mode: GenerationMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
    pub sources: Vec<Source>,
}

/// Output contract for the gift flow: an array of fully populated gift records.
pub fn gift_response_schema() -> Value {
    let fields = [
        "giftName", "description", "reason", "category", "priceRange", "imageQuery",
        "trendyolLink", "amazonLink", "hepsiburadaLink",
    ];
    let mut properties = serde_json::Map::new();
    for f in fields {
        properties.insert(f.to_string(), json!({ "type": "STRING" }));
    }
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": fields,
        }
    })
}
