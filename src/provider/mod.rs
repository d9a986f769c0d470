use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::errors::SuggestError;
use crate::log::RunLog;
use crate::wire::{GenerateRequest, GenerateResponse};

pub mod gemini;

/// A hosted text-generation endpoint.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn send(&self, req: &GenerateRequest) -> Result<GenerateResponse, SuggestError>;
}

pub type DynProvider = Arc<dyn Provider>;

pub fn make_provider(cfg: &Config, run_log: Option<RunLog>) -> Result<DynProvider, SuggestError> {
    let mut gemini = gemini::GeminiProvider::new(cfg)?;
    if let Some(log) = run_log {
        gemini = gemini.with_run_log(log);
    }
    Ok(Arc::new(gemini))
}
