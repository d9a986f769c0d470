use chrono::Utc;
use fs_err as fs;
use serde_json::{json, to_string_pretty, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::Config;

/// Logs go to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` with `--debug`.
pub fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

/// Where one run's provider exchanges are written.
#[derive(Debug, Clone)]
pub struct RunLog {
    pub run_id: Uuid,
    dir: PathBuf,
    save_request: bool,
    save_response: bool,
}

impl RunLog {
    /// `None` when neither request nor response saving is enabled.
    pub fn from_config(cfg: &Config) -> Option<Self> {
        if !cfg.save_request && !cfg.save_response {
            return None;
        }
        Some(Self::new(Path::new(&cfg.artifact_dir), cfg.save_request, cfg.save_response))
    }

    pub fn new(root: &Path, save_request: bool, save_response: bool) -> Self {
        let run_id = Uuid::new_v4();
        Self { run_id, dir: root.join(run_id.to_string()), save_request, save_response }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_stage(&self, stage: &str, request: &Value, raw_response: &str) -> anyhow::Result<SavedPaths> {
        fs::create_dir_all(&self.dir)?;

        let mut request_path = None;
        let mut response_path = None;

        if self.save_request {
            let p = self.dir.join(format!("{stage}.request.json"));
            let wrapped = json!({ "saved_at": Utc::now().to_rfc3339(), "body": request });
            fs::write(&p, to_string_pretty(&wrapped)?)?;
            request_path = Some(p);
        }

        if self.save_response {
            let p = self.dir.join(format!("{stage}.response.json"));
            // Keep the body as-is when it is not JSON (e.g. a proxy error page).
            let body = serde_json::from_str::<Value>(raw_response)
                .unwrap_or_else(|_| Value::String(raw_response.to_string()));
            let wrapped = json!({ "saved_at": Utc::now().to_rfc3339(), "body": body });
            fs::write(&p, to_string_pretty(&wrapped)?)?;
            response_path = Some(p);
        }

        Ok(SavedPaths { dir: self.dir.clone(), request: request_path, response: response_path })
    }
}
