//! Runtime configuration.
//!
//! Precedence: CLI flags > env vars > TOML file > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub timeout_secs: u64,
    pub artifact_dir: String,
    pub save_request: bool,
    pub save_response: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: String::new(),
            timeout_secs: 120,
            artifact_dir: ".hediye/runs".into(),
            save_request: false,
            save_response: false,
        }
    }
}

impl Config {
    /// Build the effective config for this invocation.
    pub fn load(args: &Args) -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let path = Self::config_path(args.config.as_deref(), env);
        let mut cfg = Self::load_from_file(&path, args.config.is_some())?;
        cfg.apply_env(env);
        cfg.apply_args(args);
        if cfg.api_key.is_empty() {
            tracing::warn!("no API key configured (GEMINI_API_KEY / API_KEY); requests will be rejected");
        }
        Ok(cfg)
    }

    fn config_path(explicit: Option<&str>, env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = explicit {
            return PathBuf::from(p);
        }
        env("HEDIYE_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("hediye.toml"))
    }

    /// A missing default file yields defaults; a missing explicit file is an error.
    fn load_from_file(path: &PathBuf, required: bool) -> Result<Self> {
        match fs_err::read_to_string(path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                toml::from_str(&contents).context("failed to parse config TOML")
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).context("failed to read config file"),
        }
    }

    /// Takes a resolver so tests need not touch the process environment.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(key) = env("GEMINI_API_KEY").or_else(|| env("API_KEY")) {
            self.api_key = key;
        }
        if let Some(model) = env("HEDIYE_MODEL") {
            self.model = model;
        }
        if let Some(url) = env("HEDIYE_BASE_URL") {
            self.base_url = url;
        }
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(m) = &args.model {
            self.model = m.clone();
        }
        if let Some(u) = &args.base_url {
            self.base_url = u.clone();
        }
        if let Some(t) = args.timeout_secs {
            self.timeout_secs = t;
        }
        self.save_request |= args.save_request;
        self.save_response |= args.save_response;
    }
}
