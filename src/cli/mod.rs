use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Which suggestion wizard to run.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    #[value(alias = "gifts")]
    Gift,
    #[value(alias = "activities", alias = "event")]
    Activity,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Gift => "gift",
            Flow::Activity => "activity",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hediye_rotasi", version, about = "Gift and activity suggestion wizard backed by Gemini")]
pub struct Args {
    /// Skip the mode selection screen.
    #[arg(long, value_enum)]
    pub mode: Option<Flow>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// TOML config file (defaults to $HEDIYE_CONFIG_PATH or ./hediye.toml).
    #[arg(long)]
    pub config: Option<String>,

    /// Answer set as TOML; runs without prompts. Requires --mode.
    #[arg(long, requires = "mode")]
    pub answers: Option<String>,

    /// Photo to attach in non-interactive runs.
    #[arg(long, requires = "answers")]
    pub image: Option<String>,

    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
