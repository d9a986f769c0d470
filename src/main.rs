use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use hediye_rotasi::cli::Args;
use hediye_rotasi::config::Config;
use hediye_rotasi::form::AnswerSet;
use hediye_rotasi::{image, log, provider, wizard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    log::init_tracing(args.debug);

    let cfg = Config::load(&args)?;
    let run_log = log::RunLog::from_config(&cfg);
    if let Some(rl) = &run_log {
        info!(dir = %rl.dir().display(), "saving provider exchanges");
    }
    let prov = provider::make_provider(&cfg, run_log)?;
    debug!(model = %cfg.model, base_url = %cfg.base_url, "provider ready");

    // Non-interactive: answers from a file, one fetch, exit.
    if let (Some(path), Some(flow)) = (&args.answers, args.mode) {
        let raw = fs_err::read_to_string(path)?;
        let mut answers: AnswerSet = toml::from_str(&raw)
            .with_context(|| format!("failed to parse answers from {path}"))?;
        answers = answers.validated()?;
        if let Some(img) = &args.image {
            answers.image = Some(image::load_image(Path::new(img)).await?);
        }
        return wizard::run_batch(flow, answers, prov).await;
    }

    wizard::run_interactive(prov, args.mode).await
}
