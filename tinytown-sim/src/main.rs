//! Tinytown — a day in the life of three townsfolk.
//!
//! Runs the fixed scenario: Max (workaholic), Alice (lazy) and Bob
//! (foodie) living through 24 hours of metabolism, survival floors and
//! free choice. Output is log text only; nothing is persisted.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tinytown_core::stats::DayReport;
use tinytown_core::types::Personality;
use tinytown_core::{Npc, Simulation, World};
use tinytown_llm::{LlmClient, LlmDecider, LlmProvider};

use crate::config::{AppConfig, LlmConfig};

/// Config file resolution: `TINYTOWN_CONFIG` env var, else `tinytown.toml`
/// in the working directory if present, else built-in defaults.
fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TINYTOWN_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from("tinytown.toml");
    default.exists().then_some(default)
}

fn build_client(llm: &LlmConfig) -> LlmClient {
    match llm.provider.as_str() {
        "ollama" => LlmClient::new(
            LlmProvider::Ollama {
                base_url: llm.base_url.clone(),
            },
            &llm.model,
            llm.max_retries,
        ),
        "openai" => LlmClient::new(
            LlmProvider::OpenAiCompatible {
                base_url: llm.base_url.clone(),
                api_key: llm.api_key.clone(),
            },
            &llm.model,
            llm.max_retries,
        ),
        "none" => LlmClient::none(),
        other => {
            warn!("unknown LLM provider '{other}', running without one");
            LlmClient::none()
        }
    }
}

fn roster() -> Vec<Npc> {
    vec![
        Npc::new("npc1", "Max", Personality::Workaholic),
        Npc::new("npc2", "Alice", Personality::Lazy),
        Npc::new("npc3", "Bob", Personality::Foodie),
    ]
}

fn print_summary(reports: &[DayReport]) {
    info!("=== day summary ===");
    for report in reports {
        info!(
            npc = %report.name,
            personality = %report.personality,
            resources = %report.resources,
            survived = report.survived,
            wealth = %report.wealth,
            worked = report.hours_worked,
            "final, diversity {:.2}",
            report.diversity
        );
        info!(npc = %report.name, path = %report.recent_path, "path");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = config_path();
    let config = AppConfig::load(path.as_deref())
        .with_context(|| format!("loading config from {path:?}"))?;

    let client = build_client(&config.llm);
    if client.is_available() {
        info!(
            provider = %config.llm.provider,
            model = %config.llm.model,
            "free choice delegated to LLM"
        );
    } else {
        info!("no LLM backend; free choice degrades to the random fallback");
    }
    let decider = LlmDecider::new(client, config.llm.request_timeout_ms);

    let mut sim = Simulation::new(World::town(), config.sim, decider, roster());
    let reports = sim.run_day().await;
    print_summary(&reports);

    Ok(())
}
