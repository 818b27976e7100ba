mod analysis;
mod config;
mod gemini;
mod kanban;
mod logging;
mod prompt;
mod server;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kanban-ai",
    version,
    about = "AI analysis service for Kanban boards"
)]
pub struct Cli {
    /// Address to listen on (or env KANBAN_AI_BIND)
    #[arg(long, default_value = "")]
    pub bind: String,

    /// Gemini API base URL (or env GEMINI_BASE_URL)
    #[arg(long, default_value = "")]
    pub base_url: String,

    /// Model name (or env GEMINI_MODEL)
    #[arg(long, default_value = "")]
    pub model: String,

    /// API key (set via env GEMINI_API_KEY recommended)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    let cfg = AppConfig::from_cli(cli)?;
    info!(bind = %cfg.bind_addr, base_url = %cfg.base_url, model = %cfg.model, "starting kanban-ai");

    server::serve(cfg).await
}
