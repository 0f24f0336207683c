use anyhow::Result;
use clap::Parser;
use tracing::info;
use vacancy_browser::cli::{handle_command, Cli};
use vacancy_browser::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    info!(
        "Environment: {}",
        std::env::var("VACANCY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    );
    config.log_summary();

    handle_command(cli, config).await
}
