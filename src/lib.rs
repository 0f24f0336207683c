use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod filters;
pub mod ranking;
pub mod types;
pub mod utils;
pub mod web;
pub mod weights;

pub use browser::{Notification, Session, VacancyBrowser};
pub use config::{AppConfig, LoggingConfig};
pub use core::{CareerClient, HttpTransport, Transport};
pub use filters::{FilterState, QueryFilters, Selection};
pub use ranking::ScoredVacancy;
pub use types::{FilterCategory, FilterOption, Identifier, Vacancy, VacancyId};
pub use web::{build_rocket, start_web_server};
pub use weights::{StreamWeights, WeightAdvisor};

/// Console logging, plus a JSON log file when `logging.file` is set.
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}
