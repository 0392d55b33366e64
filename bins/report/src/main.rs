//! Lendbook report
//!
//! Loads the ledger document, refreshes installment statuses and prints
//! snapshots, credit profiles and cash-flow projections as JSON.

mod report;

use std::io::{self, Write};

use anyhow::Context;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lendbook_shared::AppConfig;
use lendbook_shared::config::LoggingConfig;
use lendbook_store::InMemoryLedger;

use crate::report::ReportBuilder;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging);

    let store = InMemoryLedger::open(&config.ledger.path)
        .with_context(|| format!("Failed to open ledger {}", config.ledger.path.display()))?;

    let now = Utc::now();
    let refreshed = store
        .refresh_statuses(now.date_naive())
        .context("Failed to refresh installment statuses")?;
    if refreshed > 0 {
        store
            .save(&config.ledger.path)
            .context("Failed to save refreshed ledger")?;
        info!(refreshed, "updated installment statuses");
    }

    let report = ReportBuilder::new(&config).build(&store, now)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to write report")?;
    writeln!(stdout)?;

    Ok(())
}

// Logs go to stderr so stdout carries only the report.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}
