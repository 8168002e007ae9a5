// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wearable-Export batch runner
//!
//! Exports every hub backup endpoint for every roster user. Failures are
//! logged and never turn into a non-zero exit status.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wearable_export::{config::Config, services::HubClient, Extractor};

#[tokio::main]
async fn main() {
    // Initialize structured JSON logging
    init_logging();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "An error occurred");
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        roster = %config.roster_path.display(),
        output_dir = %config.output_dir.display(),
        reference_date = %config.reference_date,
        batch_size = config.batch_size,
        concurrency = config.concurrency,
        "Starting wearable export"
    );

    let client = HubClient::new(&config.hub_base_url, config.request_timeout)?;
    let extractor = Extractor::new(&config, client)?;

    let report = extractor.run().await;
    if let Some(error) = &report.error {
        anyhow::bail!("Run aborted: {}", error);
    }
    tracing::info!(
        endpoints = report.endpoints.len(),
        files = report.files_written(),
        fetched = report.fetched_count(),
        failures = report.failure_count(),
        "Export finished"
    );

    Ok(())
}

/// Initialize structured JSON logging on stdout.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wearable_export=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
