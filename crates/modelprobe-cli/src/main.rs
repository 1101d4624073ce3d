mod args;
mod config;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use modelprobe_common::telemetry::init_tracing;
use modelprobe_engine::HttpTransport;

use crate::args::Args;
use crate::config::{build_config, build_filter, color_enabled};
use crate::output::ConsoleReporter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("warn");

    let config = build_config(&args);
    config.validate().context("invalid configuration")?;
    tracing::debug!(config = %serde_json::to_string(&config)?, "effective configuration");

    let transport = HttpTransport::new().context("failed to build HTTP client")?;
    let color = color_enabled(&args, std::env::var_os("NO_COLOR").as_deref());
    let reporter = Arc::new(ConsoleReporter::new(args.output, color));

    reporter.print_header();
    let (_, stats) = modelprobe_engine::run(
        &config,
        &build_filter(&args),
        Arc::new(transport),
        reporter,
    )
    .await;
    tracing::info!(
        available = stats.available,
        failed = stats.failed,
        timed_out = stats.timed_out,
        "probe run finished"
    );

    Ok(())
}
