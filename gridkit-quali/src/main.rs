//! gridkit-quali - qualifying classification fetcher
//!
//! Prints the final qualifying order of a session as JSON on stdout.
//! Progress and diagnostics go to stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use gridkit_common::config::TomlConfig;
use gridkit_common::logging::init_tracing;
use gridkit_common::openf1::OpenF1Client;
use gridkit_quali::{run, QualifyingRequest};

/// Command-line arguments for gridkit-quali
#[derive(Parser, Debug)]
#[command(name = "gridkit-quali")]
#[command(about = "OpenF1 qualifying-classification fetcher")]
#[command(version)]
struct Args {
    /// Qualifying session_key (overrides every other hint)
    #[arg(long)]
    session: Option<i64>,

    /// meeting_key; the Qualifying session inside it is used (overridden by --session)
    #[arg(long)]
    meeting: Option<i64>,

    /// Race weekend date, YYYY-MM-DD (overridden by --session or --meeting)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Only output the P15 driver
    #[arg(long)]
    p15: bool,

    /// Configuration file (default: $GRIDKIT_CONFIG, then the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    gridkit_common::time::parse_date(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    info!(
        "gridkit-quali v{} (config: {})",
        env!("CARGO_PKG_VERSION"),
        config_source
    );

    let client = OpenF1Client::from_config(&config.api).context("Failed to create OpenF1 client")?;
    let request = QualifyingRequest {
        session: args.session,
        meeting: args.meeting,
        date: args.date,
        p15: args.p15,
    };

    let report = run(&client, &request, config.mock.season, gridkit_common::time::now())
        .await
        .context("Failed to identify a qualifying session")?;

    println!("{}", report.to_json());
    Ok(())
}
