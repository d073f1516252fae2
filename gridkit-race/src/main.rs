//! gridkit-race - race classification fetcher
//!
//! Prints the final race order of a session as a text table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use gridkit_common::config::TomlConfig;
use gridkit_common::logging::init_tracing;
use gridkit_common::openf1::OpenF1Client;
use gridkit_common::{SessionResolver, SessionType};
use gridkit_race::{build_race, format_table, race_hint};

/// Command-line arguments for gridkit-race
#[derive(Parser, Debug)]
#[command(name = "gridkit-race")]
#[command(about = "OpenF1 race classification fetcher")]
#[command(version)]
struct Args {
    /// session_key of the Race session (overrides --meeting)
    #[arg(long)]
    session: Option<i64>,

    /// meeting_key; the Race session inside that meeting is used
    #[arg(long)]
    meeting: Option<i64>,

    /// Race weekend date, YYYY-MM-DD (overridden by --session or --meeting)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

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
        "gridkit-race v{} (config: {})",
        env!("CARGO_PKG_VERSION"),
        config_source
    );

    let client = OpenF1Client::from_config(&config.api).context("Failed to create OpenF1 client")?;
    let hint = race_hint(args.session, args.meeting, args.date);

    let session_key = SessionResolver::new(&client, SessionType::Race)
        .resolve(&hint)
        .await
        .context("Failed to identify a race session")?;

    let rows = build_race(&client, session_key)
        .await
        .with_context(|| format!("Failed to build race classification for session {}", session_key))?;

    println!("\nFinal Classification");
    println!("{}", format_table(&rows));
    Ok(())
}
