//! Footprint CLI - Daily action-to-impact coach
//!
//! Usage:
//!   footprint init                              Initialize database
//!   footprint log -c mobility -i taxi_ice -a 5  Log one action
//!   footprint quick "taxi 5km, beef lunch"      Log from free text
//!   footprint summary                           Today's impact
//!   footprint serve --port 3000                 Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Log {
            category,
            item,
            amount,
            date,
            time_of_day,
            notes,
        } => commands::cmd_log(
            &cli.db,
            &category,
            &item,
            amount,
            date.as_deref(),
            time_of_day.as_deref(),
            notes,
        ),
        Commands::Quick { message, date } => {
            commands::cmd_quick(&cli.db, &message, date.as_deref())
        }
        Commands::Summary { date } => commands::cmd_summary(&cli.db, date.as_deref()),
        Commands::Recommend { date } => commands::cmd_recommend(&cli.db, date.as_deref()),
        Commands::Trend { end } => commands::cmd_trend(&cli.db, end.as_deref()),
        Commands::Factors { category } => commands::cmd_factors(category.as_deref()),
        Commands::Report {
            date,
            format,
            weekly,
        } => {
            if weekly {
                commands::cmd_weekly_report(&cli.db, date.as_deref(), &format)
            } else {
                commands::cmd_report(&cli.db, date.as_deref(), &format)
            }
        }
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
    }
}
