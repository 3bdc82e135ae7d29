//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Footprint - Track and shrink your daily environmental impact
#[derive(Parser)]
#[command(name = "footprint")]
#[command(about = "Daily action-to-impact coach", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "footprint.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Log one action
    Log {
        /// Category: mobility, purchase, home_energy
        #[arg(short, long)]
        category: String,

        /// Item key from the factor catalog (e.g. taxi_ice, beef_meal)
        #[arg(short, long)]
        item: String,

        /// Amount in the item's unit (km, meals, kWh, ...)
        #[arg(short, long)]
        amount: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day for energy use: peak, off_peak, standard
        #[arg(short, long)]
        time_of_day: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Log actions from a free-text message
    Quick {
        /// What you did, e.g. "took a taxi 5km and had a beef lunch"
        message: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show the daily impact summary
    Summary {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Suggest lower-impact substitutes for a day's actions
    Recommend {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show the weekly trend
    Trend {
        /// Last day of the 7-day window (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<String>,
    },

    /// List factor catalog entries
    Factors {
        /// Restrict to one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Render the daily report
    Report {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Output format: text, markdown, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Render the weekly report for the 7 days ending on the date
        #[arg(short, long)]
        weekly: bool,
    },

    /// Show database status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
