//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `parse_date` - shared utilities
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use footprint_core::Database;

/// Open the database, creating it and running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8"))?;
    Database::new(path_str).context("Failed to open database")
}

/// Parse a YYYY-MM-DD argument, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Log an action: footprint log -c mobility -i taxi_ice -a 5");
    println!("  2. Or from text:  footprint quick \"taxi 5km and a beef lunch\"");
    println!("  3. See your day:  footprint summary");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;
    let today = Utc::now().date_naive();

    let today_actions = db.actions_by_date(today)?;
    let streak = db.streak_days(today)?;

    println!("📊 Footprint status");
    println!("   Database: {}", db.path());
    println!("   Actions today: {}", today_actions.len());
    println!("   Logging streak: {} days", streak);

    Ok(())
}
