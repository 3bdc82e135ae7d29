//! Footprint Core Library
//!
//! Shared functionality for the Footprint impact coach:
//! - Factor catalog of per-unit CO2e and water coefficients
//! - Impact calculation engine (actions to footprints, daily summaries)
//! - Recommendation engine for lower-impact substitutes
//! - Weekly aggregation with trend detection
//! - Quick-log parser for free-text action messages
//! - Action log database access and migrations
//! - Daily and weekly report rendering (text, markdown, JSON)

pub mod catalog;
pub mod db;
pub mod error;
pub mod impact;
pub mod models;
pub mod parse;
pub mod recommend;
pub mod report;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use catalog::FactorCatalog;
pub use db::Database;
pub use error::{Error, Result};
pub use impact::{
    compare_to_benchmark, compute_action_impact, compute_daily_summary, compute_impact,
};
pub use models::{
    BenchmarkComparison, Category, CategoryTotals, Contributor, DailySummary, FactorEntry,
    ImpactResult, LoggedAction, NewAction, ParsedAction, Recommendation, TimeOfDay,
    TrendDirection, WeeklyTrend,
};
pub use parse::parse_quick_log;
pub use recommend::{daily_message, recommend};
pub use report::{
    render_markdown, render_text, render_weekly_markdown, render_weekly_text, ReportData,
    WeeklyReportData,
};
pub use trend::aggregate;
