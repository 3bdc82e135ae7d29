//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/status commands and shared utilities (open_db, parse_date)
//! - `log` - Action logging commands (log, quick)
//! - `reports` - Summary, recommendation, trend, and report commands
//! - `factors` - Factor catalog listing
//! - `serve` - Web server command

pub mod core;
pub mod factors;
pub mod log;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use factors::*;
pub use log::*;
pub use reports::*;
pub use serve::*;
