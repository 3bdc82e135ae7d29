//! HTTP request handlers organized by domain

use axum::Json;
use chrono::{NaiveDate, Utc};

use crate::AppError;

pub mod actions;
pub mod coach;
pub mod factors;
pub mod impact;
pub mod reports;

// Re-export all handlers for use in router
pub use actions::*;
pub use coach::*;
pub use factors::*;
pub use impact::*;
pub use reports::*;

/// GET /api/health - liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Resolve an optional `date` query parameter, defaulting to today (UTC)
pub(crate) fn resolve_date(date: Option<&str>) -> Result<NaiveDate, AppError> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(&format!("Invalid date: {}", s))),
        None => Ok(Utc::now().date_naive()),
    }
}
