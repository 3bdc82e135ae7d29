//! Impact summary handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Duration;
use serde::Deserialize;

use super::resolve_date;
use crate::{AppError, AppState};
use footprint_core::{aggregate, compute_daily_summary, DailySummary, WeeklyTrend};

/// Query parameters for the daily summary
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// Day to summarize (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

/// GET /api/impact/daily - Impact summary for one day
pub async fn daily_impact(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailySummary>, AppError> {
    let date = resolve_date(params.date.as_deref())?;
    let actions = state.db.actions_by_date(date)?;
    let summary = compute_daily_summary(&state.catalog, date, &actions);

    Ok(Json(summary))
}

/// Query parameters for the weekly trend
#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    /// Last day of the 7-day window (YYYY-MM-DD), defaults to today
    pub end: Option<String>,
}

/// GET /api/impact/weekly - 7-day rollup with trend direction
pub async fn weekly_impact(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeeklyQuery>,
) -> Result<Json<WeeklyTrend>, AppError> {
    let end = resolve_date(params.end.as_deref())?;
    let start = end - Duration::days(6);

    let summaries = state.db.daily_summaries(&state.catalog, start, end)?;
    let trend = aggregate(&summaries, start);

    Ok(Json(trend))
}
