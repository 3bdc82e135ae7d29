//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use serde::Deserialize;

use super::resolve_date;
use crate::{AppError, AppState};
use footprint_core::{
    aggregate, compute_daily_summary, recommend, render_markdown, render_text,
    render_weekly_markdown, render_weekly_text, ReportData, WeeklyReportData,
};

/// Query parameters for daily reports
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Day to report on (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    /// Output format: json (default), text, or markdown
    pub format: Option<String>,
}

/// GET /api/reports/daily - Rendered daily report
pub async fn daily_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let date = resolve_date(params.date.as_deref())?;
    let actions = state.db.actions_by_date(date)?;

    let summary = compute_daily_summary(&state.catalog, date, &actions);
    let recommendations = recommend(&state.catalog, &actions);
    let streak_days = state.db.streak_days(date)?;
    let report = ReportData::new(summary, recommendations, streak_days);

    match params.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(report).into_response()),
        "text" => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&report),
        )
            .into_response()),
        "markdown" | "md" => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&report),
        )
            .into_response()),
        other => Err(AppError::bad_request(&format!(
            "Unknown report format: {}",
            other
        ))),
    }
}

/// Query parameters for weekly reports
#[derive(Debug, Deserialize)]
pub struct WeeklyReportQuery {
    /// Last day of the 7-day window (YYYY-MM-DD), defaults to today
    pub end: Option<String>,
    /// Output format: json (default), text, or markdown
    pub format: Option<String>,
}

/// GET /api/reports/weekly - Rendered weekly report
pub async fn weekly_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeeklyReportQuery>,
) -> Result<Response, AppError> {
    let end = resolve_date(params.end.as_deref())?;
    let start = end - Duration::days(6);

    let actions = state.db.actions_in_range(start, end)?;
    let summaries = state.db.daily_summaries(&state.catalog, start, end)?;
    let trend = aggregate(&summaries, start);
    let recommendations = recommend(&state.catalog, &actions);
    let streak_days = state.db.streak_days(end)?;
    let report = WeeklyReportData::new(&state.catalog, trend, &actions, recommendations, streak_days);

    match params.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(report).into_response()),
        "text" => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_weekly_text(&report),
        )
            .into_response()),
        "markdown" | "md" => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_weekly_markdown(&report),
        )
            .into_response()),
        other => Err(AppError::bad_request(&format!(
            "Unknown report format: {}",
            other
        ))),
    }
}
