//! Coaching handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::resolve_date;
use crate::{AppError, AppState};
use footprint_core::{
    compare_to_benchmark, compute_daily_summary, daily_message, recommend, BenchmarkComparison,
    Category, DailySummary, Recommendation,
};

/// Query parameters for daily coaching
#[derive(Debug, Deserialize)]
pub struct CoachQuery {
    /// Day to coach on (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct CoachResponse {
    pub summary: DailySummary,
    pub message: String,
    pub recommendations: Vec<Recommendation>,
    pub benchmarks: Vec<CategoryBenchmark>,
    pub streak_days: u32,
}

#[derive(Serialize)]
pub struct CategoryBenchmark {
    pub category: Category,
    #[serde(flatten)]
    pub comparison: BenchmarkComparison,
}

/// GET /api/coach/daily - Summary, message, substitutions, and benchmarks
pub async fn daily_coach(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoachQuery>,
) -> Result<Json<CoachResponse>, AppError> {
    let date = resolve_date(params.date.as_deref())?;
    let actions = state.db.actions_by_date(date)?;

    let summary = compute_daily_summary(&state.catalog, date, &actions);
    let message = daily_message(&summary);
    let recommendations = recommend(&state.catalog, &actions);
    let streak_days = state.db.streak_days(date)?;

    let benchmarks = summary
        .by_category
        .iter()
        .map(|(&category, totals)| CategoryBenchmark {
            category,
            comparison: compare_to_benchmark(category, totals.co2e_kg, totals.water_l),
        })
        .collect();

    Ok(Json(CoachResponse {
        summary,
        message,
        recommendations,
        benchmarks,
        streak_days,
    }))
}
