//! Factor catalog handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use footprint_core::{Category, FactorEntry};

#[derive(Serialize)]
pub struct FactorResponse {
    pub factors: Vec<FactorEntry>,
    pub count: usize,
}

/// GET /api/factors - The whole catalog
pub async fn list_factors(State(state): State<Arc<AppState>>) -> Json<FactorResponse> {
    let factors: Vec<FactorEntry> = state.catalog.list(None).into_iter().cloned().collect();
    let count = factors.len();
    Json(FactorResponse { factors, count })
}

/// GET /api/factors/:category - Catalog entries for one category
pub async fn list_factors_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<FactorResponse>, AppError> {
    let category: Category = category
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let factors: Vec<FactorEntry> = state
        .catalog
        .list(Some(category))
        .into_iter()
        .cloned()
        .collect();
    let count = factors.len();

    Ok(Json(FactorResponse { factors, count }))
}
