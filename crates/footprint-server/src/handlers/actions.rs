//! Action log handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::resolve_date;
use crate::{AppError, AppState};
use footprint_core::{
    compute_impact, parse_quick_log, Category, Error, LoggedAction, NewAction, ParsedAction,
    TimeOfDay,
};

/// Query parameters for listing actions
#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    /// Day to list (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

/// Request body for logging one action
#[derive(Debug, Deserialize)]
pub struct CreateActionRequest {
    pub date: Option<String>,
    pub category: Category,
    pub item_key: String,
    pub amount: f64,
    pub time_of_day: Option<TimeOfDay>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub actions: Vec<LoggedAction>,
    pub count: usize,
}

/// GET /api/actions - List actions for a day
pub async fn list_actions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActionQuery>,
) -> Result<Json<ActionResponse>, AppError> {
    let date = resolve_date(params.date.as_deref())?;
    let actions = state.db.actions_by_date(date)?;
    let count = actions.len();

    Ok(Json(ActionResponse { actions, count }))
}

/// POST /api/actions - Log one action
pub async fn create_action(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateActionRequest>,
) -> Result<Json<LoggedAction>, AppError> {
    let date = resolve_date(body.date.as_deref())?;

    let impact = compute_impact(
        &state.catalog,
        body.category,
        &body.item_key,
        body.amount,
        body.time_of_day,
    )
    .map_err(|e| match e {
        Error::UnknownItem { .. } | Error::InvalidAmount(_) => {
            AppError::bad_request(&e.to_string())
        }
        other => other.into(),
    })?;

    let action = NewAction {
        date,
        category: body.category,
        item_key: body.item_key,
        amount: body.amount,
        time_of_day: body.time_of_day,
        notes: body.notes,
    };
    let id = state.db.insert_action(&action, impact)?;

    let stored = state
        .db
        .actions_by_date(date)?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::not_found("Action not found after insert"))?;

    Ok(Json(stored))
}

/// Request body for logging several actions in one call
#[derive(Debug, Deserialize)]
pub struct BulkLogRequest {
    pub actions: Vec<CreateActionRequest>,
}

#[derive(Serialize)]
pub struct BulkLogResponse {
    pub logged: Vec<LoggedAction>,
    /// Entries that failed validation and were not stored
    pub skipped: usize,
}

/// POST /api/actions/bulk - Log a batch of actions, skipping invalid entries
pub async fn bulk_log(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BulkLogRequest>,
) -> Result<Json<BulkLogResponse>, AppError> {
    let mut logged = Vec::with_capacity(body.actions.len());
    let mut skipped = 0;

    for item in body.actions {
        let Ok(date) = resolve_date(item.date.as_deref()) else {
            skipped += 1;
            continue;
        };
        let impact = match compute_impact(
            &state.catalog,
            item.category,
            &item.item_key,
            item.amount,
            item.time_of_day,
        ) {
            Ok(impact) => impact,
            Err(Error::UnknownItem { .. }) | Err(Error::InvalidAmount(_)) => {
                skipped += 1;
                continue;
            }
            Err(other) => return Err(other.into()),
        };

        let action = NewAction {
            date,
            category: item.category,
            item_key: item.item_key,
            amount: item.amount,
            time_of_day: item.time_of_day,
            notes: item.notes,
        };
        let id = state.db.insert_action(&action, impact)?;
        if let Some(stored) = state
            .db
            .actions_by_date(date)?
            .into_iter()
            .find(|a| a.id == id)
        {
            logged.push(stored);
        }
    }

    Ok(Json(BulkLogResponse { logged, skipped }))
}

/// Request body for quick-logging from free text
#[derive(Debug, Deserialize)]
pub struct QuickLogRequest {
    pub message: String,
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct QuickLogResponse {
    pub parsed: Vec<ParsedAction>,
    pub logged: Vec<LoggedAction>,
}

/// POST /api/actions/quick - Parse a free-text message and log what it says
pub async fn quick_log(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QuickLogRequest>,
) -> Result<Json<QuickLogResponse>, AppError> {
    let date = resolve_date(body.date.as_deref())?;

    let parsed = parse_quick_log(&body.message);
    if parsed.is_empty() {
        return Err(AppError::bad_request(
            "No recognizable actions in the message",
        ));
    }

    let mut logged = Vec::with_capacity(parsed.len());
    for p in &parsed {
        let impact = compute_impact(&state.catalog, p.category, &p.item_key, p.amount, None)?;
        let action = NewAction {
            date,
            category: p.category,
            item_key: p.item_key.clone(),
            amount: p.amount,
            time_of_day: None,
            notes: None,
        };
        let id = state.db.insert_action(&action, impact)?;
        if let Some(stored) = state
            .db
            .actions_by_date(date)?
            .into_iter()
            .find(|a| a.id == id)
        {
            logged.push(stored);
        }
    }

    Ok(Json(QuickLogResponse { parsed, logged }))
}

/// DELETE /api/actions/:id - Remove one logged action
pub async fn delete_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.db.delete_action(id)? {
        return Err(AppError::not_found(&format!("No action with id {}", id)));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}
