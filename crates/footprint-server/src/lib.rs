//! Footprint Web Server
//!
//! Axum-based REST API for the Footprint impact coach. Exposes the action
//! log, impact summaries, coaching recommendations, the factor catalog, and
//! rendered reports. Intended for local use; there is no authentication.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use footprint_core::{Database, FactorCatalog};

mod handlers;

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub catalog: FactorCatalog,
}

/// Create the application router
pub fn create_router(db: Database, catalog: FactorCatalog) -> Router {
    let state = Arc::new(AppState { db, catalog });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Action log
        .route(
            "/actions",
            get(handlers::list_actions).post(handlers::create_action),
        )
        .route("/actions/quick", post(handlers::quick_log))
        .route("/actions/bulk", post(handlers::bulk_log))
        .route("/actions/:id", axum::routing::delete(handlers::delete_action))
        // Impact summaries
        .route("/impact/daily", get(handlers::daily_impact))
        .route("/impact/weekly", get(handlers::weekly_impact))
        // Coaching
        .route("/coach/daily", get(handlers::daily_coach))
        // Factor catalog
        .route("/factors", get(handlers::list_factors))
        .route("/factors/:category", get(handlers::list_factors_by_category))
        // Reports
        .route("/reports/daily", get(handlers::daily_report))
        .route("/reports/weekly", get(handlers::weekly_report));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    let catalog = FactorCatalog::builtin()?;
    let app = create_router(db, catalog);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
