//! State, settings and holiday API handlers

use crate::api::extract::ApiJson;
use crate::api::StateResponse;
use crate::context::AppContext;
use crate::error::AppError;
use crate::holidays::HolidayRecord;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status ("healthy" or "degraded")
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable message
    pub message: String,
    /// Whether the state store is connected
    pub store_connected: bool,
}

/// GET /api/health - Liveness and store connectivity
pub async fn health_check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    let connected = ctx.is_store_connected();
    let (status, message) = if connected {
        ("healthy", "Backend is healthy")
    } else {
        ("degraded", "Backend is running without a database")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: message.to_string(),
        store_connected: connected,
    })
}

/// GET /api/data - Full application state
pub async fn get_data(State(ctx): State<AppContext>) -> Result<Json<AppState>, AppError> {
    let state = ctx.profiles()?.state().await?;
    Ok(Json(state))
}

/// POST /api/settings - Replace the active profile's settings with the body
pub async fn save_settings(
    State(ctx): State<AppContext>,
    ApiJson(settings): ApiJson<Value>,
) -> Result<Json<StateResponse>, AppError> {
    let state = ctx.profiles()?.save_settings(settings).await?;
    Ok(Json(StateResponse::new("Settings saved", state)))
}

/// GET /api/holidays - Cached holiday records
///
/// An empty cache means the data could not be loaded and is reported as 500.
pub async fn get_holidays(
    State(ctx): State<AppContext>,
) -> Result<Json<Arc<Vec<HolidayRecord>>>, AppError> {
    let records = ctx.holidays().load();
    if records.is_empty() {
        return Err(AppError::HolidaysUnavailable);
    }
    Ok(Json(records))
}
