//! Schedule API handlers
//!
//! Schedules always live in the active profile.

use crate::api::extract::ApiJson;
use crate::api::MessageResponse;
use crate::context::AppContext;
use crate::error::AppError;
use crate::state::ScheduleName;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

/// Save schedule request
#[derive(Debug, Deserialize)]
pub struct SaveScheduleRequest {
    /// Schedule name
    pub name: Option<String>,
    /// Schedule document, stored as-is
    pub data: Option<Value>,
}

/// GET /api/schedules/:name - Fetch a schedule document
pub async fn get_schedule(
    State(ctx): State<AppContext>,
    Path(name): Path<ScheduleName>,
) -> Result<Json<Value>, AppError> {
    let schedule = ctx.profiles()?.get_schedule(&name).await?;
    Ok(Json(schedule))
}

/// POST /api/schedules - Create or overwrite a schedule
pub async fn save_schedule(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<SaveScheduleRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let name = request.name.unwrap_or_default();
    ctx.profiles()?.save_schedule(&name, request.data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!("Schedule '{}' saved", name))),
    ))
}

/// DELETE /api/schedules/:name - Delete a schedule
pub async fn delete_schedule(
    State(ctx): State<AppContext>,
    Path(name): Path<ScheduleName>,
) -> Result<Json<MessageResponse>, AppError> {
    ctx.profiles()?.delete_schedule(&name).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Schedule '{}' deleted",
        name
    ))))
}
