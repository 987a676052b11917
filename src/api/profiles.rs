//! Profile management API handlers

use crate::api::extract::ApiJson;
use crate::api::StateResponse;
use crate::context::AppContext;
use crate::error::AppError;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::Value;

/// Request naming a single profile
#[derive(Debug, Deserialize)]
pub struct ProfileNameRequest {
    /// Profile name
    pub name: Option<String>,
}

/// Rename profile request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameProfileRequest {
    /// Current profile name
    pub old_name: Option<String>,
    /// New profile name
    pub new_name: Option<String>,
}

/// Import profile request
#[derive(Debug, Deserialize)]
pub struct ImportProfileRequest {
    /// Name for the imported profile
    pub name: Option<String>,
    /// Exported settings; must be present but may be empty
    pub settings: Option<Value>,
}

/// POST /api/profiles - Create a profile and make it active
pub async fn create_profile(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<ProfileNameRequest>,
) -> Result<(StatusCode, Json<StateResponse>), AppError> {
    let name = request.name.unwrap_or_default();
    let state = ctx.profiles()?.create_profile(&name).await?;
    Ok((
        StatusCode::CREATED,
        Json(StateResponse::new("Profile created", state)),
    ))
}

/// POST /api/profiles/rename - Rename a profile
pub async fn rename_profile(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<RenameProfileRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let old_name = request.old_name.unwrap_or_default();
    let new_name = request.new_name.unwrap_or_default();
    let state = ctx
        .profiles()?
        .rename_profile(&old_name, &new_name)
        .await?;
    Ok(Json(StateResponse::new("Profile renamed", state)))
}

/// POST /api/profiles/delete - Delete a profile
pub async fn delete_profile(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<ProfileNameRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let name = request.name.unwrap_or_default();
    let state = ctx.profiles()?.delete_profile(&name).await?;
    Ok(Json(StateResponse::new("Profile deleted", state)))
}

/// POST /api/profiles/import - Create a profile from exported settings
pub async fn import_profile(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<ImportProfileRequest>,
) -> Result<(StatusCode, Json<StateResponse>), AppError> {
    let name = request.name.unwrap_or_default();
    let state = ctx
        .profiles()?
        .import_profile(&name, request.settings)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StateResponse::new("Profile imported", state)),
    ))
}

/// POST /api/active_profile - Switch the active profile
pub async fn set_active_profile(
    State(ctx): State<AppContext>,
    ApiJson(request): ApiJson<ProfileNameRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let name = request.name.unwrap_or_default();
    let state = ctx.profiles()?.set_active_profile(&name).await?;
    Ok(Json(StateResponse::new("Active profile updated", state)))
}
