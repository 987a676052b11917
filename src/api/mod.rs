//! API module
//!
//! HTTP handlers, middleware and the router that ties them to the front-end
//! fallback.

pub mod data;
pub mod extract;
pub mod middleware;
pub mod profiles;
pub mod schedules;

use crate::context::AppContext;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok", "error")
    pub status: String,
}

impl MessageResponse {
    /// Successful outcome with a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "ok".to_string(),
        }
    }
}

/// Response for operations that change profiles or settings
///
/// Carries the updated state so clients can refresh without another request.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Human-readable message
    pub message: String,
    /// State after the operation
    #[serde(flatten)]
    pub state: AppState,
}

impl StateResponse {
    /// Wrap the updated state with a message
    pub fn new(message: impl Into<String>, state: AppState) -> Self {
        Self {
            message: message.into(),
            state,
        }
    }
}

/// Build the application router
///
/// API routes sit behind the store gate; `/api/health` does not. Every
/// unmatched path serves `entry_file` so client-side routing works.
pub fn router(ctx: AppContext, entry_file: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/api/holidays", get(data::get_holidays))
        .route("/api/data", get(data::get_data))
        .route("/api/settings", post(data::save_settings))
        .route("/api/profiles", post(profiles::create_profile))
        .route("/api/profiles/rename", post(profiles::rename_profile))
        .route("/api/profiles/delete", post(profiles::delete_profile))
        .route("/api/profiles/import", post(profiles::import_profile))
        .route("/api/active_profile", post(profiles::set_active_profile))
        .route("/api/schedules", post(schedules::save_schedule))
        .route(
            "/api/schedules/:name",
            get(schedules::get_schedule).delete(schedules::delete_schedule),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            middleware::require_store,
        ));

    Router::new()
        .route("/api/health", get(data::health_check))
        .merge(api)
        .fallback_service(ServeFile::new(entry_file.as_ref()))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
