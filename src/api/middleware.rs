//! Request middleware
//!
//! Request-id tracing for every request, and the store gate that runs in front
//! of the API routes.

use crate::context::AppContext;
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Reject every API request with 503 while the store is not connected
pub async fn require_store(
    State(ctx): State<AppContext>,
    request: Request,
    next: Next,
) -> Response {
    if !ctx.is_store_connected() {
        return AppError::StoreUnavailable.into_response();
    }
    next.run(request).await
}
