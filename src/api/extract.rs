//! Request extractors

use crate::error::AppError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejections are reported as [`AppError`]
///
/// A missing content type, malformed JSON or a wrongly typed field all become
/// a 400 with the usual `{message, status}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
