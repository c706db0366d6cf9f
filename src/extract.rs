use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as [`ApiError::InvalidBody`]
///
/// Malformed syntax, type mismatches and a missing `content-type` all
/// produce the same 400 response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
