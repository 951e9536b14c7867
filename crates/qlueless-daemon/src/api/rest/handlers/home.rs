//! Root path, unknown paths and method fallbacks

use crate::api::rest::reply::{render_error, respond, ReplyContext};
use crate::error::ApiError;
use axum::{
    http::{Method, StatusCode},
    response::Response,
};

/// Nothing lives at `/` or at any unrouted path
pub async fn home(ctx: ReplyContext) -> Response {
    respond(&ctx, Err(ApiError::NotFound("Resource not found".to_string())))
}

/// Answer a CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed(method: Method, ctx: ReplyContext) -> Response {
    render_error(&ctx, &ApiError::MethodNotAllowed(method.to_string()))
}
