//! Changelog and OpenAPI documents

use crate::api::rest::reply::{json_response, render_error, ReplyContext};
use crate::api::rest::state::AppState;
use crate::error::ApiError;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Serve the changelog as markdown
pub async fn get_changelog(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    match &state.content.changelog {
        Some(changelog) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(MARKDOWN_CONTENT_TYPE))],
            changelog.clone(),
        )
            .into_response(),
        None => render_error(&ctx, &ApiError::Internal("changelog not loaded".to_string())),
    }
}

/// Serve the OpenAPI document
pub async fn get_openapi(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    match &state.content.openapi {
        Some(openapi) => json_response(StatusCode::OK, openapi),
        None => render_error(&ctx, &ApiError::Internal("OpenAPI document not loaded".to_string())),
    }
}
