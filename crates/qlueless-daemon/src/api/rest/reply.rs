//! Reply presentation
//!
//! Handlers describe a reply as status, message and optional data. The
//! request decides how it is written: raw data when the client asked for no
//! wrapping, otherwise a wrapped reply shaped by the `wrap_with` directive.

use crate::error::{ApiError, ApiResult};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use qlueless_envelope::{build_envelope, parse_directive, BaseReply, Envelope, WRAP_WITH_PARAM};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;

/// Query parameter asking for a wrapped reply without reshaping it
pub const WRAP_PARAM: &str = "wrap";

/// Deepest `wrap_with` nesting rendered; deeper directives are refused
/// before the envelope is built.
pub const MAX_WRAP_DEPTH: usize = 256;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Outcome of a successful handler
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<Value>,
}

impl Reply {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    pub fn created(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, message)
    }

    pub fn with_data<T: Serialize>(mut self, data: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(data)
            .map_err(|e| ApiError::Internal(format!("failed to serialize reply data: {}", e)))?;
        self.data = Some(value);
        Ok(self)
    }
}

/// What a reply needs to know about the request it answers
#[derive(Debug, Clone, Default)]
pub struct ReplyContext {
    /// Path and query of the request, echoed as the reply's `self`
    pub self_link: String,
    params: HashMap<String, String>,
}

impl ReplyContext {
    pub fn new(self_link: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            self_link: self_link.into(),
            params,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Either wrap parameter is present, whatever its value.
    pub fn wrap_requested(&self) -> bool {
        self.params.contains_key(WRAP_PARAM) || self.params.contains_key(WRAP_WITH_PARAM)
    }

    fn base_reply(&self, message: impl Into<String>) -> BaseReply {
        BaseReply::new(message, self.self_link.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ReplyContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let self_link = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        let params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(Self::new(self_link, params))
    }
}

/// Write a handler outcome as a response.
pub fn respond(ctx: &ReplyContext, result: ApiResult<Reply>) -> Response {
    match result {
        Ok(reply) => render(ctx, reply),
        Err(err) => render_error(ctx, &err),
    }
}

fn render(ctx: &ReplyContext, reply: Reply) -> Response {
    if reply.message.is_empty() {
        let err = ApiError::Internal("handler produced a reply without a message".to_string());
        return render_error(ctx, &err);
    }

    if !ctx.wrap_requested() {
        if let Some(data) = &reply.data {
            return json_response(reply.status, data);
        }
    }

    let mut base = ctx.base_reply(reply.message);
    base.data = reply.data;

    match envelope_for(ctx, &base) {
        Ok(envelope) => json_response(reply.status, &envelope),
        Err(err) => render_error(ctx, &err),
    }
}

fn envelope_for(ctx: &ReplyContext, base: &BaseReply) -> ApiResult<Envelope> {
    let directive = parse_directive(ctx.param(WRAP_WITH_PARAM))?;
    if directive.len() > MAX_WRAP_DEPTH {
        return Err(ApiError::WrapTooDeep {
            depth: directive.len(),
            limit: MAX_WRAP_DEPTH,
        });
    }
    Ok(build_envelope(base, &directive))
}

/// Errors are always wrapped; an unusable directive leaves them unshaped.
pub fn render_error(ctx: &ReplyContext, err: &ApiError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(error = %err, path = %ctx.self_link, "Request failed");
    } else {
        tracing::debug!(error = %err, path = %ctx.self_link, "Request rejected");
    }

    let base = ctx.base_reply(err.client_message());
    match envelope_for(ctx, &base) {
        Ok(envelope) => json_response(status, &envelope),
        Err(_) => json_response(status, &base),
    }
}

pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    fn ctx(self_link: &str, params: &[(&str, &str)]) -> ReplyContext {
        ReplyContext::new(
            self_link,
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn found() -> Reply {
        Reply::ok("Found venture")
            .with_data(&json!({ "venture_id": "1" }))
            .unwrap()
    }

    #[tokio::test]
    async fn test_raw_data_without_wrap_params() {
        let response = respond(&ctx("/ventures?id=1", &[("id", "1")]), Ok(found()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(body_json(response).await, json!({ "venture_id": "1" }));
    }

    #[tokio::test]
    async fn test_wrap_param_gives_base_reply() {
        let response = respond(&ctx("/ventures?wrap", &[("wrap", "")]), Ok(found()));
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Found venture",
                "self": "/ventures?wrap",
                "data": { "venture_id": "1" }
            })
        );
    }

    #[tokio::test]
    async fn test_wrap_with_reshapes_reply() {
        let context = ctx("/ventures?wrap_with=data", &[("wrap_with", "data")]);
        let response = respond(&context, Ok(found()));
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "venture_id": "1" } })
        );
    }

    #[tokio::test]
    async fn test_invalid_wrap_with_is_bad_request() {
        let context = ctx("/ventures?wrap_with=message..self", &[("wrap_with", "message..self")]);
        let response = respond(&context, Ok(found()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["self"], "/ventures?wrap_with=message..self");
        assert!(body["message"].as_str().unwrap().contains("wrap_with"));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_wrap_depth_limit() {
        let at_limit = vec!["message"; MAX_WRAP_DEPTH].join(".");
        let response = respond(&ctx("/things", &[("wrap_with", at_limit.as_str())]), Ok(found()));
        assert_eq!(response.status(), StatusCode::OK);

        let too_deep = vec!["message"; MAX_WRAP_DEPTH + 1].join(".");
        let response = respond(&ctx("/things", &[("wrap_with", too_deep.as_str())]), Ok(found()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["self"], "/things");
        assert!(body["message"].as_str().unwrap().contains("at most 256"));
    }

    #[tokio::test]
    async fn test_errors_are_wrapped() {
        let err = ApiError::NotFound("Venture not found".to_string());
        let response = respond(&ctx("/ventures?id=9", &[("id", "9")]), Err(err));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Venture not found", "self": "/ventures?id=9" })
        );
    }

    #[tokio::test]
    async fn test_empty_message_is_server_error() {
        let response = respond(&ctx("/things", &[]), Ok(Reply::ok("")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_reply_without_data_is_wrapped() {
        let response = respond(&ctx("/", &[]), Ok(Reply::ok("Hello")));
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Hello", "self": "/" })
        );
    }
}
