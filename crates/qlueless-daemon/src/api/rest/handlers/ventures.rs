//! Venture handlers

use super::decode_body;
use crate::api::rest::reply::{respond, Reply, ReplyContext};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{body::Bytes, extract::State, response::Response};
use qlueless_types::validation::{is_positive_int_csv, split_csv};
use qlueless_types::{ModVenture, NewVenture, Venture};

const MSG_BAD_IDS: &str = "Query parameter 'ids' must be a CSV of positive integers.";

fn requested_ids(raw: &str) -> ApiResult<Vec<String>> {
    let raw: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if !is_positive_int_csv(&raw) {
        return Err(ApiError::BadRequest(MSG_BAD_IDS.to_string()));
    }
    Ok(split_csv(&raw))
}

/// Get all living ventures, one by `id`, or several by `ids`
pub async fn get_ventures(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    let result = find_ventures(&state, &ctx).await;
    respond(&ctx, result)
}

async fn find_ventures(state: &AppState, ctx: &ReplyContext) -> ApiResult<Reply> {
    if let Some(id) = ctx.param("id") {
        let venture = state
            .ventures
            .get_venture(id.trim())
            .await?
            .filter(|v| v.is_alive)
            .ok_or_else(|| ApiError::NotFound("Venture not found".to_string()))?;
        return Reply::ok("Found venture").with_data(&venture);
    }

    if let Some(ids) = ctx.param("ids") {
        let ids = requested_ids(ids)?;
        let ventures: Vec<Venture> = state
            .ventures
            .list_ventures(&ids)
            .await?
            .into_iter()
            .filter(|v| v.is_alive)
            .collect();
        return Reply::ok("Found ventures").with_data(&ventures);
    }

    let ventures = state.ventures.list_living_ventures().await?;
    Reply::ok("Found all ventures").with_data(&ventures)
}

/// Create a venture
pub async fn post_venture(State(state): State<AppState>, ctx: ReplyContext, body: Bytes) -> Response {
    let result = create_venture(&state, &body).await;
    respond(&ctx, result)
}

async fn create_venture(state: &AppState, body: &Bytes) -> ApiResult<Reply> {
    let mut new: NewVenture = decode_body(body, "a Venture")?;
    new.clean();
    new.validate()?;

    let venture = state.ventures.insert_venture(new).await?;
    tracing::info!(venture_id = %venture.id, "Created venture");

    Reply::created("Created new venture").with_data(&venture)
}

/// Apply a modification to several ventures
pub async fn put_ventures(State(state): State<AppState>, ctx: ReplyContext, body: Bytes) -> Response {
    let result = modify_ventures(&state, &body).await;
    respond(&ctx, result)
}

async fn modify_ventures(state: &AppState, body: &Bytes) -> ApiResult<Reply> {
    let mut modification: ModVenture = decode_body(body, "a Venture modification")?;
    modification.clean();
    modification.validate()?;

    let mut ventures = state.ventures.list_ventures(&modification.id_list()).await?;

    // Nothing is saved unless every modified venture is still valid.
    for venture in &mut ventures {
        modification.apply(venture);
        venture.clean();
        venture.validate()?;
    }

    let mut updated = Vec::with_capacity(ventures.len());
    for venture in ventures {
        updated.push(state.ventures.update_venture(venture).await?);
    }

    tracing::info!(ids = %modification.ids, props = %modification.props, count = updated.len(), "Updated ventures");
    Reply::ok("Updated ventures").with_data(&updated)
}

/// Mark the ventures listed in `ids` as dead
pub async fn delete_ventures(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    let result = kill_ventures(&state, &ctx).await;
    respond(&ctx, result)
}

async fn kill_ventures(state: &AppState, ctx: &ReplyContext) -> ApiResult<Reply> {
    let ids = ctx
        .param("ids")
        .ok_or_else(|| ApiError::BadRequest(MSG_BAD_IDS.to_string()))
        .and_then(requested_ids)?;

    let ventures = state.ventures.list_ventures(&ids).await?;
    let mut deleted = Vec::with_capacity(ventures.len());
    for mut venture in ventures.into_iter().filter(|v| v.is_alive) {
        venture.is_alive = false;
        deleted.push(state.ventures.update_venture(venture).await?);
    }

    tracing::info!(ids = %ids.join(","), count = deleted.len(), "Deleted ventures");
    Reply::ok("Deleted ventures").with_data(&deleted)
}
