//! Thing and order handlers

use super::decode_body;
use crate::api::rest::reply::{respond, Reply, ReplyContext};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use qlueless_types::{WorkItem, WorkItemKind};

async fn list_items(state: &AppState, kind: WorkItemKind) -> ApiResult<Reply> {
    let items = state.work_items.list_work_items(kind).await?;
    Reply::ok(format!("Found all {}", kind.plural())).with_data(&items)
}

async fn find_item(state: &AppState, kind: WorkItemKind, id: &str) -> ApiResult<Reply> {
    let noun = kind.noun();
    let item = state
        .work_items
        .get_work_item(kind, id.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", noun)))?;
    Reply::ok(format!("Found {}", noun.to_lowercase())).with_data(&item)
}

async fn create_item(state: &AppState, kind: WorkItemKind, body: &Bytes) -> ApiResult<Reply> {
    let mut item: WorkItem = decode_body(body, &format!("a {}", noun_lower(kind)))?;
    item.clean();
    item.validate_new(kind)?;

    let item = state.work_items.insert_work_item(kind, item).await?;
    tracing::info!(kind = %kind, id = %item.id, "Created work item");

    Reply::created(format!("Created new {}", noun_lower(kind))).with_data(&item)
}

fn noun_lower(kind: WorkItemKind) -> String {
    kind.noun().to_lowercase()
}

/// Get all things, or one by `id`
pub async fn get_things(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    let result = match ctx.param("id") {
        Some(id) => find_item(&state, WorkItemKind::Thing, id).await,
        None => list_items(&state, WorkItemKind::Thing).await,
    };
    respond(&ctx, result)
}

/// Create a thing
pub async fn post_thing(State(state): State<AppState>, ctx: ReplyContext, body: Bytes) -> Response {
    let result = create_item(&state, WorkItemKind::Thing, &body).await;
    respond(&ctx, result)
}

/// Get all orders
pub async fn get_orders(State(state): State<AppState>, ctx: ReplyContext) -> Response {
    let result = list_items(&state, WorkItemKind::Order).await;
    respond(&ctx, result)
}

/// Get an order by its path ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: ReplyContext,
) -> Response {
    let result = find_item(&state, WorkItemKind::Order, &id).await;
    respond(&ctx, result)
}
