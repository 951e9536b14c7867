//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use axum::{
    http::{header, HeaderValue},
    routing::{any, get, MethodRouter},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

const VENTURE_METHODS: &str = "GET, POST, PUT, DELETE, HEAD, OPTIONS";
const THING_METHODS: &str = "GET, POST, HEAD, OPTIONS";
const READ_ONLY_METHODS: &str = "GET, HEAD, OPTIONS";

/// Create the main API router
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = config.enable_cors;

    let ventures = get(handlers::get_ventures)
        .post(handlers::post_venture)
        .put(handlers::put_ventures)
        .delete(handlers::delete_ventures);
    let things = get(handlers::get_things).post(handlers::post_thing);

    Router::new()
        .merge(resource("/ventures", ventures, VENTURE_METHODS, cors))
        .merge(resource("/things", things, THING_METHODS, cors))
        .merge(resource("/orders", get(handlers::get_orders), READ_ONLY_METHODS, cors))
        .merge(resource("/orders/:id", get(handlers::get_order), READ_ONLY_METHODS, cors))
        .merge(resource("/changelog", get(handlers::get_changelog), READ_ONLY_METHODS, cors))
        .merge(resource("/openapi", get(handlers::get_openapi), READ_ONLY_METHODS, cors))
        .route("/", any(handlers::home))
        .fallback(handlers::home)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A single resource answering preflights and rejecting unlisted methods,
/// with CORS headers advertising `methods` on every response.
fn resource(
    path: &str,
    routes: MethodRouter<AppState>,
    methods: &'static str,
    cors: bool,
) -> Router<AppState> {
    let routes = routes
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed);
    let router = Router::new().route(path, routes);

    if !cors {
        return router;
    }

    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(methods),
        ))
}
