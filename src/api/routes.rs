//! API Routes
//!
//! Configures the Axum router with all cache node endpoints.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    broadcast_set_handler, get_handler, health_handler, set_handler, AppState,
};
use super::{BROADCAST_SET_PATH, GET_PATH, SET_PATH};

/// Creates the node router with all endpoints configured.
///
/// The cache routes accept any method; parameters travel in the query
/// string either way.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SET_PATH, any(set_handler))
        .route(GET_PATH, any(get_handler))
        .route(BROADCAST_SET_PATH, any(broadcast_set_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
