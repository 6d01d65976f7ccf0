//! API Handlers
//!
//! HTTP request handlers for each cache node endpoint. All parameters come
//! from the query string.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, ReadParams, WriteParams};
use crate::node::{CacheNode, ReadOutcome};

/// Query pairs in arrival order; repeated names are resolved by the params types.
pub type QueryPairs = Query<Vec<(String, String)>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The node serving this router
    pub node: Arc<CacheNode>,
}

impl AppState {
    /// Creates a new AppState around the given node.
    pub fn new(node: CacheNode) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The node's own address is `host:port`, which must match its entry in
    /// the node list for it to skip itself when broadcasting.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheNode::new(config.node_address(), config.nodes.clone()))
    }
}

/// Handler for /cache/set
///
/// Stores a client write and broadcasts it to every peer.
pub async fn set_handler(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
) -> Result<String> {
    state
        .node
        .accept_client_write(WriteParams::from_pairs(&pairs))
        .await
}

/// Handler for /cache/get
///
/// Serves a read locally or relays it from the last writer.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
) -> Result<ReadOutcome> {
    state.node.serve_read(ReadParams::from_pairs(&pairs)).await
}

/// Handler for /cache/broadcast_set
///
/// Stores a write replicated from a peer.
pub async fn broadcast_set_handler(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
) -> Result<()> {
    state
        .node
        .accept_replicated_write(WriteParams::from_pairs(&pairs))
        .await
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    const SELF: &str = "127.0.0.1:1";

    fn test_state() -> AppState {
        AppState::new(CacheNode::new(SELF, vec![SELF.to_string()]))
    }

    fn query(raw: &[(&str, &str)]) -> QueryPairs {
        Query(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn write(key: &str, value: &str, ttl: &str) -> QueryPairs {
        query(&[("key", key), ("value", value), ("ttl", ttl)])
    }

    fn read(key: &str) -> QueryPairs {
        query(&[("key", key)])
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(State(state.clone()), write("test_key", "test_value", "60")).await;
        assert_eq!(result.unwrap(), "Cache entry set for key: test_key");

        let result = get_handler(State(state), read("test_key")).await;
        assert_eq!(result.unwrap(), ReadOutcome::Local("test_value".to_string()));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), read("nonexistent")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_set_handler() {
        let state = test_state();

        broadcast_set_handler(State(state.clone()), write("k", "v", "60"))
            .await
            .unwrap();

        let result = get_handler(State(state), read("k")).await;
        assert_eq!(result.unwrap(), ReadOutcome::Local("v".to_string()));
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let result = set_handler(State(test_state()), write("", "value", "60")).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_repeated_parameters_use_first_value() {
        let state = test_state();

        let params = query(&[("key", "a"), ("key", "b"), ("value", "1"), ("ttl", "10")]);
        let result = set_handler(State(state.clone()), params).await;
        assert_eq!(result.unwrap(), "Cache entry set for key: a");

        let result = get_handler(State(state), query(&[("key", "a"), ("key", "b")])).await;
        assert_eq!(result.unwrap(), ReadOutcome::Local("1".to_string()));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
