//! Load balancer proxy
//!
//! Forwards every request, unchanged, to the next node in round-robin order
//! and copies the node's answer back. No retries, no health checks.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::RoundRobin;
use crate::error::{CacheError, Result};

/// Headers that describe a single connection and must not be forwarded.
static HOP_BY_HOP: [header::HeaderName; 4] = [
    header::CONNECTION,
    header::HOST,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Shared load balancer state.
#[derive(Debug, Clone)]
pub struct LbState {
    pub balancer: Arc<RoundRobin>,
    client: reqwest::Client,
}

impl LbState {
    pub fn new(nodes: Vec<String>) -> Self {
        Self {
            balancer: Arc::new(RoundRobin::new(nodes)),
            client: reqwest::Client::new(),
        }
    }
}

/// Creates the load balancer router. Every path is proxied.
pub fn create_lb_router(state: LbState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Forwards one request to the next node.
pub async fn proxy_handler(State(state): State<LbState>, req: Request) -> Result<Response> {
    let node = state
        .balancer
        .next_node()
        .ok_or_else(|| CacheError::PeerUnreachable("no nodes configured".to_string()))?
        .to_string();

    let (parts, body) = req.into_parts();
    let url = format!(
        "http://{}{}?{}",
        node,
        parts.uri.path(),
        parts.uri.query().unwrap_or("")
    );
    let body = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| CacheError::InvalidRequest(e.to_string()))?;

    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(strip_hop_by_hop(parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            warn!("Proxy to {} failed: {}", node, e);
            CacheError::PeerUnreachable(e.to_string())
        })?;

    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers().clone());
    let body = upstream
        .bytes()
        .await
        .map_err(|e| CacheError::PeerUnreachable(e.to_string()))?;

    let mut response = (status, Body::from(body)).into_response();
    response.headers_mut().extend(headers);
    Ok(response)
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers
}
