//! API Module
//!
//! HTTP handlers and routing for a cache node.
//!
//! # Endpoints
//! - `/cache/set?key=&value=&ttl=` - Client write, broadcast to peers
//! - `/cache/get?key=` - Read, possibly relayed from the last writer
//! - `/cache/broadcast_set?key=&value=&ttl=` - Write replicated from a peer
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

/// Client write route.
pub const SET_PATH: &str = "/cache/set";
/// Read route.
pub const GET_PATH: &str = "/cache/get";
/// Peer replication route.
pub const BROADCAST_SET_PATH: &str = "/cache/broadcast_set";
