//! Distributed Cache - a minimal multi-node in-memory cache
//!
//! Each node keeps its own TTL store. Writes accepted by one node are pushed
//! to every peer on a best-effort basis, so reads elsewhere eventually see
//! them. A round-robin load balancer can sit in front of the nodes.

pub mod api;
pub mod cache;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod lb;
pub mod models;
pub mod node;

pub use api::AppState;
pub use config::Config;
pub use node::CacheNode;
