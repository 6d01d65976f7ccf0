//! Load Balancer Module
//!
//! Stateless round-robin HTTP proxy in front of the cache nodes.

mod balancer;
mod proxy;

pub use balancer::RoundRobin;
pub use proxy::{create_lb_router, proxy_handler, LbState};
