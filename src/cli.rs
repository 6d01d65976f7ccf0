//! Command-line interface
//!
//! Every flag can also be supplied through the environment.

use clap::{Parser, ValueEnum};

/// Role this process plays in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Serve a cache node
    Node,
    /// Round-robin requests across the node list
    #[value(alias = "load_balancer")]
    LoadBalancer,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "dist_cache", author, version, about, long_about = None)]
pub struct Cli {
    /// Start mode.
    #[arg(long, value_enum, env = "CACHE_MODE", default_value = "node")]
    pub mode: Mode,

    /// Port the cache node listens on.
    #[arg(long, env = "CACHE_PORT", default_value_t = 8081)]
    pub port: u16,

    /// Comma-separated list of every cache node, this one included.
    #[arg(
        long,
        env = "CACHE_NODES",
        default_value = "localhost:8081,localhost:8082,localhost:8083"
    )]
    pub nodes: String,

    /// Host part of this node's own address as it appears in `--nodes`.
    #[arg(long, env = "CACHE_HOST", default_value = "localhost")]
    pub host: String,

    /// Port the load balancer listens on.
    #[arg(long, env = "CACHE_LB_PORT", default_value_t = 8080)]
    pub lb_port: u16,
}
