//! Configuration Module
//!
//! Turns parsed command-line flags into the settings a node or load
//! balancer starts with.

use anyhow::{bail, Result};

use crate::cli::{Cli, Mode};

/// Startup configuration.
///
/// The node list is fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to run a cache node or the load balancer
    pub mode: Mode,
    /// Cache node listen port
    pub port: u16,
    /// Every cache node address, in the order given
    pub nodes: Vec<String>,
    /// Host part of this node's own address
    pub host: String,
    /// Load balancer listen port
    pub lb_port: u16,
}

impl Config {
    /// Builds a Config from parsed flags.
    ///
    /// Entries in the node list are trimmed and empty ones dropped; an
    /// empty list is rejected.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let nodes = split_nodes(&cli.nodes);
        if nodes.is_empty() {
            bail!("node list is empty");
        }

        Ok(Self {
            mode: cli.mode,
            port: cli.port,
            nodes,
            host: cli.host,
            lb_port: cli.lb_port,
        })
    }

    /// Address this node uses to recognize itself in the node list.
    pub fn node_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Node,
            port: 8081,
            nodes: vec![
                "localhost:8081".to_string(),
                "localhost:8082".to_string(),
                "localhost:8083".to_string(),
            ],
            host: "localhost".to_string(),
            lb_port: 8080,
        }
    }
}

fn split_nodes(nodes: &str) -> Vec<String> {
    nodes
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
