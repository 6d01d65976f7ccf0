//! Replication Coordinator
//!
//! Best-effort fan-out of local writes to every peer. Each peer call runs in
//! its own spawned task; the writer never waits on it and never hears how it
//! went. Failures only show up in the log.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::BROADCAST_SET_PATH;
use crate::cluster::SyncState;
use crate::error::{CacheError, Result};

// == Replication Coordinator ==
/// Pushes writes accepted by this node to all other nodes.
#[derive(Debug, Clone)]
pub struct ReplicationCoordinator {
    /// This node's own address, skipped during fan-out
    self_addr: String,
    /// Every node in the cluster, fixed at startup
    nodes: Arc<[String]>,
    /// Shared outbound client; carries no timeout of its own
    client: reqwest::Client,
    /// Holds the replication flag toggled around each broadcast
    sync: Arc<Mutex<SyncState>>,
}

impl ReplicationCoordinator {
    pub fn new(
        self_addr: impl Into<String>,
        nodes: Vec<String>,
        client: reqwest::Client,
        sync: Arc<Mutex<SyncState>>,
    ) -> Self {
        Self {
            self_addr: self_addr.into(),
            nodes: nodes.into(),
            client,
            sync,
        }
    }

    /// Every configured node other than this one.
    pub fn peers(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .map(String::as_str)
            .filter(move |addr| *addr != self.self_addr)
    }

    // == Broadcast ==
    /// Spawns one replication task per peer and returns how many were launched.
    ///
    /// The replication flag is raised before the first spawn and lowered right
    /// after the last one, so it says nothing about whether peers have applied
    /// the write.
    pub async fn broadcast_write(&self, key: &str, value: &str, ttl: i64) -> usize {
        self.sync.lock().await.begin_broadcast();

        let mut launched = 0;
        for peer in self.peers() {
            let client = self.client.clone();
            let peer = peer.to_string();
            let key = key.to_string();
            let value = value.to_string();

            tokio::spawn(async move {
                match replicate_to_peer(&client, &peer, &key, &value, ttl).await {
                    Ok(()) => debug!("Replicated key {} to {}", key, peer),
                    Err(e) => warn!("Error syncing to {}: {}", peer, e),
                }
            });
            launched += 1;
        }

        self.sync.lock().await.finish_broadcast();
        launched
    }
}

/// Sends a single replicated write to `peer`.
async fn replicate_to_peer(
    client: &reqwest::Client,
    peer: &str,
    key: &str,
    value: &str,
    ttl: i64,
) -> Result<()> {
    let url = format!("http://{}{}", peer, BROADCAST_SET_PATH);
    let ttl = ttl.to_string();

    let response = client
        .post(&url)
        .query(&[("key", key), ("value", value), ("ttl", ttl.as_str())])
        .send()
        .await
        .map_err(|e| CacheError::PeerUnreachable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(CacheError::PeerUnreachable(format!(
            "{} answered {}",
            peer,
            response.status()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::{extract::Query, routing::post, Router};
    use tokio::sync::mpsc;

    use crate::models::WriteParams;
    use crate::node::CacheNode;

    fn coordinator(self_addr: &str, nodes: &[&str]) -> ReplicationCoordinator {
        ReplicationCoordinator::new(
            self_addr,
            nodes.iter().map(|n| n.to_string()).collect(),
            reqwest::Client::new(),
            Arc::new(Mutex::new(SyncState::new())),
        )
    }

    /// Starts a fake peer that forwards every replicated write's query to a channel.
    async fn spawn_recording_peer() -> (String, mpsc::UnboundedReceiver<HashMap<String, String>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new().route(
            BROADCAST_SET_PATH,
            post(move |Query(params): Query<HashMap<String, String>>| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(params);
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, rx)
    }

    #[test]
    fn test_peers_exclude_self() {
        let coord = coordinator("a:1", &["a:1", "b:2", "c:3"]);
        let peers: Vec<&str> = coord.peers().collect();
        assert_eq!(peers, vec!["b:2", "c:3"]);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_peers() {
        let coord = coordinator("a:1", &["a:1"]);
        assert_eq!(coord.broadcast_write("k", "v", 10).await, 0);
    }

    #[tokio::test]
    async fn test_flag_is_cleared_once_tasks_are_launched() {
        let coord = coordinator("a:1", &["a:1", "127.0.0.1:1"]);

        let launched = coord.broadcast_write("k", "v", 10).await;

        assert_eq!(launched, 1);
        assert!(!coord.sync.lock().await.is_replicating());
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_swallowed() {
        let coord = coordinator("a:1", &["a:1", "127.0.0.1:1", "127.0.0.1:2"]);

        // Returns normally; failures end up in the log only
        assert_eq!(coord.broadcast_write("k", "v", 10).await, 2);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_peer_receives_encoded_write() {
        let (peer, mut rx) = spawn_recording_peer().await;
        let coord = coordinator("self:0", &["self:0", peer.as_str()]);

        coord.broadcast_write("a key", "x&y=z", 10).await;

        let params = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(params["key"], "a key");
        assert_eq!(params["value"], "x&y=z");
        assert_eq!(params["ttl"], "10");
    }

    fn write(key: &str, value: &str, ttl: &str) -> WriteParams {
        WriteParams {
            key: Some(key.to_string()),
            value: Some(value.to_string()),
            ttl: Some(ttl.to_string()),
        }
    }

    #[tokio::test]
    async fn test_replicated_write_is_not_rebroadcast() {
        let (peer, mut rx) = spawn_recording_peer().await;
        let node = CacheNode::new("self:0", vec!["self:0".to_string(), peer.clone()]);

        node.accept_replicated_write(write("a", "1", "10"))
            .await
            .unwrap();

        let received = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(received.is_err(), "peer got {:?}", received);
        assert!(!node.sync().lock().await.is_replicating());

        // The same peer does hear about client writes
        node.accept_client_write(write("b", "2", "10")).await.unwrap();
        let params = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(params["key"], "b");
    }
}
