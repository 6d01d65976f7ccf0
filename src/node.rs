//! Cache Node
//!
//! Composes the store, the sync state and the replication coordinator into
//! the three operations a node serves: client writes, replicated writes and
//! reads.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::api::GET_PATH;
use crate::cache::CacheStore;
use crate::cluster::{ReplicationCoordinator, SyncState};
use crate::error::{CacheError, Result};
use crate::models::{set_confirmation, ReadParams, ValidatedWrite, WriteParams};

// == Read Outcome ==
/// What a read resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// Served from this node's store
    Local(String),
    /// Relayed unchanged from the peer the read was forwarded to
    Relayed {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
}

impl IntoResponse for ReadOutcome {
    fn into_response(self) -> Response {
        match self {
            ReadOutcome::Local(value) => Json(value).into_response(),
            ReadOutcome::Relayed {
                status,
                content_type,
                body,
            } => {
                let mut response = (status, Body::from(body)).into_response();
                if let Some(content_type) = content_type {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, content_type);
                }
                response
            }
        }
    }
}

// == Cache Node ==
/// One member of the cache cluster.
#[derive(Debug)]
pub struct CacheNode {
    /// Address this node is reachable at, as it appears in the node list
    address: String,
    /// Node-local TTL store
    store: Arc<RwLock<CacheStore>>,
    /// Last writers and the replication flag
    sync: Arc<Mutex<SyncState>>,
    /// Write fan-out to peers
    replicator: ReplicationCoordinator,
    /// Outbound client for forwarded reads
    client: reqwest::Client,
}

impl CacheNode {
    // == Constructor ==
    /// Creates a node with an empty store on the system clock.
    ///
    /// # Arguments
    /// * `address` - This node's own address
    /// * `nodes` - Every node in the cluster, this one included
    pub fn new(address: impl Into<String>, nodes: Vec<String>) -> Self {
        Self::with_store(address, nodes, CacheStore::new())
    }

    /// Creates a node around an existing store.
    pub fn with_store(address: impl Into<String>, nodes: Vec<String>, store: CacheStore) -> Self {
        let address = address.into();
        let client = reqwest::Client::new();
        let sync = Arc::new(Mutex::new(SyncState::new()));
        let replicator =
            ReplicationCoordinator::new(address.clone(), nodes, client.clone(), sync.clone());

        Self {
            address,
            store: Arc::new(RwLock::new(store)),
            sync,
            replicator,
            client,
        }
    }

    /// Address this node answers to in the node list.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Node-local TTL store.
    pub fn store(&self) -> &Arc<RwLock<CacheStore>> {
        &self.store
    }

    /// Last-writer map and replication flag.
    pub fn sync(&self) -> &Arc<Mutex<SyncState>> {
        &self.sync
    }

    /// Coordinator that fans client writes out to peers.
    pub fn replicator(&self) -> &ReplicationCoordinator {
        &self.replicator
    }

    // == Client Write ==
    /// Applies a client write locally, then broadcasts it to every peer.
    ///
    /// Returns once the peer tasks are spawned; the confirmation says nothing
    /// about whether peers have the value yet.
    pub async fn accept_client_write(&self, params: WriteParams) -> Result<String> {
        let write = params.validate()?;
        self.apply(&write).await;

        let launched = self
            .replicator
            .broadcast_write(&write.key, &write.value, write.ttl)
            .await;
        debug!("Key {} set locally, replicating to {} peers", write.key, launched);

        Ok(set_confirmation(&write.key))
    }

    // == Replicated Write ==
    /// Applies a write pushed by a peer. Not broadcast any further.
    ///
    /// The receiving node records itself as last writer, not the origin.
    pub async fn accept_replicated_write(&self, params: WriteParams) -> Result<()> {
        let write = params.validate()?;
        self.apply(&write).await;

        info!("Received sync: Cache entry set for key: {}", write.key);
        Ok(())
    }

    async fn apply(&self, write: &ValidatedWrite) {
        self.store
            .write()
            .await
            .set(write.key.clone(), write.value.clone(), write.ttl);
        self.sync
            .lock()
            .await
            .record_writer(&write.key, &self.address);
    }

    // == Read ==
    /// Serves a read, forwarding it once to the last writer while a
    /// broadcast is flagged as in flight.
    ///
    /// A forwarded read never falls back to the local copy.
    pub async fn serve_read(&self, params: ReadParams) -> Result<ReadOutcome> {
        let key = params.validate()?;

        let target = self.sync.lock().await.redirect_target(&key, &self.address);
        if let Some(peer) = target {
            return self.forward_read(&peer, &key).await;
        }

        self.store
            .read()
            .await
            .get(&key)
            .map(ReadOutcome::Local)
            .ok_or_else(CacheError::key_not_found)
    }

    async fn forward_read(&self, peer: &str, key: &str) -> Result<ReadOutcome> {
        debug!("Redirecting read of key {} to {}", key, peer);

        match fetch_from_peer(&self.client, peer, key).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!("Redirected read of key {} failed: {}", key, e);
                Err(CacheError::key_not_found())
            }
        }
    }
}

/// Reads `key` from `peer`. Anything other than 200 OK is an error.
async fn fetch_from_peer(client: &reqwest::Client, peer: &str, key: &str) -> Result<ReadOutcome> {
    let url = format!("http://{}{}", peer, GET_PATH);
    let response = client
        .get(&url)
        .query(&[("key", key)])
        .send()
        .await
        .map_err(|e| CacheError::PeerUnreachable(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(CacheError::PeerUnreachable(format!(
            "{} answered {}",
            peer, status
        )));
    }

    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let body = response
        .bytes()
        .await
        .map_err(|e| CacheError::PeerUnreachable(e.to_string()))?;

    Ok(ReadOutcome::Relayed {
        status,
        content_type,
        body,
    })
}
