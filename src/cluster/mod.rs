//! Cluster Module
//!
//! Node-to-node concerns: last-writer bookkeeping, the replication flag and
//! the fire-and-forget write broadcast.

mod replication;
mod sync_state;

pub use replication::ReplicationCoordinator;
pub use sync_state::SyncState;
