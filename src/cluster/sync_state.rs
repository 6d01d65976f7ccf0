//! Sync State Module
//!
//! Per-node bookkeeping consulted by the read path: which node last wrote
//! each key, and whether this node is currently launching a broadcast.

use std::collections::HashMap;

// == Sync State ==
/// Last-writer map plus the node-wide replication flag.
///
/// Both fields are always read and written under the same lock.
#[derive(Debug, Default)]
pub struct SyncState {
    /// Key -> address of the node that last accepted a write for it
    last_writers: HashMap<String, String>,
    /// True only while a broadcast is spawning its peer tasks
    replicating: bool,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    // == Writer Tracking ==
    /// Records `node` as the last writer of `key`.
    pub fn record_writer(&mut self, key: &str, node: &str) {
        self.last_writers.insert(key.to_string(), node.to_string());
    }

    /// Returns the last writer recorded for `key`, if any.
    ///
    /// Records never expire, so this can name a writer whose data is gone.
    pub fn last_writer(&self, key: &str) -> Option<&str> {
        self.last_writers.get(key).map(String::as_str)
    }

    // == Replication Flag ==
    pub fn begin_broadcast(&mut self) {
        self.replicating = true;
    }

    /// Clears the flag. Called once the peer tasks are spawned, not when
    /// they finish.
    pub fn finish_broadcast(&mut self) {
        self.replicating = false;
    }

    pub fn is_replicating(&self) -> bool {
        self.replicating
    }

    // == Redirect Decision ==
    /// Returns the peer a read of `key` should be forwarded to.
    ///
    /// Fires only while the replication flag is set and another node is
    /// recorded as the last writer.
    pub fn redirect_target(&self, key: &str, self_addr: &str) -> Option<String> {
        if !self.replicating {
            return None;
        }
        self.last_writer(key)
            .filter(|writer| *writer != self_addr)
            .map(str::to_string)
    }
}
