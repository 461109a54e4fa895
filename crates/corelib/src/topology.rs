//! Published topology.
//!
//! [`TopologyHandle`] holds the latest published [`ClusterSnapshot`]. It is
//! created at node startup and passed by reference to whoever needs
//! placement; there is no global instance. Readers take an `Arc` to the
//! current snapshot and compute against it for as long as they need, even
//! if a newer snapshot is published meanwhile. A superseded snapshot is
//! released when its last reader drops it.

use crate::error::Result;
use crate::snapshot::{ClusterSnapshot, Epoch, SnapshotBuilder};
use crate::token::Token;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Atomically replaceable reference to the current cluster snapshot.
pub struct TopologyHandle<T> {
    current: ArcSwap<ClusterSnapshot<T>>,
    // Serializes publishers so epochs stay strictly increasing.
    publish_lock: Mutex<()>,
}

impl<T: Token> TopologyHandle<T> {
    /// Handle publishing the empty snapshot.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(ClusterSnapshot::empty()),
            publish_lock: Mutex::new(()),
        }
    }

    /// The published snapshot. Never blocks.
    pub fn current(&self) -> Arc<ClusterSnapshot<T>> {
        self.current.load_full()
    }

    pub fn epoch(&self) -> Epoch {
        self.current.load().epoch()
    }

    /// Publishes `builder` as the next epoch, replacing the current snapshot.
    ///
    /// On validation failure nothing is published.
    pub fn publish(&self, builder: SnapshotBuilder<T>) -> Result<Arc<ClusterSnapshot<T>>> {
        let _guard = self.publish_lock.lock();
        let next = self.current.load().epoch().next();
        Ok(self.install(builder.build(next)?))
    }

    /// Derives the next epoch from the current snapshot and publishes it.
    pub fn update<F>(&self, change: F) -> Result<Arc<ClusterSnapshot<T>>>
    where
        F: FnOnce(SnapshotBuilder<T>) -> SnapshotBuilder<T>,
    {
        let _guard = self.publish_lock.lock();
        let base = self.current.load_full();
        let snapshot = change(base.to_builder()).build(base.epoch().next())?;
        Ok(self.install(snapshot))
    }

    fn install(&self, snapshot: ClusterSnapshot<T>) -> Arc<ClusterSnapshot<T>> {
        let snapshot = Arc::new(snapshot);
        debug!(
            epoch = snapshot.epoch().0,
            nodes = snapshot.directory().len(),
            tokens = snapshot.token_map().token_count(),
            "Publishing cluster snapshot"
        );
        self.current.store(Arc::clone(&snapshot));
        snapshot
    }
}

impl<T: Token> Default for TopologyHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> std::fmt::Debug for TopologyHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopologyHandle")
            .field("epoch", &self.epoch())
            .finish_non_exhaustive()
    }
}
