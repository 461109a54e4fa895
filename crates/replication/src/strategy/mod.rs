//! Replication strategy abstractions.
//!
//! Replication strategies determine how many replicas to create and where
//! to place them on the ring:
//!
//! - **SimpleStrategy**: N replicas placed sequentially around the ring
//! - **NetworkTopologyStrategy**: per-datacenter quotas spread across racks

pub mod kind;
pub mod network_topology;
pub mod simple;

pub use kind::StrategyKind;
pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use crate::factor::ReplicationFactor;
use crate::ownership::ReplicaMap;
use crate::replica::ReplicaSet;
use corelib::{ClusterSnapshot, Partitioner, Token};

/// Trait for replication strategies.
///
/// A strategy is a pure function of its validated configuration and one
/// cluster snapshot. It holds no mutable state, so a single instance may be
/// shared by any number of threads.
pub trait ReplicationStrategy<T: Token>: Send + Sync {
    /// Ordered replicas for the range containing `search_token`.
    ///
    /// Never fails: a cluster with fewer nodes than requested yields fewer
    /// replicas, and an empty ring yields none.
    fn calculate_natural_replicas(
        &self,
        search_token: &T,
        snapshot: &ClusterSnapshot<T>,
    ) -> ReplicaSet<T>;

    /// Total replicas requested across the cluster.
    fn replication_factor(&self) -> ReplicationFactor;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Replicas for the range owning `key`.
    fn replicas_for_key(
        &self,
        partitioner: &dyn Partitioner<TokenType = T>,
        key: &[u8],
        snapshot: &ClusterSnapshot<T>,
    ) -> ReplicaSet<T> {
        self.calculate_natural_replicas(&partitioner.partition(key), snapshot)
    }

    /// Replicas of every primary range on the ring.
    fn replica_map(&self, snapshot: &ClusterSnapshot<T>) -> ReplicaMap<T> {
        ReplicaMap::new(
            snapshot.epoch(),
            snapshot
                .token_map()
                .ranges()
                .map(|range| {
                    let replicas = self.calculate_natural_replicas(&range.right, snapshot);
                    (range, replicas)
                })
                .collect(),
        )
    }

    /// Operator-facing warnings about this configuration against `snapshot`.
    ///
    /// Advisory only; placement proceeds regardless.
    fn warnings(&self, _snapshot: &ClusterSnapshot<T>) -> Vec<String> {
        Vec::new()
    }
}
