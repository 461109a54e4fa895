//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the primary).
//! This is the simplest replication strategy and works well for:
//!
//! - Small clusters
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! 1. Walk the ring from the search token, one step per distinct node
//! 2. Take the first `min(rf, nodes)` nodes (primary first)
//! 3. Replicas past the first `full` are transient
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement
//! - May place replicas on nodes in the same failure domain

use crate::error::{ConfigurationError, Result};
use crate::factor::ReplicationFactor;
use crate::replica::{Replica, ReplicaSet};
use crate::strategy::network_topology::REPLICATION_FACTOR;
use crate::strategy::ReplicationStrategy;
use corelib::{ClusterSnapshot, Token};
use std::cmp;

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use replication::{ReplicationFactor, SimpleStrategy};
///
/// let strategy = SimpleStrategy::new(ReplicationFactor::full(3));
/// assert_eq!(strategy.replication_factor_value(), ReplicationFactor::full(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: ReplicationFactor,
}

impl SimpleStrategy {
    pub fn new(replication_factor: ReplicationFactor) -> Self {
        Self { replication_factor }
    }

    /// Builds the strategy from `{"replication_factor": "N[/M]"}`.
    ///
    /// Any other option is ignored.
    pub fn from_options<K, V>(options: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let spec = options
            .into_iter()
            .find(|(key, _)| key.as_ref() == REPLICATION_FACTOR)
            .ok_or(ConfigurationError::MissingOption(REPLICATION_FACTOR))?;
        Ok(Self::new(spec.1.as_ref().parse()?))
    }

    pub fn replication_factor_value(&self) -> ReplicationFactor {
        self.replication_factor
    }
}

impl<T: Token> ReplicationStrategy<T> for SimpleStrategy {
    fn calculate_natural_replicas(
        &self,
        search_token: &T,
        snapshot: &ClusterSnapshot<T>,
    ) -> ReplicaSet<T> {
        let token_map = snapshot.token_map();
        let Some(range) = token_map.range_for(search_token) else {
            return ReplicaSet::new(); // Empty ring
        };

        let wanted = cmp::min(self.replication_factor.all(), token_map.node_count());
        let full = self.replication_factor.full_replicas();

        token_map
            .walk(search_token)
            .filter_map(|node_id| snapshot.directory().endpoint_of(node_id))
            .take(wanted)
            .enumerate()
            .map(|(idx, endpoint)| Replica::new(endpoint, range.clone(), idx >= full))
            .collect()
    }

    fn replication_factor(&self) -> ReplicationFactor {
        self.replication_factor
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
