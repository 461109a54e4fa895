//! Replica placement of every range on the ring.
//!
//! Repair and streaming work per range rather than per token. A
//! [`ReplicaMap`] holds the replica set of each primary range of one
//! snapshot, so those callers can ask which ranges an endpoint replicates.

use crate::replica::{Replica, ReplicaSet};
use corelib::{Endpoint, Epoch, Range, Token};

/// Replica sets of all primary ranges of one snapshot, ordered by right bound.
#[derive(Debug, Clone)]
pub struct ReplicaMap<T> {
    epoch: Epoch,
    ranges: Vec<(Range<T>, ReplicaSet<T>)>,
}

impl<T: Token> ReplicaMap<T> {
    pub(crate) fn new(epoch: Epoch, ranges: Vec<(Range<T>, ReplicaSet<T>)>) -> Self {
        Self { epoch, ranges }
    }

    /// Epoch of the snapshot the map was computed from.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Replicas of the range containing `token`.
    pub fn for_token(&self, token: &T) -> Option<&ReplicaSet<T>> {
        if self.ranges.is_empty() {
            return None;
        }
        let idx = self.ranges.partition_point(|(range, _)| range.right < *token);
        let idx = if idx == self.ranges.len() { 0 } else { idx };
        Some(&self.ranges[idx].1)
    }

    /// Every range `endpoint` replicates, with its full/transient flag.
    pub fn ranges_for(&self, endpoint: &Endpoint) -> Vec<&Replica<T>> {
        self.ranges
            .iter()
            .filter_map(|(_, replicas)| replicas.by_endpoint(endpoint))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Range<T>, &ReplicaSet<T>)> + '_ {
        self.ranges.iter().map(|(range, replicas)| (range, replicas))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
