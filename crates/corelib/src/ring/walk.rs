//! Ring walk: distinct owners in ascending token order.

use crate::node::NodeId;
use std::collections::HashSet;
use std::iter::FusedIterator;

/// Lazy traversal of the ring yielding each owning node once.
///
/// Starts at a given ring index, moves in ascending token order, wraps once,
/// and stops after every token was visited or every distinct node was
/// emitted, whichever comes first. A node reached again through another of
/// its tokens is not re-emitted.
///
/// Each walk owns its progress, so any number of walks may run over the same
/// map concurrently. Create a new walk to restart.
#[derive(Debug, Clone)]
pub struct RingWalk<'a, T> {
    ring: &'a [(T, NodeId)],
    start: usize,
    step: usize,
    seen: HashSet<NodeId>,
    remaining_nodes: usize,
}

impl<'a, T> RingWalk<'a, T> {
    pub(crate) fn new(ring: &'a [(T, NodeId)], start: usize, node_count: usize) -> Self {
        Self {
            ring,
            start,
            step: 0,
            seen: HashSet::with_capacity(node_count),
            remaining_nodes: node_count,
        }
    }

    /// Tokens visited so far, including those of already emitted nodes.
    pub fn tokens_visited(&self) -> usize {
        self.step
    }
}

impl<T> Iterator for RingWalk<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let len = self.ring.len();
        while self.remaining_nodes > 0 && self.step < len {
            let (_, node) = &self.ring[(self.start + self.step) % len];
            self.step += 1;
            if self.seen.insert(*node) {
                self.remaining_nodes -= 1;
                return Some(*node);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_nodes))
    }
}

impl<T> FusedIterator for RingWalk<'_, T> {}
