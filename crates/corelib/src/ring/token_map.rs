//! Token ownership map.
//!
//! The map is the sorted ring of `(token, owner)` bindings for one topology
//! version. It is built once and never mutated; a topology change produces a
//! new map.

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::ring::range::Range;
use crate::ring::walk::RingWalk;
use crate::token::Token;
use std::collections::{BTreeSet, HashSet};

/// Sorted sequence of distinct tokens, each owned by exactly one node.
///
/// A node may own any number of tokens (virtual nodes).
#[derive(Debug, Clone)]
pub struct TokenMap<T> {
    ring: Vec<(T, NodeId)>,
    node_count: usize,
}

impl<T> Default for TokenMap<T> {
    fn default() -> Self {
        Self {
            ring: Vec::new(),
            node_count: 0,
        }
    }
}

impl<T: Token> TokenMap<T> {
    /// An empty ring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the map from unordered bindings.
    ///
    /// Fails if two bindings share a token.
    pub fn new(bindings: impl IntoIterator<Item = (T, NodeId)>) -> Result<Self> {
        let mut ring: Vec<(T, NodeId)> = bindings.into_iter().collect();
        ring.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some(pair) = ring.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(Error::RingOperation(format!(
                "token {} is claimed by both {} and {}",
                pair[0].0, pair[0].1, pair[1].1
            )));
        }

        let node_count = ring.iter().map(|(_, n)| *n).collect::<HashSet<_>>().len();
        Ok(Self { ring, node_count })
    }

    /// Tokens in ascending order.
    pub fn ordered_tokens(&self) -> impl Iterator<Item = &T> + '_ {
        self.ring.iter().map(|(t, _)| t)
    }

    /// All bindings in ascending token order.
    pub fn entries(&self) -> &[(T, NodeId)] {
        &self.ring
    }

    /// Owner of exactly `token`, if some node holds it.
    pub fn owner_of(&self, token: &T) -> Option<NodeId> {
        self.ring
            .binary_search_by(|(t, _)| t.cmp(token))
            .ok()
            .map(|idx| self.ring[idx].1)
    }

    /// Index of the first token `>= token`, wrapping to the start of the ring.
    ///
    /// `None` only for an empty ring.
    pub fn first_token_index(&self, token: &T) -> Option<usize> {
        if self.ring.is_empty() {
            return None;
        }
        let idx = self.ring.partition_point(|(t, _)| t < token);
        Some(if idx == self.ring.len() { 0 } else { idx })
    }

    /// The ring token owning `token`: the first token `>= token`, wrapping.
    pub fn first_token(&self, token: &T) -> Option<&T> {
        self.first_token_index(token).map(|idx| &self.ring[idx].0)
    }

    /// The token preceding the owning token of `token` on the ring.
    pub fn predecessor(&self, token: &T) -> Option<&T> {
        let idx = self.first_token_index(token)?;
        let len = self.ring.len();
        Some(&self.ring[(idx + len - 1) % len].0)
    }

    /// The primary range containing `token`: `(predecessor, first_token]`.
    pub fn range_for(&self, token: &T) -> Option<Range<T>> {
        let right = self.first_token(token)?.clone();
        let left = self.predecessor(token)?.clone();
        Some(Range::new(left, right))
    }

    /// Every primary range on the ring, ordered by right bound.
    pub fn ranges(&self) -> impl Iterator<Item = Range<T>> + '_ {
        let len = self.ring.len();
        (0..len).map(move |idx| {
            Range::new(
                self.ring[(idx + len - 1) % len].0.clone(),
                self.ring[idx].0.clone(),
            )
        })
    }

    /// Tokens owned by `node`, ascending.
    pub fn tokens_of(&self, node: NodeId) -> Vec<&T> {
        self.ring
            .iter()
            .filter(|(_, owner)| *owner == node)
            .map(|(t, _)| t)
            .collect()
    }

    /// Distinct owners.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.ring.iter().map(|(_, n)| *n).collect()
    }

    /// Number of distinct owning nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn token_count(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Walks distinct owners in ring order starting at the owner of `token`.
    pub fn walk(&self, token: &T) -> RingWalk<'_, T> {
        let start = self.first_token_index(token).unwrap_or(0);
        RingWalk::new(&self.ring, start, self.node_count)
    }
}
