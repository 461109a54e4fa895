//! Versioned, immutable cluster snapshots.
//!
//! A snapshot pairs one token map with the directory of the same topology
//! version. Snapshots are assembled by a [`SnapshotBuilder`], published
//! through a [`TopologyHandle`](crate::topology::TopologyHandle), and never
//! mutated afterwards: a topology change always produces a new snapshot.

use crate::directory::Directory;
use crate::error::{Error, Result};
use crate::node::{Location, Node, NodeId};
use crate::partitioner::Partitioner;
use crate::ring::TokenMap;
use crate::token::Token;
use crate::vnode::VirtualNode;
use std::collections::HashSet;
use std::fmt;

/// Version of a published snapshot. Strictly increasing per topology handle.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Epoch(pub u64);

impl Epoch {
    /// Version of the empty snapshot a handle starts with.
    pub const EMPTY: Epoch = Epoch(0);

    pub fn next(self) -> Epoch {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch {}", self.0)
    }
}

/// One consistent view of the ring and the directory.
#[derive(Debug, Clone)]
pub struct ClusterSnapshot<T> {
    epoch: Epoch,
    token_map: TokenMap<T>,
    directory: Directory,
}

impl<T: Token> ClusterSnapshot<T> {
    /// Snapshot of a cluster with no members.
    pub fn empty() -> Self {
        Self {
            epoch: Epoch::EMPTY,
            token_map: TokenMap::empty(),
            directory: Directory::default(),
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn token_map(&self) -> &TokenMap<T> {
        &self.token_map
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Starts building the next topology version from this one.
    pub fn to_builder(&self) -> SnapshotBuilder<T> {
        let mut builder = SnapshotBuilder::new();
        builder.nodes = self.directory.nodes().cloned().collect();
        builder.tokens = self.token_map.entries().to_vec();
        builder
    }
}

/// A snapshot under construction, not yet visible to placement.
///
/// Mutations are recorded as-is; all validation happens in
/// [`SnapshotBuilder::build`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder<T> {
    nodes: Vec<Node>,
    tokens: Vec<(T, NodeId)>,
}

impl<T: Token> Default for SnapshotBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> SnapshotBuilder<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Registers `node` owning `tokens`.
    pub fn add_node(mut self, node: Node, tokens: impl IntoIterator<Item = T>) -> Self {
        let id = node.id;
        self.nodes.push(node);
        self.tokens.extend(tokens.into_iter().map(|t| (t, id)));
        self
    }

    /// Registers `node` with `count` vnode tokens derived from its id.
    ///
    /// Tokens already claimed by other nodes are skipped.
    pub fn add_node_with_vnodes<P>(self, partitioner: &P, node: Node, count: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let mut taken: HashSet<T> = self.tokens.iter().map(|(t, _)| t.clone()).collect();
        let tokens: Vec<T> = VirtualNode::sequence(partitioner, node.id)
            .map(|vnode| vnode.token)
            .filter(|token| taken.insert(token.clone()))
            .take(count)
            .collect();
        self.add_node(node, tokens)
    }

    /// Drops `id` and every token it owns.
    pub fn remove_node(mut self, id: NodeId) -> Self {
        self.nodes.retain(|n| n.id != id);
        self.tokens.retain(|(_, owner)| *owner != id);
        self
    }

    /// Replaces the tokens owned by `id`.
    pub fn move_node(mut self, id: NodeId, tokens: impl IntoIterator<Item = T>) -> Self {
        self.tokens.retain(|(_, owner)| *owner != id);
        self.tokens.extend(tokens.into_iter().map(|t| (t, id)));
        self
    }

    /// Reassigns the datacenter and rack of `id`.
    pub fn relocate(mut self, id: NodeId, location: Location) -> Self {
        for node in self.nodes.iter_mut().filter(|n| n.id == id) {
            node.location = location.clone();
        }
        self
    }

    /// Validates the recorded topology and freezes it as version `epoch`.
    ///
    /// Fails on duplicate tokens, duplicate node ids or endpoints, tokens
    /// owned by a node missing from the directory, and registered nodes
    /// owning no token.
    pub fn build(self, epoch: Epoch) -> Result<ClusterSnapshot<T>> {
        let token_map = TokenMap::new(self.tokens)?;
        let directory = Directory::new(self.nodes)?;
        let owners = token_map.nodes();

        if let Some(orphan) = owners.iter().find(|id| directory.node(**id).is_none()) {
            return Err(Error::Topology(format!(
                "node {} owns tokens but is not registered in the directory",
                orphan
            )));
        }

        // Quotas and rack counts come from the directory, so every member
        // must be reachable by the ring walk.
        if let Some(idle) = directory.nodes().find(|node| !owners.contains(&node.id)) {
            return Err(Error::Topology(format!(
                "node {} ({}) is registered but owns no tokens",
                idle.id, idle.endpoint
            )));
        }

        Ok(ClusterSnapshot {
            epoch,
            token_map,
            directory,
        })
    }
}
