//! Virtual node abstractions.
//!
//! Each physical node owns several tokens (virtual nodes) instead of one.
//! More tokens give a smoother key distribution and spread the load of a
//! joining or leaving node over the whole ring, at the price of a larger
//! token map.
//!
//! Placement treats a node's vnodes as one replica candidate: the ring walk
//! emits a node the first time any of its tokens is reached.

use crate::node::NodeId;
use crate::partitioner::Partitioner;
use crate::token::Token;

/// A single token position owned by a physical node.
///
/// # Invariants
///
/// - Within one token map no two vnodes share a token
/// - Every vnode belongs to exactly one physical node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<T> {
    /// Token position on the ring.
    pub token: T,

    /// The physical node that owns this virtual node.
    pub node_id: NodeId,
}

impl<T: Token> VirtualNode<T> {
    #[inline]
    pub fn new(token: T, node_id: NodeId) -> Self {
        Self { token, node_id }
    }

    /// Derives the token of vnode `vnode_index` of `node_id`.
    ///
    /// The token is the partition of `"node_id:vnode_index"`, so the same
    /// node always receives the same tokens.
    pub fn from_index<P>(partitioner: &P, node_id: NodeId, vnode_index: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let vnode_key = format!("{}:{}", node_id, vnode_index);
        Self::new(partitioner.partition(vnode_key.as_bytes()), node_id)
    }

    /// Unbounded sequence of vnodes for `node_id`, indices 0, 1, 2, ...
    pub fn sequence<'p, P>(partitioner: &'p P, node_id: NodeId) -> impl Iterator<Item = Self> + 'p
    where
        P: Partitioner<TokenType = T>,
    {
        (0..).map(move |idx| Self::from_index(partitioner, node_id, idx))
    }

    /// Get the token position.
    #[inline]
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Get the owning node ID.
    #[inline]
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

impl<T: std::fmt::Display> std::fmt::Display for VirtualNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node_id)
    }
}
