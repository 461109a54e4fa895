//! Core library for topology-aware replica placement.
//!
//! This crate provides the topology model placement runs against:
//! - Token types and partitioners
//! - Ranges, the token map and the ring walk
//! - Node identity, endpoints and datacenter/rack locations
//! - The directory of cluster members
//! - Immutable, versioned cluster snapshots and their publication handle

pub mod directory;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod snapshot;
pub mod token;
pub mod topology;
pub mod vnode;

pub use directory::Directory;
pub use error::{Error, Result};
pub use node::{Endpoint, Location, Node, NodeId};
pub use partitioner::Partitioner;
pub use ring::{Range, RingWalk, TokenMap};
pub use snapshot::{ClusterSnapshot, Epoch, SnapshotBuilder};
pub use token::Token;
pub use topology::TopologyHandle;
pub use vnode::VirtualNode;
