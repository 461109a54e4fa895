//! Replication strategies.
//!
//! This crate decides which nodes hold copies of a token's data:
//! - How many replicas each datacenter gets, full and transient
//! - Which nodes receive them, spread across racks
//! - In which order, primary first
//!
//! Placement is a pure computation over one `corelib::ClusterSnapshot`.

pub mod error;
pub mod factor;
pub mod ownership;
pub mod replica;
pub mod strategy;

pub use error::{ConfigurationError, Result};
pub use factor::ReplicationFactor;
pub use ownership::ReplicaMap;
pub use replica::{Replica, ReplicaSet};
pub use strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy, StrategyKind};
