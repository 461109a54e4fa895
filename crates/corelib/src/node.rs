//! Node identity, network endpoints and failure-domain locations.
//!
//! Nodes are identified by a compact `NodeId` that is cheap to compare and
//! hash. The `Endpoint` is where the node can be reached, and the `Location`
//! places it in the datacenter/rack failure-domain hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Compact identifier for a node in the cluster.
///
/// Newtype over `u128` so comparisons and hashing are very fast while giving
/// plenty of space for uniqueness.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u128);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Network address a node is reachable at.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(pub SocketAddr);

impl Endpoint {
    /// Default inter-node port.
    pub const DEFAULT_PORT: u16 = 7000;

    pub fn new(ip: impl Into<IpAddr>, port: u16) -> Self {
        Endpoint(SocketAddr::new(ip.into(), port))
    }

    /// Endpoint at `ip` on the default port.
    pub fn from_ip(ip: impl Into<IpAddr>) -> Self {
        Self::new(ip, Self::DEFAULT_PORT)
    }

    pub fn addr(&self) -> SocketAddr {
        self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Endpoint(addr)
    }
}

/// Position of a node in the datacenter/rack hierarchy.
///
/// Two locations are equal iff both the datacenter and the rack match.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    pub datacenter: String,
    pub rack: String,
}

impl Location {
    pub fn new(datacenter: impl Into<String>, rack: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.datacenter, self.rack)
    }
}

/// A registered cluster member.
///
/// Keep this struct small and cheap to clone; connections and health state
/// live with the membership subsystem, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub endpoint: Endpoint,
    pub location: Location,
}

impl Node {
    pub fn new(id: NodeId, endpoint: Endpoint, location: Location) -> Self {
        Self {
            id,
            endpoint,
            location,
        }
    }

    pub fn datacenter(&self) -> &str {
        &self.location.datacenter
    }

    pub fn rack(&self) -> &str {
        &self.location.rack
    }
}
