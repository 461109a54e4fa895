//! Cluster directory: who the nodes are, where they live, how to reach them.
//!
//! The directory is built by the membership subsystem and is read-only to
//! placement. It precomputes the per-datacenter endpoint sets and rack
//! groupings so that placement can check quotas and rack exhaustion without
//! scanning the membership.

use crate::error::{Error, Result};
use crate::node::{Endpoint, Location, Node, NodeId};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap};

static EMPTY_ENDPOINTS: BTreeSet<Endpoint> = BTreeSet::new();
static EMPTY_RACKS: BTreeMap<String, BTreeSet<Endpoint>> = BTreeMap::new();

/// Immutable mapping between node ids, endpoints and locations.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    nodes: BTreeMap<NodeId, Node>,
    peers: HashMap<Endpoint, NodeId>,
    datacenter_endpoints: BTreeMap<String, BTreeSet<Endpoint>>,
    datacenter_racks: BTreeMap<String, BTreeMap<String, BTreeSet<Endpoint>>>,
}

impl Directory {
    /// Builds a directory from registered nodes.
    ///
    /// Fails if two nodes share an id or an endpoint.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut by_id: BTreeMap<NodeId, Node> = BTreeMap::new();
        let mut peers: HashMap<Endpoint, NodeId> = HashMap::new();

        for node in nodes {
            if let Some(existing) = peers.get(&node.endpoint) {
                return Err(Error::InvalidNode(format!(
                    "endpoint {} is registered to both {} and {}",
                    node.endpoint, existing, node.id
                )));
            }
            if by_id.contains_key(&node.id) {
                return Err(Error::InvalidNode(format!(
                    "node {} is registered twice",
                    node.id
                )));
            }
            peers.insert(node.endpoint, node.id);
            by_id.insert(node.id, node);
        }

        let datacenter_endpoints: BTreeMap<String, BTreeSet<Endpoint>> = by_id
            .values()
            .map(|n| (n.location.datacenter.clone(), n.endpoint))
            .into_group_map()
            .into_iter()
            .map(|(dc, endpoints)| (dc, endpoints.into_iter().collect()))
            .collect();

        let mut datacenter_racks: BTreeMap<String, BTreeMap<String, BTreeSet<Endpoint>>> =
            BTreeMap::new();
        for ((dc, rack), endpoints) in by_id
            .values()
            .map(|n| ((n.location.datacenter.clone(), n.location.rack.clone()), n.endpoint))
            .into_group_map()
        {
            datacenter_racks
                .entry(dc)
                .or_default()
                .insert(rack, endpoints.into_iter().collect());
        }

        Ok(Self {
            nodes: by_id,
            peers,
            datacenter_endpoints,
            datacenter_racks,
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn endpoint_of(&self, id: NodeId) -> Option<Endpoint> {
        self.nodes.get(&id).map(|n| n.endpoint)
    }

    /// Node registered at `endpoint`.
    pub fn peer_id(&self, endpoint: &Endpoint) -> Option<NodeId> {
        self.peers.get(endpoint).copied()
    }

    pub fn location_of(&self, id: NodeId) -> Option<&Location> {
        self.nodes.get(&id).map(|n| &n.location)
    }

    /// Location of the node registered at `endpoint`.
    pub fn location_of_endpoint(&self, endpoint: &Endpoint) -> Option<&Location> {
        self.peer_id(endpoint).and_then(|id| self.location_of(id))
    }

    /// Known datacenter names, sorted.
    pub fn datacenters(&self) -> impl Iterator<Item = &str> + '_ {
        self.datacenter_endpoints.keys().map(String::as_str)
    }

    /// Every endpoint in `datacenter`; empty for an unknown datacenter.
    pub fn endpoints_in_datacenter(&self, datacenter: &str) -> &BTreeSet<Endpoint> {
        self.datacenter_endpoints
            .get(datacenter)
            .unwrap_or(&EMPTY_ENDPOINTS)
    }

    /// Endpoints of `datacenter` grouped by rack; empty for an unknown datacenter.
    pub fn racks_in_datacenter(&self, datacenter: &str) -> &BTreeMap<String, BTreeSet<Endpoint>> {
        self.datacenter_racks
            .get(datacenter)
            .unwrap_or(&EMPTY_RACKS)
    }

    pub fn rack_count(&self, datacenter: &str) -> usize {
        self.racks_in_datacenter(datacenter).len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
