//! Shared fixtures for the replication integration tests.
//!
//! Besides snapshot builders this module carries a reference placement:
//! an independent per-datacenter computation that accepts a bounded number
//! of rack repeats instead of deferring same-rack nodes. Both approaches
//! must choose the same endpoints for every datacenter.

#![allow(dead_code)]

use corelib::{ClusterSnapshot, Endpoint, Location, Node, NodeId, Token};
use replication::{NetworkTopologyStrategy, ReplicaSet};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::net::Ipv4Addr;

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

/// Node `id` in `dc`/`rack`, addressed 10.x.y.z from the id's low bytes.
pub fn node(id: u128, dc: &str, rack: &str) -> Node {
    Node::new(
        NodeId(id),
        Endpoint::from_ip(Ipv4Addr::new(
            10,
            (id >> 16) as u8,
            (id >> 8) as u8,
            id as u8,
        )),
        Location::new(dc, rack),
    )
}

/// Distinct owners in ring order from the ceiling of `search`.
///
/// Scans the token list directly so it does not share code with the walk.
pub fn ring_successors<T: Token>(snapshot: &ClusterSnapshot<T>, search: &T) -> Vec<NodeId> {
    let entries = snapshot.token_map().entries();
    if entries.is_empty() {
        return Vec::new();
    }
    let start = entries.iter().position(|(t, _)| t >= search).unwrap_or(0);
    let mut seen = HashSet::new();
    (0..entries.len())
        .map(|i| entries[(start + i) % entries.len()].1)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Reference placement: endpoints chosen per datacenter, in acceptance order.
///
/// A datacenter with `need` replicas and `racks` racks may reuse a rack
/// `need - racks` times; every node on a fresh rack is accepted and the
/// earliest repeats fill the remaining slots.
pub fn reference_placement<T: Token>(
    strategy: &NetworkTopologyStrategy,
    snapshot: &ClusterSnapshot<T>,
    search: &T,
) -> BTreeMap<String, Vec<Endpoint>> {
    let directory = snapshot.directory();
    let walk = ring_successors(snapshot, search);
    let mut result = BTreeMap::new();

    for (dc, rf) in strategy.datacenters() {
        let need = rf.all().min(directory.endpoints_in_datacenter(dc).len());
        let mut repeats = need.saturating_sub(directory.rack_count(dc));
        let mut racks = HashSet::new();
        let mut chosen = Vec::new();

        for node in walk.iter().filter_map(|id| directory.node(*id)) {
            if chosen.len() == need {
                break;
            }
            if node.datacenter() != dc {
                continue;
            }
            if racks.insert(node.rack().to_owned()) {
                chosen.push(node.endpoint);
            } else if repeats > 0 {
                repeats -= 1;
                chosen.push(node.endpoint);
            }
        }
        result.insert(dc.to_owned(), chosen);
    }
    result
}

/// Endpoints of `replicas` per datacenter.
pub fn endpoints_by_datacenter<T: Token>(
    replicas: &ReplicaSet<T>,
    snapshot: &ClusterSnapshot<T>,
) -> BTreeMap<String, BTreeSet<Endpoint>> {
    replicas
        .group_by_datacenter(snapshot.directory())
        .into_iter()
        .map(|(dc, list)| (dc.to_owned(), list.iter().map(|r| r.endpoint()).collect()))
        .collect()
}

/// Asserts that `replicas` picks the same endpoints per datacenter as the
/// reference placement, and the same primary.
pub fn assert_matches_reference<T: Token>(
    strategy: &NetworkTopologyStrategy,
    snapshot: &ClusterSnapshot<T>,
    search: &T,
    replicas: &ReplicaSet<T>,
) {
    let expected = reference_placement(strategy, snapshot, search);
    let actual = endpoints_by_datacenter(replicas, snapshot);

    for (dc, chosen) in &expected {
        let chosen: BTreeSet<Endpoint> = chosen.iter().copied().collect();
        let placed = actual.get(dc).cloned().unwrap_or_default();
        assert_eq!(placed, chosen, "datacenter {dc} differs for token {search}");
    }
    assert_eq!(
        actual.values().map(BTreeSet::len).sum::<usize>(),
        replicas.len(),
        "replicas outside configured datacenters for token {search}"
    );

    let primary = ring_successors(snapshot, search)
        .into_iter()
        .filter_map(|id| snapshot.directory().node(id))
        .find(|node| expected.get(node.datacenter()).is_some_and(|c| !c.is_empty()))
        .map(|node| node.endpoint);
    assert_eq!(
        replicas.primary().map(|r| r.endpoint()),
        primary,
        "primary differs for token {search}"
    );
}
