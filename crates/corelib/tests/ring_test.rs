//! Integration tests for the token map, ring walk and snapshot publication.
//!
//! # Test Strategy
//!
//! 1. **Ring walk**: ordering, wraparound, vnode deduplication
//! 2. **Snapshots**: building, publishing, superseding
//! 3. **Concurrency**: readers keep their snapshot while writers publish
//! 4. **Properties**: walk invariants over random rings

use corelib::partitioner::HashPartitioner;
use corelib::token::LongToken;
use corelib::{
    Endpoint, Epoch, Location, Node, NodeId, Partitioner, SnapshotBuilder, Token, TokenMap,
    TopologyHandle,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

fn node(id: u128, dc: &str, rack: &str) -> Node {
    Node::new(
        NodeId(id),
        Endpoint::from_ip(Ipv4Addr::new(10, 0, (id >> 8) as u8, id as u8)),
        Location::new(dc, rack),
    )
}

// ============================================================================
// Ring Walk Tests
// ============================================================================

#[test]
fn test_walk_on_vnode_ring_emits_every_node_once() {
    let mut builder = SnapshotBuilder::new();
    for id in 1..=5 {
        builder = builder.add_node_with_vnodes(&HashPartitioner, node(id, "dc1", "r1"), 16);
    }
    let snapshot = builder.build(Epoch(1)).unwrap();
    let map = snapshot.token_map();

    assert_eq!(map.token_count(), 80);
    assert_eq!(map.node_count(), 5);

    let search = HashPartitioner.partition(b"some-key");
    let walked: Vec<NodeId> = map.walk(&search).collect();
    assert_eq!(walked.len(), 5);
    assert_eq!(walked.iter().collect::<HashSet<_>>().len(), 5);

    // The first node owns the ceiling token of the search position.
    let first = map.first_token(&search).unwrap();
    assert_eq!(Some(walked[0]), map.owner_of(first));
}

#[test]
fn test_walk_from_exact_token_starts_at_its_owner() {
    let map = TokenMap::new(vec![
        (LongToken(100), NodeId(1)),
        (LongToken(200), NodeId(2)),
        (LongToken(300), NodeId(3)),
    ])
    .unwrap();

    assert_eq!(map.walk(&LongToken(200)).next(), Some(NodeId(2)));
    assert_eq!(map.walk(&LongToken(201)).next(), Some(NodeId(3)));
    assert_eq!(map.walk(&LongToken(301)).next(), Some(NodeId(1)));
    assert_eq!(map.walk(&LongToken::minimum()).next(), Some(NodeId(1)));
}

// ============================================================================
// Snapshot Publication Tests
// ============================================================================

#[test]
fn test_handle_starts_empty() {
    let handle: TopologyHandle<LongToken> = TopologyHandle::new();
    let snapshot = handle.current();
    assert_eq!(snapshot.epoch(), Epoch::EMPTY);
    assert!(snapshot.token_map().is_empty());
    assert!(snapshot.directory().is_empty());
}

#[test]
fn test_publish_advances_epoch() {
    setup_tracing();
    let handle = TopologyHandle::new();

    let first = handle
        .publish(SnapshotBuilder::new().add_node(node(1, "dc1", "r1"), [LongToken(10)]))
        .unwrap();
    assert_eq!(first.epoch(), Epoch(1));

    let second = handle
        .update(|b| b.add_node(node(2, "dc1", "r2"), [LongToken(20)]))
        .unwrap();
    assert_eq!(second.epoch(), Epoch(2));
    assert_eq!(handle.epoch(), Epoch(2));

    // The superseded snapshot is still intact for whoever holds it.
    assert_eq!(first.token_map().node_count(), 1);
    assert_eq!(handle.current().token_map().node_count(), 2);
}

#[test]
fn test_failed_publish_keeps_current_snapshot() {
    let handle = TopologyHandle::new();
    handle
        .publish(SnapshotBuilder::new().add_node(node(1, "dc1", "r1"), [LongToken(10)]))
        .unwrap();

    let result = handle.update(|b| b.add_node(node(2, "dc1", "r1"), [LongToken(10)]));
    assert!(result.is_err());
    assert_eq!(handle.epoch(), Epoch(1));
    assert_eq!(handle.current().directory().len(), 1);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_readers_see_whole_snapshots_while_writers_publish() {
    let handle = Arc::new(TopologyHandle::new());
    handle
        .publish(SnapshotBuilder::new().add_node(node(1, "dc1", "r1"), [LongToken(0)]))
        .unwrap();

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for id in 2..=50u128 {
                handle
                    .update(|b| b.add_node(node(id, "dc1", "r1"), [LongToken(id as i64 * 10)]))
                    .unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..200 {
                    let snapshot = handle.current();
                    // Epoch n always carries exactly n nodes.
                    assert_eq!(
                        snapshot.token_map().node_count() as u64,
                        snapshot.epoch().0
                    );
                    assert_eq!(snapshot.directory().len(), snapshot.token_map().node_count());
                }
            });
        }
    })
    .unwrap();

    assert_eq!(handle.epoch(), Epoch(50));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_walk_emits_distinct_nodes_in_ring_order(
        bindings in proptest::collection::btree_map(any::<i64>(), 1u128..8, 1..64),
        search in any::<i64>(),
    ) {
        let map = TokenMap::new(
            bindings.iter().map(|(t, n)| (LongToken(*t), NodeId(*n)))
        ).unwrap();
        let walked: Vec<NodeId> = map.walk(&LongToken(search)).collect();

        prop_assert_eq!(walked.len(), map.node_count());
        prop_assert_eq!(walked.iter().collect::<HashSet<_>>().len(), walked.len());

        // Reference: scan tokens from the ceiling, keep first sightings.
        let tokens: Vec<(LongToken, NodeId)> = map.entries().to_vec();
        let start = tokens.iter().position(|(t, _)| *t >= LongToken(search)).unwrap_or(0);
        let mut expected = Vec::new();
        for i in 0..tokens.len() {
            let owner = tokens[(start + i) % tokens.len()].1;
            if !expected.contains(&owner) {
                expected.push(owner);
            }
        }
        prop_assert_eq!(walked, expected);
    }
}
