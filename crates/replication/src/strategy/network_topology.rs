//! Datacenter- and rack-aware replication strategy.
//!
//! Every configured datacenter receives its own replica quota. Within a
//! datacenter, replicas go to distinct racks first; nodes on an already used
//! rack are remembered and only placed once every rack of the datacenter
//! holds a replica.
//!
//! # Algorithm
//!
//! 1. Per datacenter, the quota is `min(full + transient, known endpoints)`
//! 2. Walk the ring from the search token, visiting each node once
//! 3. Skip nodes of unconfigured or already satisfied datacenters
//! 4. Place nodes on new racks; put nodes on seen racks aside
//! 5. When the last rack of a datacenter is seen, place the nodes put aside
//!    (in walk order) until the quota is met; from then on ignore racks
//! 6. Stop when every datacenter is satisfied or the ring is exhausted
//!
//! Replicas keep the order they were placed in, interleaved across
//! datacenters. Within a datacenter, replicas past the first `full` are
//! transient.
//!
//! # Performance
//!
//! - **Time**: O(t) in the worst case, t = tokens on the ring; typically the
//!   walk stops after a few nodes per datacenter
//! - **Space**: O(n) for the walk's visited set, n = nodes

use crate::error::{ConfigurationError, Result};
use crate::factor::ReplicationFactor;
use crate::replica::{Replica, ReplicaSet};
use crate::strategy::ReplicationStrategy;
use corelib::{ClusterSnapshot, Endpoint, Range, Token};
use std::cmp;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Flat replication factor key, rejected by this strategy.
pub const REPLICATION_FACTOR: &str = "replication_factor";

/// Replication strategy with a replica quota per datacenter.
///
/// # Example
///
/// ```rust
/// use replication::NetworkTopologyStrategy;
///
/// let strategy = NetworkTopologyStrategy::new([("dc1", "3"), ("dc2", "2/1")]).unwrap();
/// assert_eq!(strategy.replication_factor_for("dc2").all(), 3);
/// assert!(NetworkTopologyStrategy::new([("replication_factor", "3")]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopologyStrategy {
    datacenters: BTreeMap<String, ReplicationFactor>,
    aggregate: ReplicationFactor,
}

impl NetworkTopologyStrategy {
    /// Parses `datacenter -> "full[/transient]"` options.
    ///
    /// Datacenters without known nodes are accepted; they simply receive no
    /// replicas until nodes join them.
    pub fn new<K, V>(options: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut datacenters = BTreeMap::new();
        for (datacenter, spec) in options {
            let datacenter = datacenter.as_ref();
            if datacenter == REPLICATION_FACTOR {
                return Err(ConfigurationError::LegacyReplicationFactor(REPLICATION_FACTOR));
            }
            let rf: ReplicationFactor = spec.as_ref().parse()?;
            datacenters.insert(datacenter.to_owned(), rf);
        }

        let aggregate = datacenters.values().copied().sum();
        debug!(?datacenters, "Created NetworkTopologyStrategy");
        Ok(Self {
            datacenters,
            aggregate,
        })
    }

    /// Quota of `datacenter`; zero when it is not configured.
    pub fn replication_factor_for(&self, datacenter: &str) -> ReplicationFactor {
        self.datacenters
            .get(datacenter)
            .copied()
            .unwrap_or(ReplicationFactor::ZERO)
    }

    /// Configured datacenters and their quotas, sorted by name.
    pub fn datacenters(&self) -> impl Iterator<Item = (&str, ReplicationFactor)> + '_ {
        self.datacenters.iter().map(|(dc, rf)| (dc.as_str(), *rf))
    }
}

/// Placement progress of one datacenter during a single computation.
struct DatacenterPlacement<'a> {
    rf: ReplicationFactor,
    need: usize,
    placed: usize,
    rack_count: usize,
    seen_racks: HashSet<&'a str>,
    skipped: Vec<Endpoint>,
}

impl<'a> DatacenterPlacement<'a> {
    fn new(rf: ReplicationFactor, known_endpoints: usize, rack_count: usize) -> Self {
        Self {
            rf,
            need: cmp::min(rf.all(), known_endpoints),
            placed: 0,
            rack_count,
            seen_racks: HashSet::with_capacity(rack_count),
            skipped: Vec::new(),
        }
    }

    fn is_done(&self) -> bool {
        self.placed >= self.need
    }

    fn racks_exhausted(&self) -> bool {
        self.seen_racks.len() >= self.rack_count
    }

    /// Considers one walked endpoint of this datacenter.
    fn offer<T: Token>(
        &mut self,
        endpoint: Endpoint,
        rack: &'a str,
        range: &Range<T>,
        replicas: &mut ReplicaSet<T>,
    ) {
        if self.racks_exhausted() {
            self.place(endpoint, range, replicas);
        } else if self.seen_racks.insert(rack) {
            self.place(endpoint, range, replicas);
            if self.racks_exhausted() {
                for skipped in std::mem::take(&mut self.skipped) {
                    if self.is_done() {
                        break;
                    }
                    self.place(skipped, range, replicas);
                }
            }
        } else {
            self.skipped.push(endpoint);
        }
    }

    fn place<T: Token>(&mut self, endpoint: Endpoint, range: &Range<T>, replicas: &mut ReplicaSet<T>) {
        let transient = self.placed >= self.rf.full_replicas();
        if replicas.push(Replica::new(endpoint, range.clone(), transient)) {
            self.placed += 1;
        }
    }
}

impl<T: Token> ReplicationStrategy<T> for NetworkTopologyStrategy {
    fn calculate_natural_replicas(
        &self,
        search_token: &T,
        snapshot: &ClusterSnapshot<T>,
    ) -> ReplicaSet<T> {
        let token_map = snapshot.token_map();
        let directory = snapshot.directory();

        let Some(range) = token_map.range_for(search_token) else {
            return ReplicaSet::new();
        };

        let mut placements: HashMap<&str, DatacenterPlacement<'_>> = self
            .datacenters
            .iter()
            .map(|(dc, rf)| {
                let placement = DatacenterPlacement::new(
                    *rf,
                    directory.endpoints_in_datacenter(dc).len(),
                    directory.rack_count(dc),
                );
                (dc.as_str(), placement)
            })
            .collect();
        let mut pending = placements.values().filter(|p| !p.is_done()).count();
        let mut replicas =
            ReplicaSet::with_capacity(placements.values().map(|p| p.need).sum());

        let mut walk = token_map.walk(search_token);
        while pending > 0 {
            let Some(node_id) = walk.next() else {
                break;
            };
            let Some(node) = directory.node(node_id) else {
                continue;
            };
            let Some(placement) = placements.get_mut(node.datacenter()) else {
                continue;
            };
            if placement.is_done() {
                continue;
            }

            placement.offer(node.endpoint, node.rack(), &range, &mut replicas);
            if placement.is_done() {
                pending -= 1;
            }
        }

        trace!(
            token = %search_token,
            epoch = snapshot.epoch().0,
            replicas = replicas.len(),
            visited = walk.tokens_visited(),
            "Calculated natural replicas"
        );
        replicas
    }

    fn replication_factor(&self) -> ReplicationFactor {
        self.aggregate
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }

    fn warnings(&self, snapshot: &ClusterSnapshot<T>) -> Vec<String> {
        let directory = snapshot.directory();
        let mut warnings = Vec::new();

        for (dc, rf) in &self.datacenters {
            let nodes = directory.endpoints_in_datacenter(dc).len();
            if nodes == 0 && rf.all() > 0 {
                warnings.push(format!(
                    "Datacenter {dc} is not known to the cluster and will receive no replicas"
                ));
            }
            if rf.all() > nodes {
                warnings.push(format!(
                    "Your replication factor {} for datacenter {dc} is higher than the number of nodes {nodes}",
                    rf.all()
                ));
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        warnings
    }
}
