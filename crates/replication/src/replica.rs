//! Replicas and ordered replica sets.

use corelib::{Directory, Endpoint, Range, Token};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Index;

/// An ownership claim by one endpoint over one range.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Replica<T> {
    endpoint: Endpoint,
    range: Range<T>,
    transient: bool,
}

impl<T: Token> Replica<T> {
    pub fn new(endpoint: Endpoint, range: Range<T>, transient: bool) -> Self {
        Self {
            endpoint,
            range,
            transient,
        }
    }

    pub fn full(endpoint: Endpoint, range: Range<T>) -> Self {
        Self::new(endpoint, range, false)
    }

    pub fn transient(endpoint: Endpoint, range: Range<T>) -> Self {
        Self::new(endpoint, range, true)
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn range(&self) -> &Range<T> {
        &self.range
    }

    pub fn is_full(&self) -> bool {
        !self.transient
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }
}

impl<T: fmt::Display> fmt::Display for Replica<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.transient { "Transient" } else { "Full" };
        write!(f, "{}({},{})", kind, self.endpoint, self.range)
    }
}

/// Insertion-ordered collection of replicas with unique endpoints.
///
/// Order is placement priority: index 0 is the primary replica.
#[derive(Clone, Debug)]
pub struct ReplicaSet<T> {
    replicas: Vec<Replica<T>>,
    by_endpoint: HashMap<Endpoint, usize>,
}

impl<T> Default for ReplicaSet<T> {
    fn default() -> Self {
        Self {
            replicas: Vec::new(),
            by_endpoint: HashMap::new(),
        }
    }
}

impl<T: Token> ReplicaSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            replicas: Vec::with_capacity(capacity),
            by_endpoint: HashMap::with_capacity(capacity),
        }
    }

    /// Appends `replica` unless its endpoint is already present.
    ///
    /// Returns `false` if the replica was rejected as a duplicate.
    pub fn push(&mut self, replica: Replica<T>) -> bool {
        if self.by_endpoint.contains_key(&replica.endpoint) {
            return false;
        }
        self.by_endpoint.insert(replica.endpoint, self.replicas.len());
        self.replicas.push(replica);
        true
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replica<T>> {
        self.replicas.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Replica<T>> {
        self.replicas.get(index)
    }

    /// The first-placed replica.
    pub fn primary(&self) -> Option<&Replica<T>> {
        self.replicas.first()
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.by_endpoint.contains_key(endpoint)
    }

    pub fn by_endpoint(&self, endpoint: &Endpoint) -> Option<&Replica<T>> {
        self.by_endpoint.get(endpoint).map(|&idx| &self.replicas[idx])
    }

    /// Endpoints in placement order.
    pub fn endpoints(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.replicas.iter().map(|r| r.endpoint)
    }

    pub fn full(&self) -> impl Iterator<Item = &Replica<T>> + '_ {
        self.replicas.iter().filter(|r| r.is_full())
    }

    pub fn transient(&self) -> impl Iterator<Item = &Replica<T>> + '_ {
        self.replicas.iter().filter(|r| r.is_transient())
    }

    /// Replicas per datacenter, each list in placement order.
    ///
    /// Endpoints unknown to `directory` are left out.
    pub fn group_by_datacenter<'a>(
        &'a self,
        directory: &'a Directory,
    ) -> BTreeMap<&'a str, Vec<&'a Replica<T>>> {
        let mut groups: BTreeMap<&str, Vec<&Replica<T>>> = BTreeMap::new();
        for replica in &self.replicas {
            if let Some(location) = directory.location_of_endpoint(&replica.endpoint) {
                groups
                    .entry(location.datacenter.as_str())
                    .or_default()
                    .push(replica);
            }
        }
        groups
    }

    pub fn into_vec(self) -> Vec<Replica<T>> {
        self.replicas
    }
}

impl<T: PartialEq> PartialEq for ReplicaSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.replicas == other.replicas
    }
}

impl<T: Eq> Eq for ReplicaSet<T> {}

impl<T> Index<usize> for ReplicaSet<T> {
    type Output = Replica<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.replicas[index]
    }
}

impl<'a, T> IntoIterator for &'a ReplicaSet<T> {
    type Item = &'a Replica<T>;
    type IntoIter = std::slice::Iter<'a, Replica<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.replicas.iter()
    }
}

impl<T: Token> FromIterator<Replica<T>> for ReplicaSet<T> {
    fn from_iter<I: IntoIterator<Item = Replica<T>>>(iter: I) -> Self {
        let mut set = ReplicaSet::new();
        for replica in iter {
            set.push(replica);
        }
        set
    }
}

impl<T: fmt::Display> fmt::Display for ReplicaSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, replica) in self.replicas.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{replica}")?;
        }
        write!(f, "]")
    }
}
