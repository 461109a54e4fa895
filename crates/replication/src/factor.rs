//! Replication factor: how many full and transient copies to keep.

use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Replica quota of one datacenter (or of a whole strategy).
///
/// Written as `"N"` for `N` full replicas or `"N/M"` for `N` full plus `M`
/// transient replicas. Transient replicas always come last in placement
/// order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReplicationFactor {
    full: usize,
    transient: usize,
}

impl ReplicationFactor {
    pub const ZERO: ReplicationFactor = ReplicationFactor {
        full: 0,
        transient: 0,
    };

    /// `full` full replicas, no transient ones.
    pub const fn full(full: usize) -> Self {
        Self { full, transient: 0 }
    }

    pub fn with_transient(full: usize, transient: usize) -> Result<Self> {
        if full == 0 && transient > 0 {
            return Err(ConfigurationError::TransientWithoutFull(format!(
                "{full}/{transient}"
            )));
        }
        Ok(Self { full, transient })
    }

    /// Total replica quota, full and transient.
    pub const fn all(&self) -> usize {
        self.full + self.transient
    }

    pub const fn full_replicas(&self) -> usize {
        self.full
    }

    pub const fn transient_replicas(&self) -> usize {
        self.transient
    }

    pub const fn has_transient(&self) -> bool {
        self.transient > 0
    }
}

impl std::ops::Add for ReplicationFactor {
    type Output = ReplicationFactor;

    fn add(self, rhs: Self) -> Self {
        Self {
            full: self.full + rhs.full,
            transient: self.transient + rhs.transient,
        }
    }
}

impl std::iter::Sum for ReplicationFactor {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, rf| acc + rf)
    }
}

fn parse_count(spec: &str, part: &str) -> Result<usize> {
    part.trim()
        .parse::<usize>()
        .map_err(|e| ConfigurationError::MalformedReplicationFactor {
            spec: spec.to_owned(),
            reason: e.to_string(),
        })
}

impl FromStr for ReplicationFactor {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            None => Ok(Self::full(parse_count(s, s)?)),
            Some((full, transient)) => {
                Self::with_transient(parse_count(s, full)?, parse_count(s, transient)?)
            }
        }
    }
}

impl TryFrom<String> for ReplicationFactor {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ReplicationFactor> for String {
    fn from(rf: ReplicationFactor) -> String {
        rf.to_string()
    }
}

impl fmt::Display for ReplicationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.transient == 0 {
            write!(f, "{}", self.full)
        } else {
            write!(f, "{}/{}", self.full, self.transient)
        }
    }
}
