//! The closed set of replication strategies, selected from options.
//!
//! Options carry a `class` entry naming the strategy, the way keyspace
//! replication settings do; everything else is handed to the selected
//! strategy's parser.

use crate::error::{ConfigurationError, Result};
use crate::factor::ReplicationFactor;
use crate::replica::ReplicaSet;
use crate::strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy};
use corelib::{ClusterSnapshot, Token};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Option naming the strategy.
pub const CLASS: &str = "class";

/// A replication strategy resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyKind {
    Simple(SimpleStrategy),
    NetworkTopology(NetworkTopologyStrategy),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Text(String),
    Count(u64),
}

#[derive(Deserialize)]
struct RawOptions {
    class: String,
    #[serde(flatten)]
    options: BTreeMap<String, OptionValue>,
}

impl StrategyKind {
    /// Resolves the strategy named by the `class` option.
    pub fn from_options<K, V>(options: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut class = None;
        let mut rest: Vec<(String, String)> = Vec::new();
        for (key, value) in options {
            if key.as_ref() == CLASS {
                class = Some(value.as_ref().to_owned());
            } else {
                rest.push((key.as_ref().to_owned(), value.as_ref().to_owned()));
            }
        }
        let class = class.ok_or(ConfigurationError::MissingOption(CLASS))?;

        match class.as_str() {
            "SimpleStrategy" => Ok(Self::Simple(SimpleStrategy::from_options(rest)?)),
            "NetworkTopologyStrategy" => {
                Ok(Self::NetworkTopology(NetworkTopologyStrategy::new(rest)?))
            }
            _ => Err(ConfigurationError::UnknownStrategy(class.clone())),
        }
    }

    /// Resolves a strategy from a JSON object such as
    /// `{"class": "NetworkTopologyStrategy", "dc1": 3, "dc2": "2/1"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawOptions = serde_json::from_str(json)?;
        let options = raw.options.into_iter().map(|(key, value)| {
            let value = match value {
                OptionValue::Text(text) => text,
                OptionValue::Count(count) => count.to_string(),
            };
            (key, value)
        });
        Self::from_options(std::iter::once((CLASS.to_owned(), raw.class)).chain(options))
    }

    fn as_strategy<T: Token>(&self) -> &dyn ReplicationStrategy<T> {
        match self {
            Self::Simple(s) => s,
            Self::NetworkTopology(s) => s,
        }
    }
}

impl<T: Token> ReplicationStrategy<T> for StrategyKind {
    fn calculate_natural_replicas(
        &self,
        search_token: &T,
        snapshot: &ClusterSnapshot<T>,
    ) -> ReplicaSet<T> {
        self.as_strategy()
            .calculate_natural_replicas(search_token, snapshot)
    }

    fn replication_factor(&self) -> ReplicationFactor {
        self.as_strategy::<T>().replication_factor()
    }

    fn name(&self) -> &'static str {
        self.as_strategy::<T>().name()
    }

    fn warnings(&self, snapshot: &ClusterSnapshot<T>) -> Vec<String> {
        self.as_strategy().warnings(snapshot)
    }
}
