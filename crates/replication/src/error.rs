//! Configuration errors raised while building a replication strategy.

use thiserror::Error;

/// Result type alias for strategy construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Reasons a replication configuration is rejected.
///
/// These are raised only while parsing options; placement itself never
/// fails.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The flat `replication_factor` key was given to a per-datacenter strategy.
    #[error("{0} should not appear as an option to NetworkTopologyStrategy")]
    LegacyReplicationFactor(&'static str),

    #[error("invalid replication factor {spec:?}: {reason}")]
    MalformedReplicationFactor { spec: String, reason: String },

    #[error("replication factor {0:?} has transient replicas but no full replicas")]
    TransientWithoutFull(String),

    #[error("unknown replication strategy class {0:?}")]
    UnknownStrategy(String),

    #[error("missing required option {0:?}")]
    MissingOption(&'static str),

    #[error("invalid replication options: {0}")]
    Json(#[from] serde_json::Error),
}
