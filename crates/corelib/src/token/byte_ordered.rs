//! Byte-ordered token implementation.

use crate::token::traits::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order-preserving token: the raw key bytes, compared lexicographically.
///
/// The empty byte string is the ring origin, which makes the token space
/// unbounded above; the successor appends a zero byte.
#[derive(
    Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ByteOrderedToken(pub Vec<u8>);

impl Token for ByteOrderedToken {
    fn minimum() -> Self {
        ByteOrderedToken(Vec::new())
    }

    fn successor(&self) -> Self {
        let mut bytes = self.0.clone();
        bytes.push(0);
        ByteOrderedToken(bytes)
    }
}

impl ByteOrderedToken {
    /// Creates a token directly from bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ByteOrderedToken(bytes.into())
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        ByteOrderedToken(key.as_bytes().to_vec())
    }
}

impl fmt::Display for ByteOrderedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => {
                for b in &self.0 {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}
