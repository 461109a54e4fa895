//! Hashing partitioner producing `LongToken`s.

use crate::partitioner::traits::Partitioner;
use crate::token::LongToken;
use xxhash_rust::xxh3::xxh3_64;

/// Spreads keys uniformly over the `i64` token space using xxh3.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashPartitioner;

impl Partitioner for HashPartitioner {
    type TokenType = LongToken;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        LongToken(xxh3_64(key) as i64)
    }

    fn name(&self) -> &'static str {
        "HashPartitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_partition_is_deterministic() {
        let p = HashPartitioner;
        assert_eq!(p.partition(b"key"), p.partition(b"key"));
        assert_ne!(p.partition(b"key"), p.partition(b"other-key"));
        assert_eq!(p.min_token(), LongToken::minimum());
    }
}
