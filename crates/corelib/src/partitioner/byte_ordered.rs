//! Byte-ordered partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::ByteOrderedToken;

/// Order-preserving partitioner: the key bytes are the token.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteOrderedPartitioner;

impl Partitioner for ByteOrderedPartitioner {
    type TokenType = ByteOrderedToken;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        ByteOrderedToken::from_bytes(key)
    }

    fn name(&self) -> &'static str {
        "ByteOrderedPartitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_partition_preserves_key_order() {
        let p = ByteOrderedPartitioner;
        assert_eq!(p.partition(b"123"), ByteOrderedToken::from_key("123"));
        assert!(p.partition(b"123") < p.partition(b"234"));
        assert!(p.partition(b"12") < p.partition(b"123"));
        assert_eq!(p.min_token(), ByteOrderedToken::minimum());
    }
}
