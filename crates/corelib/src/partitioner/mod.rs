//! Partitioner abstraction.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the ring.

pub mod byte_ordered;
pub mod hash;
pub mod traits;

pub use byte_ordered::ByteOrderedPartitioner;
pub use hash::HashPartitioner;
pub use traits::Partitioner;
