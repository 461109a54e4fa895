//! Token abstraction module.
//!
//! Tokens are positions on the ring and must be totally ordered, hashable,
//! and thread-safe.

pub mod byte_ordered;
pub mod long;
pub mod traits;

pub use byte_ordered::ByteOrderedToken;
pub use long::LongToken;
pub use traits::Token;
