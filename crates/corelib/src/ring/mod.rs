//! Token ring implementation.
//!
//! The ring binds tokens to owning nodes and provides the ordered walk that
//! replica placement is built on.

pub mod range;
pub mod token_map;
pub mod walk;

pub use range::Range;
pub use token_map::TokenMap;
pub use walk::RingWalk;
