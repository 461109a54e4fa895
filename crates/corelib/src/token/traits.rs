//! Core token trait definitions.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A position on the token ring.
///
/// Tokens are immutable, totally ordered values. The ring is the token space
/// closed onto itself: walking past the greatest token continues at
/// [`Token::minimum`]. Implementations must be thread-safe and cheap to
/// compare and hash, since placement compares tokens on every ring step.
pub trait Token: Clone + Ord + Hash + Send + Sync + Debug + Display + 'static {
    /// The origin of the ring. No token sorts below it.
    fn minimum() -> Self;

    /// The smallest token strictly greater than `self`.
    ///
    /// Fixed-size token spaces wrap to [`Token::minimum`] at their maximum.
    fn successor(&self) -> Self;

    /// True if this token is the ring origin.
    fn is_minimum(&self) -> bool {
        *self == Self::minimum()
    }
}
