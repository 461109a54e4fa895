//! Half-open token ranges.

use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of the ring, `(left, right]`: left exclusive, right inclusive.
///
/// A range whose left bound is not below its right bound wraps around the
/// ring origin. `left == right` is the degenerate full-ring range, which is
/// what a single-token ring owns.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Range<T> {
    pub left: T,
    pub right: T,
}

impl<T: Token> Range<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// The range covering every token on the ring.
    pub fn full() -> Self {
        Self::new(T::minimum(), T::minimum())
    }

    pub fn is_full(&self) -> bool {
        self.left == self.right
    }

    /// True if the range crosses the ring origin (full ranges included).
    pub fn is_wrap_around(&self) -> bool {
        self.left >= self.right
    }

    pub fn contains(&self, token: &T) -> bool {
        if self.is_full() {
            return true;
        }
        if self.is_wrap_around() {
            *token > self.left || *token <= self.right
        } else {
            *token > self.left && *token <= self.right
        }
    }

    /// Splits a wrap-around range at the ring origin.
    ///
    /// Ranges ending exactly at the origin are already contiguous and are
    /// returned as-is.
    pub fn split_at_origin(&self) -> Vec<Range<T>> {
        if !self.is_wrap_around() || self.right.is_minimum() {
            return vec![self.clone()];
        }
        vec![
            Range::new(self.left.clone(), T::minimum()),
            Range::new(T::minimum(), self.right.clone()),
        ]
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{}]", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::LongToken;

    fn range(l: i64, r: i64) -> Range<LongToken> {
        Range::new(LongToken(l), LongToken(r))
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = range(100, 200);
        assert!(!r.contains(&LongToken(100)));
        assert!(r.contains(&LongToken(101)));
        assert!(r.contains(&LongToken(200)));
        assert!(!r.contains(&LongToken(201)));
    }

    #[test]
    fn test_wrap_around() {
        let r = range(400, 100);
        assert!(r.is_wrap_around());
        assert!(r.contains(&LongToken(401)));
        assert!(r.contains(&LongToken(i64::MIN)));
        assert!(r.contains(&LongToken(99)));
        assert!(r.contains(&LongToken(100)));
        assert!(!r.contains(&LongToken(250)));
    }

    #[test]
    fn test_full_range() {
        let r = range(7, 7);
        assert!(r.is_full());
        for t in [i64::MIN, -1, 7, 8, i64::MAX] {
            assert!(r.contains(&LongToken(t)));
        }
        assert!(Range::<LongToken>::full().is_full());
    }

    #[test]
    fn test_split_at_origin() {
        assert_eq!(range(1, 5).split_at_origin(), vec![range(1, 5)]);
        assert_eq!(
            range(400, 100).split_at_origin(),
            vec![range(400, i64::MIN), range(i64::MIN, 100)]
        );
        assert_eq!(range(400, i64::MIN).split_at_origin(), vec![range(400, i64::MIN)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(range(400, 100).to_string(), "(400,100]");
    }
}
