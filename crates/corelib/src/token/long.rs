//! Signed 64-bit token, the default hashed token space.

use crate::error::{Error, Result};
use crate::token::traits::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token over the full `i64` range.
///
/// The ring starts at `i64::MIN`; the successor of `i64::MAX` wraps back to
/// the start.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LongToken(pub i64);

impl LongToken {
    /// Largest token value.
    pub const MAX: LongToken = LongToken(i64::MAX);

    #[inline]
    pub const fn new(value: i64) -> Self {
        LongToken(value)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl Token for LongToken {
    fn minimum() -> Self {
        LongToken(i64::MIN)
    }

    fn successor(&self) -> Self {
        LongToken(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LongToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LongToken {
    fn from(value: i64) -> Self {
        LongToken(value)
    }
}

impl FromStr for LongToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(LongToken)
            .map_err(|e| Error::InvalidToken(format!("{s:?}: {e}")))
    }
}
