use core::fmt::{Display, Formatter, Result};

use crate::schedule::types::TransactionId;

#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The conflict graph has a cycle through the edge `a -> b`, so no
    /// serial order respects every conflict.
    Cycle { a: TransactionId, b: TransactionId },
    /// Conflict equivalence of two schedules is not decided.
    UnsupportedEquivalence,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Cycle { a, b } => write!(
                f,
                "conflict graph is cyclic: t{a} -> t{b} lies on a cycle"
            ),
            Self::UnsupportedEquivalence => {
                write!(f, "conflict equivalence is not supported")
            }
        }
    }
}

impl core::error::Error for Error {}
