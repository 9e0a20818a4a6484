//! Error types.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Number of state variables a model accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedLen {
    Exactly(usize),
    AtLeast(usize),
}

impl ExpectedLen {
    /// Returns `true` if a state of `len` variables satisfies the requirement.
    pub fn admits(self, len: usize) -> bool {
        match self {
            ExpectedLen::Exactly(n) => len == n,
            ExpectedLen::AtLeast(n) => len >= n,
        }
    }
}

impl fmt::Display for ExpectedLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedLen::Exactly(n) => write!(f, "exactly {}", n),
            ExpectedLen::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The state has the wrong number of variables for the model.
    #[error("invalid dimension for {model}: expected {expected} state variables, found {found}")]
    InvalidDimension {
        model: &'static str,
        expected: ExpectedLen,
        found: usize,
    },
    /// An ensemble member does not have the same length as the others.
    #[error("ensemble member {member} has {found} variables, expected {expected}")]
    MemberLength {
        member: usize,
        expected: usize,
        found: usize,
    },
    /// Flat column-major data does not hold `n * m` values.
    #[error("expected {n}x{m} ensemble data, found {found} values")]
    DataLength { n: usize, m: usize, found: usize },
    /// Output or scratch storage could not be allocated.
    #[error("failed to allocate storage for {len} values")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    /// A `rows x cols` buffer has more elements than `usize` can count.
    #[error("{rows}x{cols} storage overflows usize")]
    SizeOverflow { rows: usize, cols: usize },
}

/// Allocates a zeroed buffer of `rows * cols` values, reporting exhaustion as
/// an error instead of aborting.
pub(crate) fn try_zeroed_vec(rows: usize, cols: usize) -> Result<Vec<f64>, Error> {
    let len = rows
        .checked_mul(cols)
        .ok_or(Error::SizeOverflow { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|source| Error::Allocation { len, source })?;
    data.resize(len, 0.);
    Ok(data)
}
