//! Per-cell state of the forest grid.
//!
//! Each grid position holds exactly one [`CellState`]. The only legal transitions are
//! `Tree → Fire` (probabilistic, triggered by a burning neighbour), `Fire → Ash`
//! (unconditional, after one step) and `Ash → Ash` (terminal).

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single forest cell.
///
/// The discriminants are stable and double as the tag written across the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Unburnt fuel
    #[default]
    Tree = 0,
    /// Burning this step, becomes [`CellState::Ash`] on the next one
    Fire = 1,
    /// Burnt out (terminal)
    Ash = 2,
}

impl CellState {
    /// Single-character tag: `T`, `F` or `A`.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            CellState::Tree => 'T',
            CellState::Fire => 'F',
            CellState::Ash => 'A',
        }
    }

    /// Numeric tag used in row-major byte buffers.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
