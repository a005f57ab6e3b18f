//! Per-state cell counts.

use crate::core_types::CellState;
use crate::grid::ForestGrid;
use serde::{Deserialize, Serialize};

/// Snapshot of how many cells are in each state.
///
/// `trees + burning + ash` always equals the grid's cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BurnStats {
    /// Cells still `Tree`
    pub trees: usize,
    /// Cells currently `Fire`
    pub burning: usize,
    /// Cells burnt out to `Ash`
    pub ash: usize,
    /// Completed steps when the snapshot was taken
    pub generation: u64,
}

impl BurnStats {
    /// Count every cell of `grid` in a single pass.
    pub fn from_grid(grid: &ForestGrid, generation: u64) -> Self {
        let mut stats = Self {
            generation,
            ..Self::default()
        };
        for &cell in grid.cells() {
            match cell {
                CellState::Tree => stats.trees += 1,
                CellState::Fire => stats.burning += 1,
                CellState::Ash => stats.ash += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.trees + self.burning + self.ash
    }

    /// Share of the grid that has burnt out, `ash / total`.
    pub fn burned_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.ash as f64 / total as f64,
        }
    }
}
