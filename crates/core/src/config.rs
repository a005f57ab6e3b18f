//! Construction parameters for a forest fire simulation.
//!
//! The kernel itself never reads files; callers deserialize a [`SimulationConfig`] from
//! whatever format they use (the headless demo reads JSON) and hand it to
//! [`ForestFireSimulation::from_config`](crate::ForestFireSimulation::from_config).
//!
//! ```json
//! {
//!   "width": 40,
//!   "height": 20,
//!   "propagation_probability": 0.55,
//!   "initial_fire": [[10, 20]],
//!   "seed": 7
//! }
//! ```

use crate::grid::GridCoord;
use serde::{Deserialize, Serialize};

/// Everything needed to build a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of columns
    pub width: usize,

    /// Number of rows
    pub height: usize,

    /// Chance that one burning cell ignites one adjacent tree in one step, `[0, 1]`
    pub propagation_probability: f64,

    /// Cells burning at generation 0, each written as `[row, col]`
    #[serde(default)]
    pub initial_fire: Vec<(usize, usize)>,

    /// RNG seed; `None` draws a seed from the operating system
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Config with no ignitions and no fixed seed.
    pub fn new(width: usize, height: usize, propagation_probability: f64) -> Self {
        Self {
            width,
            height,
            propagation_probability,
            initial_fire: Vec::new(),
            seed: None,
        }
    }

    /// Add an ignition at `(row, col)`.
    pub fn with_ignition(mut self, row: usize, col: usize) -> Self {
        self.initial_fire.push((row, col));
        self
    }

    /// Fix the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Ignition list as typed coordinates.
    pub fn ignitions(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.initial_fire.iter().copied().map(GridCoord::from)
    }

    /// Centre cell of the configured grid, `(height / 2, width / 2)`.
    pub fn center(&self) -> GridCoord {
        GridCoord::new(self.height / 2, self.width / 2)
    }
}
