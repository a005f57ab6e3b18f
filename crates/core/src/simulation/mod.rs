//! The forest fire automaton.
//!
//! [`ForestFireSimulation`] owns a fixed-size grid, a spread probability and an injected
//! random number generator. Each call to [`ForestFireSimulation::simulate_step`] advances
//! the whole grid by one generation:
//!
//! - every `Fire` cell becomes `Ash`;
//! - every burning cell makes one independent ignition attempt against each in-bounds
//!   neighbour (right, down, left, up) that was `Tree` at the start of the step.
//!
//! Attempts are made per (burning cell, neighbour) pair, so a tree next to `k` fires
//! ignites with probability `1 - (1 - p)^k`. All reads come from the start-of-step grid
//! and all writes go to a separate next grid, so the scan order never affects the result.

pub mod stats;

pub use stats::BurnStats;

use crate::config::SimulationConfig;
use crate::core_types::{CellState, Probability};
use crate::error::ForestFireError;
use crate::grid::{ForestGrid, GridCoord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

/// Grid automaton modelling fire spreading through a forest.
#[derive(Debug, Clone)]
pub struct ForestFireSimulation<R = StdRng> {
    grid: ForestGrid,
    propagation_probability: Probability,
    rng: R,
    generation: u64,
}

impl<R: Rng> ForestFireSimulation<R> {
    /// Create a simulation with an all-`Tree` grid and the given cells set on fire.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    /// * `propagation_probability` - Per-pair ignition chance in `[0, 1]`
    /// * `initial_fire` - Cells burning at generation 0, as `(row, col)`
    /// * `rng` - Source of the uniform samples drawn during stepping
    ///
    /// Duplicate ignitions are collapsed into one.
    ///
    /// # Errors
    ///
    /// - [`ForestFireError::InvalidDimension`] if `width` or `height` is zero
    /// - [`ForestFireError::InvalidProbability`] if the probability is outside `[0, 1]`
    /// - [`ForestFireError::OutOfBoundsIgnition`] if any ignition lies outside the grid
    pub fn new<I>(
        width: usize,
        height: usize,
        propagation_probability: f64,
        initial_fire: I,
        rng: R,
    ) -> Result<Self, ForestFireError>
    where
        I: IntoIterator,
        I::Item: Into<GridCoord>,
    {
        let mut grid = ForestGrid::new(width, height)?;
        let propagation_probability = Probability::new(propagation_probability)?;

        let mut ignited = FxHashSet::default();
        let mut duplicates = 0usize;
        for coord in initial_fire.into_iter().map(Into::into) {
            if !grid.set(coord, CellState::Fire) {
                return Err(ForestFireError::OutOfBoundsIgnition {
                    row: coord.row,
                    col: coord.col,
                    width,
                    height,
                });
            }
            if !ignited.insert(coord) {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!("Collapsed {} duplicate ignition(s)", duplicates);
        }

        info!(
            "Forest fire simulation initialized: {}x{} grid, p={}, {} ignition(s)",
            width,
            height,
            propagation_probability,
            ignited.len()
        );

        Ok(Self {
            grid,
            propagation_probability,
            rng,
            generation: 0,
        })
    }

    /// Advance the whole grid by one generation.
    ///
    /// Reads only the grid as it was when the call began; the new grid replaces it once it
    /// is complete, so no caller ever observes a half-updated state.
    pub fn simulate_step(&mut self) {
        let current = &self.grid;
        let mut next = current.clone();
        let mut burned_out = 0usize;
        let mut ignited = 0usize;

        for coord in current.coords_in(CellState::Fire) {
            next.set(coord, CellState::Ash);
            burned_out += 1;

            for neighbor in current.neighbors(coord) {
                if current.get(neighbor) != Some(CellState::Tree) {
                    continue;
                }
                if self.propagation_probability.admits(self.rng.random::<f64>()) {
                    if next.get(neighbor) == Some(CellState::Tree) {
                        ignited += 1;
                    }
                    next.set(neighbor, CellState::Fire);
                }
            }
        }

        self.grid = next;
        self.generation += 1;

        debug!(
            "Step {}: {} cell(s) burned out, {} ignited",
            self.generation, burned_out, ignited
        );
    }

    /// Step until no cell is burning or `max_steps` steps have run.
    ///
    /// Returns the number of steps taken.
    pub fn run_until_extinguished(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && self.has_fire() {
            self.simulate_step();
            steps += 1;
        }

        if self.has_fire() {
            debug!("Step limit {} reached with fire still burning", max_steps);
        } else {
            let stats = self.stats();
            info!(
                "Fire extinguished after {} step(s): {} ash, {} trees remaining",
                self.generation, stats.ash, stats.trees
            );
        }

        steps
    }
}

impl ForestFireSimulation<StdRng> {
    /// Build a simulation from a [`SimulationConfig`].
    ///
    /// Uses a `StdRng` seeded from `config.seed`, or from the operating system when no
    /// seed is set.
    ///
    /// # Errors
    ///
    /// Same as [`ForestFireSimulation::new`].
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ForestFireError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(
            config.width,
            config.height,
            config.propagation_probability,
            config.ignitions(),
            rng,
        )
    }

    /// Shorthand for [`ForestFireSimulation::new`] with `StdRng::seed_from_u64(seed)`.
    ///
    /// # Errors
    ///
    /// Same as [`ForestFireSimulation::new`].
    pub fn seeded<I>(
        width: usize,
        height: usize,
        propagation_probability: f64,
        initial_fire: I,
        seed: u64,
    ) -> Result<Self, ForestFireError>
    where
        I: IntoIterator,
        I::Item: Into<GridCoord>,
    {
        Self::new(
            width,
            height,
            propagation_probability,
            initial_fire,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R> ForestFireSimulation<R> {
    /// Whether any cell is currently burning.
    pub fn has_fire(&self) -> bool {
        self.grid.contains(CellState::Fire)
    }

    /// Owned copy of the current grid.
    ///
    /// Later steps do not affect the returned value, and it cannot be used to modify the
    /// simulation.
    pub fn forest_state(&self) -> ForestGrid {
        self.grid.clone()
    }

    /// Borrowed read-only view of the current grid.
    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    /// State of one cell, or `None` when `(row, col)` is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.grid.get(GridCoord::new(row, col))
    }

    pub fn stats(&self) -> BurnStats {
        BurnStats::from_grid(&self.grid, self.generation)
    }

    /// Number of completed steps
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn propagation_probability(&self) -> Probability {
        self.propagation_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Always yields zero, so every ignition attempt succeeds for any `p > 0`.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn seeded_sim(
        width: usize,
        height: usize,
        p: f64,
        fire: &[(usize, usize)],
    ) -> ForestFireSimulation {
        ForestFireSimulation::seeded(width, height, p, fire.iter().copied(), 42).unwrap()
    }

    #[test]
    fn test_construction_sets_initial_fire() {
        let sim = seeded_sim(4, 3, 0.5, &[(0, 0), (2, 3)]);
        assert_eq!(sim.width(), 4);
        assert_eq!(sim.height(), 3);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.cell(0, 0), Some(CellState::Fire));
        assert_eq!(sim.cell(2, 3), Some(CellState::Fire));
        assert_eq!(sim.cell(1, 1), Some(CellState::Tree));
        assert_eq!(sim.stats().burning, 2);
        assert!(sim.has_fire());
    }

    #[test]
    fn test_no_ignitions_means_no_fire() {
        let sim = seeded_sim(3, 3, 1.0, &[]);
        assert!(!sim.has_fire());
        assert_eq!(sim.stats().trees, 9);
    }

    #[test]
    fn test_invalid_dimension() {
        let err = ForestFireSimulation::seeded(0, 5, 0.5, [(0, 0)], 1).unwrap_err();
        assert_eq!(
            err,
            ForestFireError::InvalidDimension {
                width: 0,
                height: 5
            }
        );
        let no_fire: [(usize, usize); 0] = [];
        assert!(ForestFireSimulation::seeded(5, 0, 0.5, no_fire, 1).is_err());
    }

    #[test]
    fn test_invalid_probability() {
        for p in [-0.1, 1.1, f64::NAN] {
            let result = ForestFireSimulation::seeded(3, 3, p, [(1, 1)], 1);
            assert!(matches!(
                result,
                Err(ForestFireError::InvalidProbability(_))
            ));
        }
    }

    #[test]
    fn test_out_of_bounds_ignition() {
        // Row 3 is outside a 3-row grid even though column 3 exists on a 5-column one
        let err = ForestFireSimulation::seeded(5, 3, 0.5, [(1, 1), (3, 0)], 1).unwrap_err();
        assert_eq!(
            err,
            ForestFireError::OutOfBoundsIgnition {
                row: 3,
                col: 0,
                width: 5,
                height: 3
            }
        );
    }

    #[test]
    fn test_duplicate_ignitions_collapse() {
        let sim = seeded_sim(3, 3, 0.0, &[(1, 1), (1, 1), (0, 2)]);
        assert_eq!(sim.stats().burning, 2);
    }

    #[test]
    fn test_fire_becomes_ash_after_one_step() {
        let mut sim = seeded_sim(3, 3, 0.0, &[(1, 1)]);
        sim.simulate_step();
        assert_eq!(sim.cell(1, 1), Some(CellState::Ash));
        assert!(!sim.has_fire());
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_center_ignition_p1() {
        let mut sim = seeded_sim(3, 3, 1.0, &[(1, 1)]);

        sim.simulate_step();
        assert_eq!(
            sim.grid().render_ascii(),
            "TFT\n\
             FAF\n\
             TFT\n"
        );

        sim.simulate_step();
        assert_eq!(
            sim.grid().render_ascii(),
            "FAF\n\
             AAA\n\
             FAF\n"
        );

        sim.simulate_step();
        assert_eq!(sim.stats().ash, 9);
        assert!(!sim.has_fire());
    }

    #[test]
    fn test_ash_does_not_reignite() {
        let mut sim = seeded_sim(3, 1, 1.0, &[(0, 0)]);
        sim.simulate_step();
        // (0,0) Ash, (0,1) Fire
        sim.simulate_step();
        assert_eq!(sim.grid().render_ascii(), "AAF\n");
    }

    #[test]
    fn test_forest_state_is_a_copy() {
        let mut sim = seeded_sim(2, 2, 1.0, &[(0, 0)]);
        let before = sim.forest_state();
        sim.simulate_step();
        assert_eq!(before.get(GridCoord::new(0, 0)), Some(CellState::Fire));
        assert_eq!(sim.cell(0, 0), Some(CellState::Ash));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let sim = seeded_sim(2, 2, 0.5, &[]);
        assert_eq!(sim.cell(2, 0), None);
        assert_eq!(sim.cell(0, 2), None);
    }

    #[test]
    fn test_burning_neighbors_are_not_reignited() {
        let mut sim = ForestFireSimulation::new(3, 1, 0.5, [(0, 0), (0, 1)], ZeroRng).unwrap();
        sim.simulate_step();
        assert_eq!(sim.grid().render_ascii(), "AAF\n");
    }

    #[test]
    fn test_run_until_extinguished() {
        let mut sim = seeded_sim(5, 1, 1.0, &[(0, 0)]);
        let steps = sim.run_until_extinguished(100);
        assert_eq!(steps, 5);
        assert_eq!(sim.stats().ash, 5);

        let mut sim = seeded_sim(5, 1, 1.0, &[(0, 0)]);
        assert_eq!(sim.run_until_extinguished(2), 2);
        assert!(sim.has_fire());
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig::new(4, 2, 1.0)
            .with_ignition(1, 3)
            .with_seed(5);
        let sim = ForestFireSimulation::from_config(&config).unwrap();
        assert_eq!(sim.cell(1, 3), Some(CellState::Fire));
        assert_eq!(*sim.propagation_probability(), 1.0);
    }
}
