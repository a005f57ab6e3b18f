//! Forest Fire Simulation Core Library
//!
//! A discrete-time probabilistic cellular automaton modelling wildfire spread on a 2-D grid.
//! Every cell is `Tree`, `Fire` or `Ash`. Each step, burning cells burn out to ash and try to
//! ignite their four orthogonal neighbours with a fixed propagation probability.
//!
//! The kernel owns grid state and the transition rule only. Rendering, configuration files and
//! the decision of how often to step belong to the caller:
//!
//! ```
//! use forest_fire_core::{CellState, ForestFireSimulation};
//!
//! let mut sim = ForestFireSimulation::seeded(3, 3, 1.0, [(1, 1)], 7).unwrap();
//! while sim.has_fire() {
//!     sim.simulate_step();
//! }
//! assert_eq!(sim.stats().ash, 9);
//! assert_eq!(sim.cell(0, 0), Some(CellState::Ash));
//! ```

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{CellState, Probability};

pub use config::SimulationConfig;
pub use error::ForestFireError;
pub use grid::{Direction, ForestGrid, GridCoord};
pub use simulation::{BurnStats, ForestFireSimulation};
