//! Grid storage and neighbourhood helpers

pub mod forest_grid;

// Re-export main types
pub use forest_grid::*;
