//! Core types and utilities

pub mod cell;
pub mod units;

pub use cell::CellState;
pub use units::Probability;
