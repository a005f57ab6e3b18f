//! Validated scalar types.
//!
//! Newtype wrappers keep range checks at the construction boundary so the step loop can
//! trust its inputs.
//!
//! # Usage
//! ```
//! use forest_fire_core::core_types::units::Probability;
//!
//! let p = Probability::new(0.35).unwrap();
//! assert_eq!(*p, 0.35);
//! assert!(Probability::new(1.5).is_err());
//! ```

use crate::error::ForestFireError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Probability in the closed range `[0, 1]`.
///
/// Used for the per-(burning cell, neighbour) ignition chance. NaN and infinities are
/// rejected, so the inner value is always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Eq for Probability {}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Probability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Probability {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Probability {
    /// Never happens
    pub const NEVER: Probability = Probability(0.0);

    /// Always happens
    pub const ALWAYS: Probability = Probability(1.0);

    /// Create a probability, rejecting values outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ForestFireError::InvalidProbability`] when `value` is NaN, infinite or
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, ForestFireError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Probability(value))
        } else {
            Err(ForestFireError::InvalidProbability(value))
        }
    }

    /// Bernoulli trial against a uniform sample in `[0, 1)`.
    ///
    /// A sample strictly below the probability counts as a success, so
    /// [`Probability::NEVER`] never succeeds and [`Probability::ALWAYS`] always does.
    #[inline]
    #[must_use]
    pub fn admits(self, sample: f64) -> bool {
        sample < self.0
    }

    /// Chance that at least one of `attempts` independent trials succeeds: `1 - (1 - p)^k`.
    #[must_use]
    pub fn at_least_once(self, attempts: u32) -> Probability {
        let miss = (1.0 - self.0).powi(i32::try_from(attempts).unwrap_or(i32::MAX));
        Probability((1.0 - miss).clamp(0.0, 1.0))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ForestFireError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Probability::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}
