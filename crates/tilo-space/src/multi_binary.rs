//! Fixed-length vector of binary flags.

use crate::error::SpaceError;
use crate::space::Space;
use rand::{Rng, RngCore};
use smallvec::smallvec;
use tilo_core::Shape;

/// `n` independent flags, each `0.0` or `1.0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiBinary {
    n: usize,
}

impl MultiBinary {
    /// Create a space of `n` flags.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if `n == 0`.
    pub fn new(n: usize) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::EmptySpace);
        }
        Ok(Self { n })
    }

    /// Number of flags.
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Space for MultiBinary {
    fn kind(&self) -> &'static str {
        "MultiBinary"
    }

    fn shape(&self) -> Shape {
        smallvec![self.n]
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Vec<f32> {
        (0..self.n)
            .map(|_| if rng.random::<bool>() { 1.0 } else { 0.0 })
            .collect()
    }

    fn contains(&self, value: &[f32]) -> bool {
        value.len() == self.n && value.iter().all(|&v| v == 0.0 || v == 1.0)
    }

    fn space_eq(&self, other: &dyn Space) -> bool {
        other.downcast_ref::<Self>().is_some_and(|o| o == self)
    }
}
