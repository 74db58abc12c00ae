//! Finite discrete space.

use crate::error::SpaceError;
use crate::space::Space;
use rand::{Rng, RngCore};
use tilo_core::Shape;

/// The integers `0..n`, encoded as a single `f32` component.
///
/// The shape is the empty (scalar) shape; a flattened value has width 1.
///
/// # Examples
///
/// ```
/// use tilo_space::{Discrete, Space};
///
/// let actions = Discrete::new(4).unwrap();
/// assert_eq!(actions.n(), 4);
/// assert!(actions.shape().is_empty());
/// assert!(actions.contains(&[3.0]));
/// assert!(!actions.contains(&[4.0]));
/// assert!(!actions.contains(&[1.5]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrete {
    n: u32,
}

impl Discrete {
    /// Create a discrete space with `n` values.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if `n == 0`.
    pub fn new(n: u32) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::EmptySpace);
        }
        Ok(Self { n })
    }

    /// Cardinality.
    pub fn n(&self) -> u32 {
        self.n
    }
}

impl Space for Discrete {
    fn kind(&self) -> &'static str {
        "Discrete"
    }

    fn shape(&self) -> Shape {
        Shape::new()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Vec<f32> {
        vec![rng.random_range(0..self.n) as f32]
    }

    fn contains(&self, value: &[f32]) -> bool {
        match value {
            [v] => v.fract() == 0.0 && *v >= 0.0 && *v < self.n as f32,
            _ => false,
        }
    }

    fn space_eq(&self, other: &dyn Space) -> bool {
        other.downcast_ref::<Self>().is_some_and(|o| o == self)
    }
}
