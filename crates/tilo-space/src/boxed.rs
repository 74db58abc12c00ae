//! Real-vector space with per-component bounds.

use crate::error::SpaceError;
use crate::space::Space;
use rand::{Rng, RngCore};
use tilo_core::{component_count, Shape};

/// A real-vector space `[low, high]` of the given shape.
///
/// Bounds are stored per component in row-major order. Either bound may
/// be infinite; [`is_bounded`](Self::is_bounded) reports whether every
/// component is finite on both sides.
///
/// # Examples
///
/// ```
/// use tilo_space::{BoxSpace, Space};
///
/// let space = BoxSpace::uniform(-1.0, 1.0, &[4]).unwrap();
/// assert_eq!(space.shape().as_slice(), &[4]);
/// assert_eq!(space.width(), 4);
/// assert!(space.contains(&[0.0, 0.5, -1.0, 1.0]));
/// assert!(!space.contains(&[0.0, 0.5, -1.0, 1.5]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
    shape: Shape,
}

impl BoxSpace {
    /// Create a space from explicit per-component bounds.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if the shape has zero
    /// components, `Err(SpaceError::ShapeMismatch)` if a bounds vector
    /// has the wrong length, or `Err(SpaceError::InvalidBounds)` if a
    /// bound is NaN or `low > high`.
    pub fn new(low: Vec<f32>, high: Vec<f32>, shape: &[usize]) -> Result<Self, SpaceError> {
        let expected = component_count(shape);
        if expected == 0 {
            return Err(SpaceError::EmptySpace);
        }
        for (what, v) in [("low", &low), ("high", &high)] {
            if v.len() != expected {
                return Err(SpaceError::ShapeMismatch {
                    what,
                    expected,
                    actual: v.len(),
                });
            }
        }
        for (index, (&l, &h)) in low.iter().zip(&high).enumerate() {
            if l.is_nan() || h.is_nan() || l > h {
                return Err(SpaceError::InvalidBounds {
                    index,
                    low: l,
                    high: h,
                });
            }
        }
        Ok(Self {
            low,
            high,
            shape: Shape::from_slice(shape),
        })
    }

    /// A space with the same bounds on every component.
    pub fn uniform(low: f32, high: f32, shape: &[usize]) -> Result<Self, SpaceError> {
        let n = component_count(shape);
        Self::new(vec![low; n], vec![high; n], shape)
    }

    /// A space of the given shape bounded by `(-inf, +inf)` everywhere.
    pub fn unbounded(shape: &[usize]) -> Result<Self, SpaceError> {
        Self::uniform(f32::NEG_INFINITY, f32::INFINITY, shape)
    }

    /// Per-component lower bounds.
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Per-component upper bounds.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// `true` if every component has finite bounds on both sides.
    pub fn is_bounded(&self) -> bool {
        self.low
            .iter()
            .zip(&self.high)
            .all(|(l, h)| l.is_finite() && h.is_finite())
    }

    /// Standard normal sample via Box-Muller.
    fn box_muller(rng: &mut dyn RngCore) -> f64 {
        let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Unit-rate exponential sample.
    fn exponential(rng: &mut dyn RngCore) -> f64 {
        let u: f64 = rng.random();
        -(1.0 - u).ln()
    }
}

impl Space for BoxSpace {
    fn kind(&self) -> &'static str {
        "Box"
    }

    fn shape(&self) -> Shape {
        self.shape.clone()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Vec<f32> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&l, &h)| match (l.is_finite(), h.is_finite()) {
                (true, true) => {
                    let u: f64 = rng.random();
                    (l as f64 + (h as f64 - l as f64) * u).min(h as f64) as f32
                }
                (true, false) => (l as f64 + Self::exponential(rng)) as f32,
                (false, true) => (h as f64 - Self::exponential(rng)) as f32,
                (false, false) => Self::box_muller(rng) as f32,
            })
            .collect()
    }

    fn contains(&self, value: &[f32]) -> bool {
        value.len() == self.low.len()
            && value
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(&v, (&l, &h))| v >= l && v <= h)
    }

    fn space_eq(&self, other: &dyn Space) -> bool {
        other.downcast_ref::<Self>().is_some_and(|o| o == self)
    }
}
