//! The core `Space` trait and `dyn Space` downcast support.

use rand::RngCore;
use std::any::Any;
use std::fmt;
use tilo_core::{component_count, Shape};

/// Descriptor of the values an environment or agent exchanges.
///
/// Observation, goal and action spaces are all handed around as
/// `Arc<dyn Space>`; the adapter checks which concrete backend it was
/// given with `downcast_ref`.
///
/// # Thread Safety
///
/// `Sync` is required because adapters are shared across vectorized
/// environment workers and read their spaces concurrently.
pub trait Space: Any + Send + Sync + fmt::Debug + 'static {
    /// Short name of the backend, used in error messages.
    fn kind(&self) -> &'static str;

    /// Ordered axis lengths of one value.
    fn shape(&self) -> Shape;

    /// Number of `f32` components in one flattened value.
    fn width(&self) -> usize {
        component_count(&self.shape())
    }

    /// Draw one value, flattened row-major.
    ///
    /// Must only consume randomness from `rng`, so that two calls with
    /// identically seeded generators return the same value.
    fn sample(&self, rng: &mut dyn RngCore) -> Vec<f32>;

    /// `true` if `value` is a member of the space.
    fn contains(&self, value: &[f32]) -> bool;

    /// Returns `true` if `self` and `other` describe the same set of
    /// values: same concrete type and identical parameters.
    ///
    /// Implementors should downcast `other` to `Self` and return `false`
    /// if the downcast fails.
    fn space_eq(&self, other: &dyn Space) -> bool;
}

impl dyn Space {
    /// Attempt to downcast a trait object to a concrete Space type.
    pub fn downcast_ref<T: Space>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// `true` if the trait object is a `T`.
    pub fn is<T: Space>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }
}
