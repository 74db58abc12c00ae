//! Reusable space fixtures.

use std::sync::Arc;
use tilo_space::{BoxSpace, Discrete, MultiBinary, Space};

/// A `[-10, 10]^dim` box.
pub fn box_space(dim: usize) -> Arc<dyn Space> {
    Arc::new(BoxSpace::uniform(-10.0, 10.0, &[dim]).expect("non-empty box"))
}

/// A `[-1, 1]` box of arbitrary shape.
pub fn shaped_box(shape: &[usize]) -> Arc<dyn Space> {
    Arc::new(BoxSpace::uniform(-1.0, 1.0, shape).expect("non-empty box"))
}

/// A discrete space with `n` actions.
pub fn discrete(n: u32) -> Arc<dyn Space> {
    Arc::new(Discrete::new(n).expect("n > 0"))
}

/// A multi-binary space with `n` flags.
pub fn multi_binary(n: usize) -> Arc<dyn Space> {
    Arc::new(MultiBinary::new(n).expect("n > 0"))
}
