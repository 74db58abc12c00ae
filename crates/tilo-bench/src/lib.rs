//! Benchmark profiles for TILO.
//!
//! Shared setup for the criterion benches: an adapter wrapping a
//! recording agent and deterministic observation/goal batches.

#![forbid(unsafe_code)]

use tilo::Tilo;
use tilo_core::Batch;
use tilo_test_utils::fixtures::{box_space, discrete};
use tilo_test_utils::RecordingFactory;

/// An adapter over `obs_dim`-wide observations whose goal is the
/// leading `goal_dim` components.
pub fn reference_adapter(obs_dim: usize, goal_dim: usize) -> Tilo {
    Tilo::builder(RecordingFactory::new("bench"), box_space(obs_dim), discrete(4))
        .goal_space(box_space(goal_dim))
        .build()
        .expect("reference adapter configuration is valid")
}

/// A deterministic batch of `rows` rows of `width` components.
pub fn reference_batch(rows: usize, width: usize, salt: u64) -> Batch {
    let data = (0..rows * width)
        .map(|i| {
            let h = (i as u64 ^ salt).wrapping_mul(6364136223846793007);
            ((h >> 40) % 2000) as f32 / 100.0 - 10.0
        })
        .collect();
    Batch::new(data, width).expect("rows * width values")
}
