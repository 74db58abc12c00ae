//! Space trait compliance test helpers.
//!
//! These functions verify that a Space implementation satisfies the
//! invariants required by the trait contract. Reused across all backend
//! test modules (BoxSpace, Discrete, MultiBinary).

use crate::space::Space;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 64;

/// Assert that every sample has `width()` components.
pub fn assert_sample_width(space: &dyn Space) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for _ in 0..SAMPLES {
        let v = space.sample(&mut rng);
        assert_eq!(
            v.len(),
            space.width(),
            "{} sample has {} components, width is {}",
            space.kind(),
            v.len(),
            space.width()
        );
    }
}

/// Assert that every sample is a member of the space.
pub fn assert_sample_contained(space: &dyn Space) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let v = space.sample(&mut rng);
        assert!(space.contains(&v), "{} sample {v:?} not contained", space.kind());
    }
}

/// Assert that identically seeded generators produce identical samples.
pub fn assert_sampling_deterministic(space: &dyn Space) {
    let mut a = ChaCha8Rng::seed_from_u64(42);
    let mut b = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..SAMPLES {
        assert_eq!(space.sample(&mut a), space.sample(&mut b));
    }
}

/// Assert that a space is equal to itself under `space_eq`.
pub fn assert_space_eq_reflexive(space: &dyn Space) {
    assert!(space.space_eq(space), "{} not equal to itself", space.kind());
}

/// Run all compliance checks.
pub fn run_full_compliance(space: &dyn Space) {
    assert_sample_width(space);
    assert_sample_contained(space);
    assert_sampling_deterministic(space);
    assert_space_eq_reflexive(space);
}
