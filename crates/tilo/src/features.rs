//! Feature construction strategies.
//!
//! The default strategy, [`GoalDifference`], replaces the goal slice of
//! each observation with `goal - projection(observation)`, so the wrapped
//! agent sees how far it still is from the goal rather than where the
//! goal is. Callers may substitute any pure function instead.

use std::fmt;
use std::sync::Arc;
use tilo_agent::{FeatureFn, GoalProjection, GoalSlice};
use tilo_core::{Batch, FeatureError};

/// The default goal-relative feature builder.
///
/// # Examples
///
/// ```
/// use tilo::features::GoalDifference;
/// use tilo_agent::{GoalProjection, GoalSlice};
/// use tilo_core::Batch;
///
/// let slice = GoalSlice::new(0, 4);
/// let builder = GoalDifference::new(4, slice, GoalProjection::slice(slice));
///
/// let obs = Batch::from_row(vec![1.0, 2.0, 3.0, 4.0]);
/// let goal = Batch::from_row(vec![5.0, 6.0, 7.0, 8.0]);
/// let features = builder.build(&obs, &goal).unwrap();
/// assert_eq!(features.as_slice(), &[4.0, 4.0, 4.0, 4.0]);
/// ```
#[derive(Clone, Debug)]
pub struct GoalDifference {
    observation_width: usize,
    slice: GoalSlice,
    projection: GoalProjection,
}

impl GoalDifference {
    /// Create a builder for observations of `observation_width`
    /// components whose goal occupies `slice`.
    ///
    /// The caller guarantees `slice` fits inside `observation_width`;
    /// the adapter builder checks this before constructing one.
    pub fn new(observation_width: usize, slice: GoalSlice, projection: GoalProjection) -> Self {
        Self {
            observation_width,
            slice,
            projection,
        }
    }

    /// The slice overwritten in each feature row.
    pub fn slice(&self) -> GoalSlice {
        self.slice
    }

    /// Build features for a batch.
    ///
    /// The observation batch is copied, never modified. Rows and widths
    /// must match exactly; nothing is broadcast.
    ///
    /// # Errors
    ///
    /// - `BatchSizeMismatch` if the batches differ in row count, or the
    ///   projection returns a different number of rows.
    /// - `WidthMismatch` if observations, goals or projected goals have
    ///   the wrong width.
    pub fn build(&self, observations: &Batch, goals: &Batch) -> Result<Batch, FeatureError> {
        observations.expect_width("observation", self.observation_width)?;
        goals.expect_width("goal", self.slice.len)?;
        if observations.rows() != goals.rows() {
            return Err(FeatureError::BatchSizeMismatch {
                observations: observations.rows(),
                goals: goals.rows(),
            });
        }

        let achieved = self.projection.project(observations)?;
        achieved.expect_width("projected goal", self.slice.len)?;
        if achieved.rows() != observations.rows() {
            return Err(FeatureError::BatchSizeMismatch {
                observations: observations.rows(),
                goals: achieved.rows(),
            });
        }

        let mut features = observations.clone();
        let range = self.slice.range();
        for ((row, goal), reached) in features
            .iter_rows_mut()
            .zip(goals.iter_rows())
            .zip(achieved.iter_rows())
        {
            for ((out, g), a) in row[range.clone()].iter_mut().zip(goal).zip(reached) {
                *out = g - a;
            }
        }
        Ok(features)
    }
}

/// Which feature builder an adapter uses.
///
/// Fixed when the adapter is built.
#[derive(Clone)]
pub enum FeatureStrategy {
    /// The built-in goal-difference builder.
    GoalDifference(GoalDifference),
    /// A caller-supplied builder.
    Custom(FeatureFn),
}

impl FeatureStrategy {
    /// `true` for the built-in builder.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::GoalDifference(_))
    }

    /// The strategy as a shareable function value.
    pub fn to_fn(&self) -> FeatureFn {
        match self {
            Self::GoalDifference(builder) => {
                let builder = builder.clone();
                Arc::new(move |observations: &Batch, goals: &Batch| {
                    builder.build(observations, goals)
                })
            }
            Self::Custom(f) => Arc::clone(f),
        }
    }
}

impl fmt::Debug for FeatureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalDifference(builder) => f
                .debug_tuple("GoalDifference")
                .field(&builder.slice.range())
                .finish(),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leading(obs_width: usize, goal_len: usize) -> GoalDifference {
        sliced(obs_width, 0, goal_len)
    }

    #[test]
    fn whole_observation_goal() {
        let b = leading(4, 4);
        let obs = Batch::from_row(vec![1.0, 2.0, 3.0, 4.0]);
        let goal = Batch::from_row(vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(b.build(&obs, &goal).unwrap().as_slice(), &[4.0; 4]);
    }

    #[test]
    fn offset_slice_leaves_other_components() {
        let slice = GoalSlice::new(1, 2);
        let b = GoalDifference::new(4, slice, GoalProjection::slice(slice));
        let obs = Batch::new(vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0], 4).unwrap();
        let goals = Batch::new(vec![0.0, 0.0, 25.0, 25.0], 2).unwrap();
        let f = b.build(&obs, &goals).unwrap();
        assert_eq!(f.row(0), &[1.0, -2.0, -3.0, 4.0]);
        assert_eq!(f.row(1), &[10.0, 5.0, -5.0, 40.0]);
    }

    #[test]
    fn batch_size_mismatch_rejected() {
        let b = leading(3, 2);
        let obs = Batch::new(vec![0.0; 6], 3).unwrap();
        let goals = Batch::new(vec![0.0; 6], 2).unwrap();
        assert_eq!(
            b.build(&obs, &goals).unwrap_err(),
            FeatureError::BatchSizeMismatch {
                observations: 2,
                goals: 3,
            }
        );
    }

    #[test]
    fn goal_width_mismatch_not_broadcast() {
        let b = leading(3, 2);
        let obs = Batch::from_row(vec![0.0; 3]);
        let goals = Batch::from_row(vec![1.0]);
        assert_eq!(
            b.build(&obs, &goals).unwrap_err(),
            FeatureError::WidthMismatch {
                operand: "goal",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn observation_width_checked() {
        let b = leading(3, 2);
        let obs = Batch::from_row(vec![0.0; 4]);
        let goals = Batch::from_row(vec![0.0; 2]);
        assert!(matches!(
            b.build(&obs, &goals).unwrap_err(),
            FeatureError::WidthMismatch {
                operand: "observation",
                ..
            }
        ));
    }

    #[test]
    fn bad_custom_projection_width_rejected() {
        let projection = GoalProjection::new(|obs: &Batch| Ok(obs.clone()));
        let b = GoalDifference::new(3, GoalSlice::new(0, 2), projection);
        let obs = Batch::from_row(vec![0.0; 3]);
        let goals = Batch::from_row(vec![0.0; 2]);
        assert_eq!(
            b.build(&obs, &goals).unwrap_err(),
            FeatureError::WidthMismatch {
                operand: "projected goal",
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn empty_batch_yields_empty_features() {
        let b = leading(3, 2);
        let obs = Batch::new(Vec::new(), 3).unwrap();
        let goals = Batch::new(Vec::new(), 2).unwrap();
        let f = b.build(&obs, &goals).unwrap();
        assert_eq!(f.rows(), 0);
        assert_eq!(f.width(), 3);
    }

    #[test]
    fn strategy_fn_matches_builder() {
        let b = leading(2, 1);
        let strategy = FeatureStrategy::GoalDifference(b.clone());
        assert!(strategy.is_default());
        let obs = Batch::from_row(vec![1.0, 9.0]);
        let goal = Batch::from_row(vec![3.0]);
        assert_eq!(
            (strategy.to_fn())(&obs, &goal).unwrap(),
            b.build(&obs, &goal).unwrap()
        );
        assert_eq!(format!("{strategy:?}"), "GoalDifference(0..1)");
    }

    fn sliced(obs_width: usize, offset: usize, goal_len: usize) -> GoalDifference {
        let slice = GoalSlice::new(offset, goal_len);
        GoalDifference::new(obs_width, slice, GoalProjection::slice(slice))
    }

    /// Observation data, row width, slice offset and slice length, with
    /// the slice always inside the row.
    fn obs_and_slice() -> impl Strategy<Value = (Vec<f32>, usize, usize, usize)> {
        (1usize..8, 1usize..6)
            .prop_flat_map(|(width, rows)| {
                (
                    prop::collection::vec(-1e3f32..1e3, width * rows),
                    Just(width),
                    1..=width,
                )
            })
            .prop_flat_map(|(data, width, goal_len)| {
                (Just(data), Just(width), 0..=width - goal_len, Just(goal_len))
            })
    }

    proptest! {
        #[test]
        fn achieved_goal_gives_zero_slice((data, width, offset, goal_len) in obs_and_slice()) {
            let b = sliced(width, offset, goal_len);
            let obs = Batch::new(data, width).unwrap();
            let goals = GoalProjection::slice(b.slice()).project(&obs).unwrap();
            let f = b.build(&obs, &goals).unwrap();
            for row in f.iter_rows() {
                prop_assert!(row[offset..offset + goal_len].iter().all(|&v| v == 0.0));
            }
        }

        #[test]
        fn components_outside_slice_are_copied((data, width, offset, goal_len) in obs_and_slice()) {
            let b = sliced(width, offset, goal_len);
            let obs = Batch::new(data, width).unwrap();
            let before = obs.clone();
            let goals = Batch::new(vec![7.0; obs.rows() * goal_len], goal_len).unwrap();
            let f = b.build(&obs, &goals).unwrap();
            prop_assert_eq!(&obs, &before);
            let end = offset + goal_len;
            for (out, src) in f.iter_rows().zip(obs.iter_rows()) {
                prop_assert_eq!(&out[..offset], &src[..offset]);
                prop_assert_eq!(&out[end..], &src[end..]);
            }
        }
    }
}
