//! Goal projections, the goal slice, and the feature function type.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tilo_core::{Batch, FeatureError};

/// A pure feature builder: `(observations, goals) -> features`.
///
/// Shared behind an `Arc` so the same builder can serve every clone of
/// an agent and every vectorized environment worker.
pub type FeatureFn = Arc<dyn Fn(&Batch, &Batch) -> Result<Batch, FeatureError> + Send + Sync>;

type ProjectionFn = dyn Fn(&Batch) -> Result<Batch, FeatureError> + Send + Sync;

/// The span of observation components that encode the achieved goal.
///
/// Resolved once when an agent is built and reused for every batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GoalSlice {
    /// First observation component covered by the goal.
    pub offset: usize,
    /// Number of goal components.
    pub len: usize,
}

impl GoalSlice {
    /// The slice `offset..offset + len`.
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// One past the last covered component, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// The slice as an index range.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// `true` if the slice fits inside rows of `width` components.
    pub fn fits(&self, width: usize) -> bool {
        self.offset
            .checked_add(self.len)
            .is_some_and(|end| end <= width)
    }
}

/// Maps observations to the goals they already satisfy.
///
/// Either a [`slice`](Self::slice) of the observation or an arbitrary
/// user function. Must be pure: the result may only depend on the
/// observation batch.
///
/// # Examples
///
/// ```
/// use tilo_agent::{GoalProjection, GoalSlice};
/// use tilo_core::Batch;
///
/// let project = GoalProjection::slice(GoalSlice::new(1, 2));
/// let obs = Batch::new(vec![0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0], 4).unwrap();
/// let goals = project.project(&obs).unwrap();
/// assert_eq!(goals.as_slice(), &[1.0, 2.0, 11.0, 12.0]);
/// ```
#[derive(Clone)]
pub struct GoalProjection {
    f: Arc<ProjectionFn>,
    slice: Option<GoalSlice>,
}

impl GoalProjection {
    /// Wrap a user-supplied projection.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Batch) -> Result<Batch, FeatureError> + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            slice: None,
        }
    }

    /// Project by copying `slice` out of every observation row.
    pub fn slice(slice: GoalSlice) -> Self {
        Self {
            f: Arc::new(move |observations: &Batch| slice_rows(observations, slice)),
            slice: Some(slice),
        }
    }

    /// The slice this projection copies, if it is a slice projection.
    pub fn as_slice(&self) -> Option<GoalSlice> {
        self.slice
    }

    /// Apply the projection to a batch of observations.
    pub fn project(&self, observations: &Batch) -> Result<Batch, FeatureError> {
        (self.f)(observations)
    }
}

impl fmt::Debug for GoalProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slice {
            Some(s) => write!(f, "GoalProjection::Slice({:?})", s.range()),
            None => write!(f, "GoalProjection::Custom"),
        }
    }
}

fn slice_rows(observations: &Batch, slice: GoalSlice) -> Result<Batch, FeatureError> {
    if !slice.fits(observations.width()) {
        return Err(FeatureError::WidthMismatch {
            operand: "observation",
            expected: slice.end(),
            actual: observations.width(),
        });
    }
    let mut data = Vec::with_capacity(observations.rows() * slice.len);
    for row in observations.iter_rows() {
        data.extend_from_slice(&row[slice.range()]);
    }
    Batch::new(data, slice.len)
}
