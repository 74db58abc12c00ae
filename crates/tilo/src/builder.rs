//! Validating builder for [`Tilo`].

use crate::features::{FeatureStrategy, GoalDifference};
use crate::tilo::Tilo;
use std::sync::Arc;
use tilo_agent::{
    AgentFactory, FeatureFn, GoalConditionedAgent, GoalConditionedSpaces, GoalProjection,
    GoalSlice,
};
use tilo_core::{Batch, ConfigError, FeatureError};
use tilo_space::{BoxSpace, Discrete, Space};

/// Builder for [`Tilo`].
///
/// Required: the wrapped agent factory, the observation space and the
/// action space. Everything else has a default.
pub struct TiloBuilder<F> {
    factory: F,
    observation_space: Arc<dyn Space>,
    action_space: Arc<dyn Space>,
    goal_space: Option<Arc<dyn Space>>,
    goal_projection: Option<GoalProjection>,
    feature_builder: Option<FeatureFn>,
    goal_offset: usize,
    seed: u64,
}

impl<F: AgentFactory> TiloBuilder<F> {
    pub(crate) fn new(
        factory: F,
        observation_space: Arc<dyn Space>,
        action_space: Arc<dyn Space>,
    ) -> Self {
        Self {
            factory,
            observation_space,
            action_space,
            goal_space: None,
            goal_projection: None,
            feature_builder: None,
            goal_offset: 0,
            seed: 0,
        }
    }

    /// Set the goal space (default: the observation space).
    pub fn goal_space(mut self, space: Arc<dyn Space>) -> Self {
        self.goal_space = Some(space);
        self
    }

    /// Set the observation-to-goal projection.
    ///
    /// Required when the goal space has more than one axis. Default:
    /// copy the goal slice out of each observation.
    pub fn goal_projection(mut self, projection: GoalProjection) -> Self {
        self.goal_projection = Some(projection);
        self
    }

    /// Replace the default goal-difference feature builder.
    pub fn feature_builder<B>(mut self, builder: B) -> Self
    where
        B: Fn(&Batch, &Batch) -> Result<Batch, FeatureError> + Send + Sync + 'static,
    {
        self.feature_builder = Some(Arc::new(builder));
        self
    }

    /// Set the first observation component of the goal slice (default: 0).
    pub fn goal_offset(mut self, offset: usize) -> Self {
        self.goal_offset = offset;
        self
    }

    /// Set the seed used to sample the feature space (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration and build the wrapped agent.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// - `InvalidActionSpace` if the action space is neither a
    ///   [`BoxSpace`] nor a [`Discrete`] space
    /// - `InvalidObservationSpace` / `InvalidGoalSpace` if either is not
    ///   a [`BoxSpace`]
    /// - `AmbiguousGoalProjection` if no projection was given and the
    ///   goal space has more than one axis
    /// - `GoalSliceOutOfRange` if a default projection or the default
    ///   feature builder is used and the goal slice does not fit in an
    ///   observation
    /// - `AgentConstruction` if the factory fails
    pub fn build(self) -> Result<Tilo, ConfigError> {
        let action = &self.action_space;
        if !action.is::<BoxSpace>() && !action.is::<Discrete>() {
            return Err(ConfigError::InvalidActionSpace {
                found: action.kind(),
            });
        }

        let observation = self
            .observation_space
            .downcast_ref::<BoxSpace>()
            .ok_or_else(|| ConfigError::InvalidObservationSpace {
                found: self.observation_space.kind(),
            })?
            .clone();

        let goal_space = match &self.goal_space {
            Some(space) => space,
            None => {
                tracing::debug!("no goal space given, using the observation space");
                &self.observation_space
            }
        };
        let goal = goal_space
            .downcast_ref::<BoxSpace>()
            .ok_or_else(|| ConfigError::InvalidGoalSpace {
                found: goal_space.kind(),
            })?
            .clone();

        let slice = GoalSlice::new(self.goal_offset, goal.width());
        let check_slice = || {
            if slice.fits(observation.width()) {
                Ok(())
            } else {
                Err(ConfigError::GoalSliceOutOfRange {
                    offset: slice.offset,
                    len: slice.len,
                    observation_width: observation.width(),
                })
            }
        };

        let goal_projection = match self.goal_projection {
            Some(projection) => projection,
            None => {
                let goal_shape = goal.shape();
                if goal_shape.len() > 1 {
                    return Err(ConfigError::AmbiguousGoalProjection { goal_shape });
                }
                check_slice()?;
                GoalProjection::slice(slice)
            }
        };

        let strategy = match self.feature_builder {
            Some(f) => FeatureStrategy::Custom(f),
            None => {
                check_slice()?;
                FeatureStrategy::GoalDifference(GoalDifference::new(
                    observation.width(),
                    slice,
                    goal_projection.clone(),
                ))
            }
        };

        let base = GoalConditionedAgent::new(
            &self.factory,
            GoalConditionedSpaces {
                observation,
                goal,
                action: self.action_space,
            },
            goal_projection,
            strategy.to_fn(),
        )?;

        Ok(Tilo::from_parts(base, strategy, slice, self.seed))
    }
}
