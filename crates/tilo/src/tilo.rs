//! The TILO adapter.

use crate::builder::TiloBuilder;
use crate::features::FeatureStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tilo_agent::{
    Agent, AgentFactory, GoalConditionedAgent, GoalProjection, GoalSlice, GoalTransition,
};
use tilo_core::{AgentError, Batch, FeatureError};
use tilo_space::{BoxSpace, Space};

/// Suffix appended to the wrapped agent's name.
pub const NAME_SUFFIX: &str = " + TILO";

/// A goal-conditioned agent that hands its wrapped agent goal-relative
/// features.
///
/// Built with [`Tilo::builder`]. After construction every field is
/// fixed; feature construction takes `&self` and may run concurrently
/// on disjoint batches.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tilo::Tilo;
/// use tilo_agent::{Agent, AgentSpaces, Transition};
/// use tilo_core::{AgentError, Batch};
/// use tilo_space::{BoxSpace, Discrete};
///
/// struct Dqn;
///
/// impl Agent for Dqn {
///     fn name(&self) -> &str { "DQN" }
///     fn act(&mut self, features: &Batch) -> Result<Batch, AgentError> {
///         Ok(Batch::new(vec![0.0; features.rows()], 1)?)
///     }
///     fn learn(&mut self, _: &Transition) -> Result<(), AgentError> { Ok(()) }
/// }
///
/// let factory = |_: &AgentSpaces| -> Result<Box<dyn Agent>, AgentError> {
///     Ok(Box::new(Dqn))
/// };
/// let tilo = Tilo::builder(
///     factory,
///     Arc::new(BoxSpace::uniform(0.0, 10.0, &[4]).unwrap()),
///     Arc::new(Discrete::new(3).unwrap()),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(tilo.name(), "DQN + TILO");
///
/// let obs = Batch::from_row(vec![1.0, 2.0, 3.0, 4.0]);
/// let goal = Batch::from_row(vec![5.0, 6.0, 7.0, 8.0]);
/// assert_eq!(tilo.features(&obs, &goal).unwrap().as_slice(), &[4.0; 4]);
/// ```
pub struct Tilo {
    base: GoalConditionedAgent,
    strategy: FeatureStrategy,
    goal_slice: GoalSlice,
    name: String,
    seed: u64,
    feature_space: OnceLock<Result<BoxSpace, FeatureError>>,
}

impl Tilo {
    /// Start configuring an adapter around the agent `factory` builds.
    pub fn builder<F: AgentFactory>(
        factory: F,
        observation_space: Arc<dyn Space>,
        action_space: Arc<dyn Space>,
    ) -> TiloBuilder<F> {
        TiloBuilder::new(factory, observation_space, action_space)
    }

    pub(crate) fn from_parts(
        base: GoalConditionedAgent,
        strategy: FeatureStrategy,
        goal_slice: GoalSlice,
        seed: u64,
    ) -> Self {
        let name = format!("{}{NAME_SUFFIX}", base.name());
        tracing::debug!(
            name = %name,
            goal_slice = ?goal_slice.range(),
            features = ?strategy,
            "built TILO agent"
        );
        Self {
            base,
            strategy,
            goal_slice,
            name,
            seed,
            feature_space: OnceLock::new(),
        }
    }

    /// `<wrapped agent name> + TILO`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw observation space.
    pub fn observation_space(&self) -> &BoxSpace {
        &self.base.spaces().observation
    }

    /// The goal space.
    pub fn goal_space(&self) -> &BoxSpace {
        &self.base.spaces().goal
    }

    /// The action space.
    pub fn action_space(&self) -> &Arc<dyn Space> {
        &self.base.spaces().action
    }

    /// The resolved observation-to-goal projection.
    pub fn goal_projection(&self) -> &GoalProjection {
        self.base.goal_projection()
    }

    /// The observation components the default builder overwrites.
    pub fn goal_slice(&self) -> GoalSlice {
        self.goal_slice
    }

    /// `true` unless a custom feature builder was supplied.
    pub fn uses_default_features(&self) -> bool {
        self.strategy.is_default()
    }

    /// The space of the feature vectors the wrapped agent receives.
    ///
    /// Sampled once from the observation and goal spaces: the shape is
    /// that of one built feature row and every bound is infinite, since
    /// goal differences can leave both source spaces. Computed on first
    /// call and memoized.
    ///
    /// # Errors
    ///
    /// Returns the feature builder's error if it rejects the sample,
    /// `BatchSizeMismatch` if it does not return exactly one row for the
    /// one-row sample, or `EmptyFeatures` if it produces zero-width rows.
    pub fn feature_space(&self) -> Result<&BoxSpace, FeatureError> {
        self.feature_space
            .get_or_init(|| self.sample_feature_space())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn sample_feature_space(&self) -> Result<BoxSpace, FeatureError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let observation = Batch::from_row(self.observation_space().sample(&mut rng));
        let goal = Batch::from_row(self.goal_space().sample(&mut rng));
        let features = self.base.features(&observation, &goal)?;
        if features.rows() != 1 {
            return Err(FeatureError::BatchSizeMismatch {
                observations: 1,
                goals: features.rows(),
            });
        }
        BoxSpace::unbounded(&[features.width()]).map_err(|_| FeatureError::EmptyFeatures)
    }

    /// Build features for a batch of observations and goals.
    pub fn features(&self, observations: &Batch, goals: &Batch) -> Result<Batch, FeatureError> {
        tracing::trace!(
            rows = observations.rows(),
            width = observations.width(),
            "building features"
        );
        self.base.features(observations, goals)
    }

    /// Build features for a single observation and goal.
    pub fn features_one(
        &self,
        observation: &[f32],
        goal: &[f32],
    ) -> Result<Vec<f32>, FeatureError> {
        let observations = Batch::from_row(observation.to_vec());
        let goals = Batch::from_row(goal.to_vec());
        Ok(self.features(&observations, &goals)?.into_vec())
    }

    /// Choose actions for `observations` pursuing `goals`.
    pub fn act(&mut self, observations: &Batch, goals: &Batch) -> Result<Batch, AgentError> {
        self.base.act(observations, goals)
    }

    /// Forward a batch of experience to the wrapped agent in feature space.
    pub fn learn(&mut self, transition: &GoalTransition) -> Result<(), AgentError> {
        self.base.learn(transition)
    }

    /// The goal-conditioned base this adapter composes.
    pub fn base(&self) -> &GoalConditionedAgent {
        &self.base
    }

    /// The wrapped agent.
    pub fn inner(&self) -> &dyn Agent {
        self.base.inner()
    }

    /// The wrapped agent, mutably.
    pub fn inner_mut(&mut self) -> &mut dyn Agent {
        self.base.inner_mut()
    }
}

impl fmt::Debug for Tilo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tilo")
            .field("name", &self.name)
            .field("goal_slice", &self.goal_slice.range())
            .field("features", &self.strategy)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
