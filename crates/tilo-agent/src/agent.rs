//! The [`Agent`] and [`AgentFactory`] traits.
//!
//! Agents are the external reinforcement-learning learners that TILO
//! wraps. They only ever see feature batches; goal handling happens in
//! the layer above them.

use crate::goal::GoalProjection;
use std::sync::Arc;
use tilo_core::{AgentError, Batch};
use tilo_space::{BoxSpace, Space};

/// One batch of experience expressed in feature space.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Features of the observations the actions were taken from.
    pub features: Batch,
    /// Actions taken, one row per transition.
    pub actions: Batch,
    /// Reward per transition.
    pub rewards: Vec<f32>,
    /// Features of the resulting observations.
    pub next_features: Batch,
    /// Whether each transition ended its episode.
    pub dones: Vec<bool>,
}

/// A reinforcement-learning agent driven by feature batches.
///
/// # Contract
///
/// - `act()` returns one action row per feature row.
/// - `name()` is stable for the lifetime of the agent.
///
/// # Object safety
///
/// This trait is object-safe; wrappers store agents as `Box<dyn Agent>`.
///
/// # Thread Safety
///
/// `Sync` is required even though `act()` and `learn()` take `&mut self`:
/// wrappers own the agent by value and build features through `&self`
/// from several threads, which needs the wrapper (and so the boxed
/// agent) to be `Sync`.
///
/// # Examples
///
/// ```
/// use tilo_agent::{Agent, Transition};
/// use tilo_core::{AgentError, Batch};
///
/// struct Idle;
///
/// impl Agent for Idle {
///     fn name(&self) -> &str { "Idle" }
///
///     fn act(&mut self, features: &Batch) -> Result<Batch, AgentError> {
///         Ok(Batch::new(vec![0.0; features.rows()], 1)?)
///     }
///
///     fn learn(&mut self, _transition: &Transition) -> Result<(), AgentError> {
///         Ok(())
///     }
/// }
///
/// let mut agent = Idle;
/// let actions = agent.act(&Batch::from_row(vec![1.0, 2.0])).unwrap();
/// assert_eq!(actions.rows(), 1);
/// ```
pub trait Agent: Send + Sync + 'static {
    /// Human-readable name, used to derive wrapper names.
    fn name(&self) -> &str;

    /// Choose one action per feature row.
    fn act(&mut self, features: &Batch) -> Result<Batch, AgentError>;

    /// Update from a batch of transitions.
    fn learn(&mut self, transition: &Transition) -> Result<(), AgentError>;
}

/// The spaces and goal projection a wrapped agent is built for.
#[derive(Clone, Debug)]
pub struct AgentSpaces {
    /// Raw observation space.
    pub observation: BoxSpace,
    /// Goal space.
    pub goal: BoxSpace,
    /// Action space.
    pub action: Arc<dyn Space>,
    /// Observation-to-goal projection.
    pub goal_projection: GoalProjection,
}

/// Builds wrapped agents.
///
/// Implemented for any `Fn(&AgentSpaces) -> Result<Box<dyn Agent>, AgentError>`,
/// so a closure is usually enough.
pub trait AgentFactory {
    /// Construct an agent for the given spaces.
    fn build(&self, spaces: &AgentSpaces) -> Result<Box<dyn Agent>, AgentError>;
}

impl<F> AgentFactory for F
where
    F: Fn(&AgentSpaces) -> Result<Box<dyn Agent>, AgentError>,
{
    fn build(&self, spaces: &AgentSpaces) -> Result<Box<dyn Agent>, AgentError> {
        self(spaces)
    }
}
