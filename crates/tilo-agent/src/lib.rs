//! Agent traits and the goal-conditioned agent base for TILO.
//!
//! The [`Agent`] trait is the seam to the wrapped reinforcement-learning
//! agent; [`GoalConditionedAgent`] composes one with a goal projection
//! and a feature builder and forwards observations through them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod goal;
pub mod goal_conditioned;

pub use agent::{Agent, AgentFactory, AgentSpaces, Transition};
pub use goal::{FeatureFn, GoalProjection, GoalSlice};
pub use goal_conditioned::{GoalConditionedAgent, GoalConditionedSpaces, GoalTransition};
