//! Error types for the TILO workspace.
//!
//! Organized by the phase in which they surface: construction
//! ([`ConfigError`]), feature construction ([`FeatureError`]), and
//! wrapped-agent execution ([`AgentError`]).

use crate::batch::Shape;
use std::error::Error;
use std::fmt;

/// Errors raised while building an adapter.
///
/// All of these are detected before any wrapped agent sees a feature
/// batch; a successfully built adapter never produces one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The action space is neither a bounded real-vector space nor a
    /// finite discrete space.
    InvalidActionSpace {
        /// Kind name of the rejected space.
        found: &'static str,
    },
    /// The observation space is not a bounded real-vector space.
    InvalidObservationSpace {
        /// Kind name of the rejected space.
        found: &'static str,
    },
    /// The goal space is not a bounded real-vector space.
    InvalidGoalSpace {
        /// Kind name of the rejected space.
        found: &'static str,
    },
    /// No goal projection was supplied and the goal space has more than
    /// one axis, so the default slice projection does not apply.
    AmbiguousGoalProjection {
        /// Shape of the goal space.
        goal_shape: Shape,
    },
    /// The goal slice does not fit inside the observation vector.
    GoalSliceOutOfRange {
        /// First observation component covered by the goal.
        offset: usize,
        /// Number of goal components.
        len: usize,
        /// Width of one observation.
        observation_width: usize,
    },
    /// The wrapped agent factory failed.
    AgentConstruction(AgentError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidActionSpace { found } => write!(
                f,
                "action space must be a box or discrete space, got {found}"
            ),
            Self::InvalidObservationSpace { found } => {
                write!(f, "observation space must be a box space, got {found}")
            }
            Self::InvalidGoalSpace { found } => {
                write!(f, "goal space must be a box space, got {found}")
            }
            Self::AmbiguousGoalProjection { goal_shape } => write!(
                f,
                "goal space has shape {goal_shape:?} with more than one axis; \
                 a goal projection must be supplied"
            ),
            Self::GoalSliceOutOfRange {
                offset,
                len,
                observation_width,
            } => write!(
                f,
                "goal slice {offset}..{} exceeds observation width {observation_width}",
                offset.saturating_add(*len)
            ),
            Self::AgentConstruction(reason) => {
                write!(f, "wrapped agent construction failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AgentConstruction(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<AgentError> for ConfigError {
    fn from(err: AgentError) -> Self {
        Self::AgentConstruction(err)
    }
}

/// Contract violations detected while building features.
///
/// Shapes are never broadcast: any mismatch between observation and
/// goal batches is reported rather than repaired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureError {
    /// A flat buffer length is not a multiple of the row width.
    RaggedBatch {
        /// Length of the flat buffer.
        len: usize,
        /// Requested row width.
        width: usize,
    },
    /// Observation and goal batches hold different numbers of rows.
    BatchSizeMismatch {
        /// Rows in the observation batch.
        observations: usize,
        /// Rows in the goal batch.
        goals: usize,
    },
    /// A batch has the wrong row width.
    WidthMismatch {
        /// Which operand was malformed (`"observation"`, `"goal"`, ...).
        operand: &'static str,
        /// Width the operation requires.
        expected: usize,
        /// Width that was supplied.
        actual: usize,
    },
    /// A feature builder produced rows with no components.
    EmptyFeatures,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaggedBatch { len, width } => {
                write!(f, "buffer of {len} values is not divisible into rows of {width}")
            }
            Self::BatchSizeMismatch { observations, goals } => write!(
                f,
                "batch size mismatch: {observations} observations, {goals} goals"
            ),
            Self::WidthMismatch {
                operand,
                expected,
                actual,
            } => write!(f, "{operand} width {actual} does not match expected {expected}"),
            Self::EmptyFeatures => write!(f, "feature builder produced zero-width rows"),
        }
    }
}

impl Error for FeatureError {}

/// Errors raised by wrapped agents and by forwarding through them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentError {
    /// The agent could not be constructed for the given spaces.
    Construction {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The agent failed while acting or learning.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// Feature construction failed before the agent was called.
    Features(FeatureError),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction { reason } => write!(f, "construction failed: {reason}"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::Features(err) => write!(f, "feature construction failed: {err}"),
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Features(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FeatureError> for AgentError {
    fn from(err: FeatureError) -> Self {
        Self::Features(err)
    }
}
