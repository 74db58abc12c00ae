//! TILO: a goal-conditioned agent wrapper.
//!
//! [`Tilo`] wraps a reinforcement-learning [`Agent`](tilo_agent::Agent)
//! and, instead of handing it raw observations, hands it a copy of each
//! observation whose goal slice has been replaced by the remaining
//! distance to the target goal (`goal - projection(observation)`).
//!
//! # Crates
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tilo-core` | `Batch`, `Shape`, error types |
//! | [`space`] | `tilo-space` | `Space` trait and backends |
//! | [`agent`] | `tilo-agent` | `Agent`, `AgentFactory`, goal-conditioned base |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod features;
mod tilo;

pub use builder::TiloBuilder;
pub use features::{FeatureStrategy, GoalDifference};
pub use tilo::{Tilo, NAME_SUFFIX};

/// Batch buffers and error types (`tilo-core`).
pub use tilo_core as types;

/// Space descriptors (`tilo-space`).
pub use tilo_space as space;

/// Agent traits and the goal-conditioned base (`tilo-agent`).
pub use tilo_agent as agent;

/// Common imports for typical TILO usage.
///
/// ```rust
/// use tilo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Tilo, TiloBuilder};

    pub use tilo_core::{AgentError, Batch, ConfigError, FeatureError};

    pub use tilo_space::{BoxSpace, Discrete, MultiBinary, Space};

    pub use tilo_agent::{
        Agent, AgentFactory, AgentSpaces, GoalProjection, GoalSlice, GoalTransition, Transition,
    };
}
