//! Core types for the TILO goal-conditioned agent wrapper.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the row-major [`Batch`] buffer that observations, goals and features
//! travel in, the [`Shape`] descriptor, and the error types shared by
//! the rest of the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod error;

pub use batch::{component_count, Batch, Shape};
pub use error::{AgentError, ConfigError, FeatureError};
