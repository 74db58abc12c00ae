//! Test utilities and mock types for TILO development.
//!
//! Provides mock [`Agent`] implementations, matching [`AgentFactory`]
//! implementations, and space fixtures for constructing test scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use tilo_agent::{Agent, AgentFactory, AgentSpaces, Transition};
use tilo_core::{AgentError, Batch};
use tilo_space::Space;

/// Everything a [`RecordingAgent`] has been handed.
#[derive(Debug, Default)]
pub struct AgentLog {
    /// Feature batches passed to `act`, in call order.
    pub acted: Vec<Batch>,
    /// Transitions passed to `learn`, in call order.
    pub learned: Vec<Transition>,
    /// Spaces the agent was built for.
    pub built_for: Option<AgentSpaces>,
}

/// Mock agent that records its inputs and answers with zero actions.
///
/// The log is shared behind an `Arc<Mutex<_>>` so tests can inspect it
/// after the agent has been moved into a wrapper.
pub struct RecordingAgent {
    name: String,
    action_width: usize,
    log: Arc<Mutex<AgentLog>>,
}

impl Agent for RecordingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&mut self, features: &Batch) -> Result<Batch, AgentError> {
        self.lock().acted.push(features.clone());
        Ok(Batch::new(
            vec![0.0; features.rows() * self.action_width],
            self.action_width,
        )?)
    }

    fn learn(&mut self, transition: &Transition) -> Result<(), AgentError> {
        self.lock().learned.push(transition.clone());
        Ok(())
    }
}

impl RecordingAgent {
    fn lock(&self) -> std::sync::MutexGuard<'_, AgentLog> {
        // A poisoned log only happens after a failed assertion elsewhere.
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Factory for [`RecordingAgent`]s sharing one log.
///
/// Cloning the factory shares the log as well.
#[derive(Clone)]
pub struct RecordingFactory {
    name: String,
    log: Arc<Mutex<AgentLog>>,
}

impl RecordingFactory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: Arc::new(Mutex::new(AgentLog::default())),
        }
    }

    /// Run `f` against the shared log.
    pub fn with_log<R>(&self, f: impl FnOnce(&AgentLog) -> R) -> R {
        let log = self.log.lock().unwrap_or_else(|e| e.into_inner());
        f(&log)
    }
}

impl AgentFactory for RecordingFactory {
    fn build(&self, spaces: &AgentSpaces) -> Result<Box<dyn Agent>, AgentError> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).built_for = Some(spaces.clone());
        Ok(Box::new(RecordingAgent {
            name: self.name.clone(),
            action_width: spaces.action.width(),
            log: Arc::clone(&self.log),
        }))
    }
}

/// Factory that always fails with `AgentError::Construction`.
pub struct FailingFactory {
    pub reason: String,
}

impl FailingFactory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl AgentFactory for FailingFactory {
    fn build(&self, _spaces: &AgentSpaces) -> Result<Box<dyn Agent>, AgentError> {
        Err(AgentError::Construction {
            reason: self.reason.clone(),
        })
    }
}
