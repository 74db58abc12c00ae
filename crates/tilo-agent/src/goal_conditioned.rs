//! The goal-conditioned agent base.
//!
//! [`GoalConditionedAgent`] owns a wrapped [`Agent`] and turns
//! `(observation, goal)` pairs into the feature batches that agent
//! consumes. Hindsight relabeling is left to the training loop; this
//! type only carries the projection it needs.

use crate::agent::{Agent, AgentFactory, AgentSpaces, Transition};
use crate::goal::{FeatureFn, GoalProjection};
use std::fmt;
use std::sync::Arc;
use tilo_core::{AgentError, Batch, FeatureError};
use tilo_space::{BoxSpace, Space};

/// Validated observation, goal and action spaces.
#[derive(Clone, Debug)]
pub struct GoalConditionedSpaces {
    /// Raw observation space.
    pub observation: BoxSpace,
    /// Goal space.
    pub goal: BoxSpace,
    /// Action space, kept as a trait object since it may be discrete.
    pub action: Arc<dyn Space>,
}

/// One batch of experience expressed with raw observations and goals.
#[derive(Clone, Debug, PartialEq)]
pub struct GoalTransition {
    /// Observations the actions were taken from.
    pub observations: Batch,
    /// Actions taken.
    pub actions: Batch,
    /// Reward per transition.
    pub rewards: Vec<f32>,
    /// Resulting observations.
    pub next_observations: Batch,
    /// Goal pursued by each transition.
    pub goals: Batch,
    /// Whether each transition ended its episode.
    pub dones: Vec<bool>,
}

/// A wrapped agent plus the goal projection and feature builder that
/// feed it.
pub struct GoalConditionedAgent {
    spaces: GoalConditionedSpaces,
    goal_projection: GoalProjection,
    features: FeatureFn,
    agent: Box<dyn Agent>,
}

impl GoalConditionedAgent {
    /// Build the wrapped agent with `factory` and compose it with the
    /// given projection and feature builder.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error unchanged.
    pub fn new(
        factory: &dyn AgentFactory,
        spaces: GoalConditionedSpaces,
        goal_projection: GoalProjection,
        features: FeatureFn,
    ) -> Result<Self, AgentError> {
        let agent = factory.build(&AgentSpaces {
            observation: spaces.observation.clone(),
            goal: spaces.goal.clone(),
            action: Arc::clone(&spaces.action),
            goal_projection: goal_projection.clone(),
        })?;
        tracing::debug!(
            agent = agent.name(),
            projection = ?goal_projection,
            "built goal-conditioned agent"
        );
        Ok(Self {
            spaces,
            goal_projection,
            features,
            agent,
        })
    }

    /// Name of the wrapped agent.
    pub fn name(&self) -> &str {
        self.agent.name()
    }

    /// The validated spaces.
    pub fn spaces(&self) -> &GoalConditionedSpaces {
        &self.spaces
    }

    /// The observation-to-goal projection.
    pub fn goal_projection(&self) -> &GoalProjection {
        &self.goal_projection
    }

    /// The wrapped agent.
    pub fn inner(&self) -> &dyn Agent {
        self.agent.as_ref()
    }

    /// The wrapped agent, mutably.
    pub fn inner_mut(&mut self) -> &mut dyn Agent {
        self.agent.as_mut()
    }

    /// Build features for a batch of observations and goals.
    pub fn features(&self, observations: &Batch, goals: &Batch) -> Result<Batch, FeatureError> {
        (self.features)(observations, goals)
    }

    /// Choose actions for `observations` pursuing `goals`.
    pub fn act(&mut self, observations: &Batch, goals: &Batch) -> Result<Batch, AgentError> {
        let features = self.features(observations, goals)?;
        self.agent.act(&features)
    }

    /// Forward a batch of experience to the wrapped agent in feature space.
    ///
    /// Both the observations and the next observations are combined
    /// with the same goals.
    pub fn learn(&mut self, transition: &GoalTransition) -> Result<(), AgentError> {
        let features = self.features(&transition.observations, &transition.goals)?;
        let next_features = self.features(&transition.next_observations, &transition.goals)?;
        self.agent.learn(&Transition {
            features,
            actions: transition.actions.clone(),
            rewards: transition.rewards.clone(),
            next_features,
            dones: transition.dones.clone(),
        })
    }
}

impl fmt::Debug for GoalConditionedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalConditionedAgent")
            .field("agent", &self.agent.name())
            .field("spaces", &self.spaces)
            .field("goal_projection", &self.goal_projection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalSlice;
    use std::sync::Mutex;
    use tilo_space::Discrete;

    type Log = Arc<Mutex<Vec<Batch>>>;

    /// Records every feature batch it is handed.
    struct Echo {
        seen: Log,
    }

    impl Agent for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn act(&mut self, features: &Batch) -> Result<Batch, AgentError> {
            self.seen.lock().unwrap().push(features.clone());
            Ok(Batch::new(vec![0.0; features.rows()], 1)?)
        }

        fn learn(&mut self, transition: &Transition) -> Result<(), AgentError> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(transition.features.clone());
            seen.push(transition.next_features.clone());
            Ok(())
        }
    }

    fn spaces() -> GoalConditionedSpaces {
        GoalConditionedSpaces {
            observation: BoxSpace::uniform(-1.0, 1.0, &[3]).unwrap(),
            goal: BoxSpace::uniform(-1.0, 1.0, &[2]).unwrap(),
            action: Arc::new(Discrete::new(2).unwrap()),
        }
    }

    /// Concatenates observation and goal rows.
    fn concat() -> FeatureFn {
        Arc::new(|obs: &Batch, goals: &Batch| {
            let mut data = Vec::new();
            for (o, g) in obs.iter_rows().zip(goals.iter_rows()) {
                data.extend_from_slice(o);
                data.extend_from_slice(g);
            }
            Batch::new(data, obs.width() + goals.width())
        })
    }

    fn build(features: FeatureFn) -> (GoalConditionedAgent, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let shared = log.clone();
        let factory = move |_: &AgentSpaces| -> Result<Box<dyn Agent>, AgentError> {
            Ok(Box::new(Echo {
                seen: shared.clone(),
            }))
        };
        let agent = GoalConditionedAgent::new(
            &factory,
            spaces(),
            GoalProjection::slice(GoalSlice::new(0, 2)),
            features,
        )
        .unwrap();
        (agent, log)
    }

    #[test]
    fn act_forwards_features() {
        let (mut agent, log) = build(concat());
        let obs = Batch::from_row(vec![0.1, 0.2, 0.3]);
        let goals = Batch::from_row(vec![0.5, 0.6]);
        let actions = agent.act(&obs, &goals).unwrap();
        assert_eq!(actions.rows(), 1);
        assert_eq!(agent.name(), "Echo");
        let seen = log.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].as_slice(), &[0.1, 0.2, 0.3, 0.5, 0.6]);
    }

    #[test]
    fn factory_sees_validated_spaces() {
        let factory = |spaces: &AgentSpaces| -> Result<Box<dyn Agent>, AgentError> {
            assert_eq!(spaces.observation.width(), 3);
            assert_eq!(spaces.goal.width(), 2);
            assert_eq!(spaces.action.kind(), "Discrete");
            assert_eq!(spaces.goal_projection.as_slice(), Some(GoalSlice::new(0, 2)));
            Ok(Box::new(Echo {
                seen: Arc::new(Mutex::new(Vec::new())),
            }))
        };
        GoalConditionedAgent::new(
            &factory,
            spaces(),
            GoalProjection::slice(GoalSlice::new(0, 2)),
            concat(),
        )
        .unwrap();
    }

    #[test]
    fn factory_failure_propagates() {
        let failing = |_: &AgentSpaces| -> Result<Box<dyn Agent>, AgentError> {
            Err(AgentError::Construction {
                reason: "unsupported".into(),
            })
        };
        let err = GoalConditionedAgent::new(
            &failing,
            spaces(),
            GoalProjection::slice(GoalSlice::new(0, 2)),
            concat(),
        )
        .unwrap_err();
        assert!(matches!(err, AgentError::Construction { .. }));
    }

    #[test]
    fn feature_failure_surfaces_as_agent_error() {
        let strict: FeatureFn = Arc::new(|obs: &Batch, goals: &Batch| {
            if obs.rows() != goals.rows() {
                return Err(FeatureError::BatchSizeMismatch {
                    observations: obs.rows(),
                    goals: goals.rows(),
                });
            }
            Ok(obs.clone())
        });
        let (mut agent, log) = build(strict);
        let obs = Batch::new(vec![0.0; 6], 3).unwrap();
        let goals = Batch::from_row(vec![0.0; 2]);
        let err = agent.act(&obs, &goals).unwrap_err();
        assert_eq!(
            err,
            AgentError::Features(FeatureError::BatchSizeMismatch {
                observations: 2,
                goals: 1,
            })
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn learn_builds_both_feature_batches() {
        let (mut agent, log) = build(concat());
        let transition = GoalTransition {
            observations: Batch::from_row(vec![0.1, 0.2, 0.3]),
            actions: Batch::from_row(vec![1.0]),
            rewards: vec![-1.0],
            next_observations: Batch::from_row(vec![0.4, 0.5, 0.6]),
            goals: Batch::from_row(vec![0.0, 0.0]),
            dones: vec![false],
        };
        agent.learn(&transition).unwrap();
        let seen = log.lock().unwrap();
        assert_eq!(seen[0].as_slice(), &[0.1, 0.2, 0.3, 0.0, 0.0]);
        assert_eq!(seen[1].as_slice(), &[0.4, 0.5, 0.6, 0.0, 0.0]);
        assert!(format!("{agent:?}").contains("Echo"));
    }
}
