//! Agent configuration

use serde::{Deserialize, Serialize};

use gridtd_core::{GridError, Result};

/// Learning parameters for an [`Agent`](crate::Agent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Step size of the TD backup
    pub learning_rate: f64,
    /// Probability of taking a uniformly random action
    pub exploration_rate: f64,
    /// Episodes per `run`
    pub rounds: usize,
    /// RNG seed; `None` seeds from the OS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Decimal places kept in the value table after each update
    pub precision: u32,
    /// Truncate an episode after this many steps; `None` runs until terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps_per_episode: Option<usize>,
}

impl AgentConfig {
    pub const MAX_PRECISION: u32 = 10;
    /// Step cap applied by [`bounded`](Self::bounded) when none is set
    pub const DEFAULT_STEP_CAP: usize = 100;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = Some(max_steps);
        self
    }

    /// A purely greedy agent can walk into a wall forever, so it needs a
    /// step cap for episodes to end
    pub fn needs_step_cap(&self) -> bool {
        self.exploration_rate == 0.0 && self.max_steps_per_episode.is_none()
    }

    /// Fill in [`DEFAULT_STEP_CAP`](Self::DEFAULT_STEP_CAP) when
    /// [`needs_step_cap`](Self::needs_step_cap) holds
    pub fn bounded(mut self) -> Self {
        if self.needs_step_cap() {
            self.max_steps_per_episode = Some(Self::DEFAULT_STEP_CAP);
        }
        self
    }

    /// Check every parameter, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("learning_rate", self.learning_rate)?;
        check_unit_interval("exploration_rate", self.exploration_rate)?;

        if self.precision > Self::MAX_PRECISION {
            return Err(GridError::InvalidConfiguration(format!(
                "precision must be at most {}, got {}",
                Self::MAX_PRECISION,
                self.precision
            )));
        }
        if self.max_steps_per_episode == Some(0) {
            return Err(GridError::InvalidConfiguration(
                "max_steps_per_episode must be positive".to_string(),
            ));
        }
        if self.needs_step_cap() {
            return Err(GridError::InvalidConfiguration(
                "exploration_rate 0 requires max_steps_per_episode".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GridError::InvalidConfiguration(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            exploration_rate: 0.3,
            rounds: 10,
            seed: None,
            precision: 3,
            max_steps_per_episode: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.exploration_rate, 0.3);
        assert_eq!(config.rounds, 10);
        assert_eq!(config.precision, 3);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_exploration_rate_bounds() {
        assert!(AgentConfig::default()
            .with_exploration_rate(0.0)
            .with_max_steps(10)
            .validate()
            .is_ok());
        assert!(AgentConfig::default().with_exploration_rate(1.0).validate().is_ok());

        let err = AgentConfig::default()
            .with_exploration_rate(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("exploration_rate"));

        assert!(AgentConfig::default().with_exploration_rate(-0.1).validate().is_err());
        assert!(AgentConfig::default()
            .with_exploration_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_learning_rate_bounds() {
        assert!(AgentConfig::default().with_learning_rate(2.0).validate().is_err());
        assert!(AgentConfig::default()
            .with_learning_rate(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_greedy_without_step_cap_rejected() {
        let config = AgentConfig::default().with_exploration_rate(0.0);
        assert!(config.needs_step_cap());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, GridError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("max_steps_per_episode"));
    }

    #[test]
    fn test_bounded_fills_step_cap_only_when_needed() {
        let greedy = AgentConfig::default().with_exploration_rate(0.0).bounded();
        assert_eq!(greedy.max_steps_per_episode, Some(AgentConfig::DEFAULT_STEP_CAP));
        assert!(greedy.validate().is_ok());

        let capped = AgentConfig::default()
            .with_exploration_rate(0.0)
            .with_max_steps(7)
            .bounded();
        assert_eq!(capped.max_steps_per_episode, Some(7));

        assert_eq!(AgentConfig::default().bounded().max_steps_per_episode, None);
    }

    #[test]
    fn test_zero_step_cap_rejected() {
        assert!(AgentConfig::default().with_max_steps(0).validate().is_err());
        assert!(AgentConfig::default().with_max_steps(1).validate().is_ok());
    }

    #[test]
    fn test_precision_cap() {
        let config = AgentConfig {
            precision: 11,
            ..AgentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"rounds": 50, "seed": 7}"#).unwrap();
        assert_eq!(config.rounds, 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.learning_rate, 0.2);
    }

    #[test]
    fn test_negative_rounds_rejected_on_deserialize() {
        let result: std::result::Result<AgentConfig, _> = serde_json::from_str(r#"{"rounds": -1}"#);
        assert!(result.is_err());
    }
}
