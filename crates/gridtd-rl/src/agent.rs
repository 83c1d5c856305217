//! Agent - epsilon-greedy policy, trajectory recording and the episode loop

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use gridtd_core::{CellKind, Coordinate, EnvState, GridWorld, Result};

use crate::config::AgentConfig;
use crate::learning::td_backup;
use crate::observer::{
    AgentView, EpisodeObserver, EpisodeSummary, NoopObserver, Outcome, StepEvent,
};
use crate::policy::{greedy_rollout, Decision, EpsilonGreedy, Policy};
use crate::trajectory::Trajectory;
use crate::value_table::{ValueSnapshot, ValueTable};

/// Tabular TD(0) agent bound to one grid world.
///
/// The value table is the only state that survives an episode reset.
pub struct Agent {
    world: GridWorld,
    config: AgentConfig,
    policy: Box<dyn Policy>,
    values: ValueTable,
    trajectory: Trajectory,
    state: EnvState,
    rng: StdRng,
    episode_steps: usize,
    stats: AgentStats,
}

impl Agent {
    /// Create an agent on the standard board
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_world(GridWorld::standard(), config)
    }

    /// Create an agent on a specific world
    pub fn with_world(world: GridWorld, config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let values = ValueTable::for_board(world.board());
        let state = world.start_state();

        Ok(Self {
            policy: Box::new(EpsilonGreedy::new(config.exploration_rate)),
            world,
            config,
            values,
            trajectory: Trajectory::new(),
            state,
            rng,
            episode_steps: 0,
            stats: AgentStats::default(),
        })
    }

    /// Replace the action-selection policy
    pub fn with_policy(mut self, policy: Box<dyn Policy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn current_position(&self) -> Coordinate {
        self.state.position()
    }

    pub fn is_episode_terminal(&self) -> bool {
        self.state.is_terminal(&self.world)
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn value_table_snapshot(&self) -> ValueSnapshot {
        self.values.snapshot()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn episodes_completed(&self) -> usize {
        self.stats.episodes
    }

    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    /// Read-only view for observers and renderers
    pub fn view(&self) -> AgentView<'_> {
        AgentView {
            world: &self.world,
            position: self.state.position(),
            values: &self.values,
        }
    }

    /// Pick the next action from the current position
    pub fn choose_action(&mut self) -> Decision {
        self.policy
            .select(&self.world, self.state.position(), &self.values, &mut self.rng)
    }

    /// Take one action. Does nothing and returns `None` when the current
    /// state is terminal; that state only leaves through `finish_episode`.
    pub fn step(&mut self, observer: &mut dyn EpisodeObserver) -> Option<StepEvent> {
        if self.is_episode_terminal() {
            return None;
        }

        let from = self.state.position();
        let decision = self.choose_action();
        let next = self.world.advance(&self.state, decision.action);

        self.trajectory.push(next.position());
        self.state = next;
        self.episode_steps += 1;
        self.stats.total_steps += 1;

        let event = StepEvent {
            episode: self.stats.episodes,
            step: self.episode_steps,
            from,
            action: decision.action,
            to: next.position(),
            explored: decision.explored,
        };
        observer.on_step(&event, &self.view());

        Some(event)
    }

    /// Back up the terminal reward and start the next episode. Returns
    /// `None` when the current state is not terminal.
    pub fn finish_episode(
        &mut self,
        observer: &mut dyn EpisodeObserver,
    ) -> Option<EpisodeSummary> {
        if !self.is_episode_terminal() {
            return None;
        }

        let terminal = self.state.position();
        let reward = self.world.reward_of(terminal);
        let outcome = match self.world.board().classify(terminal) {
            CellKind::Win => Outcome::Win,
            _ => Outcome::Lose,
        };

        let updates = td_backup(
            &mut self.values,
            self.trajectory.iter_rev(),
            terminal,
            reward,
            self.config.learning_rate,
            self.config.precision,
        );
        debug!(%terminal, reward, updates, "Backed up episode");

        Some(self.close_episode(outcome, reward, observer))
    }

    /// Advance the episode loop by one iteration: a step while running, or
    /// the backup and reset once terminal. Returns the summary whenever an
    /// episode ends, including truncation at the step cap.
    pub fn tick(&mut self, observer: &mut dyn EpisodeObserver) -> Option<EpisodeSummary> {
        if self.is_episode_terminal() {
            return self.finish_episode(observer);
        }

        self.step(observer);

        let cap = self.config.max_steps_per_episode;
        match cap {
            Some(cap) if self.episode_steps >= cap && !self.is_episode_terminal() => {
                debug!(cap, position = %self.current_position(), "Episode truncated");
                Some(self.close_episode(Outcome::Truncated, 0.0, observer))
            }
            _ => None,
        }
    }

    /// Abandon the current episode without learning from it
    pub fn reset(&mut self) {
        self.state = self.world.start_state();
        self.trajectory.clear();
        self.episode_steps = 0;
    }

    /// Run `rounds` complete episodes and return the resulting values
    pub fn run(&mut self, rounds: usize) -> ValueSnapshot {
        self.run_with_observer(rounds, &mut NoopObserver)
    }

    /// Run `rounds` complete episodes, reporting progress to `observer`
    pub fn run_with_observer(
        &mut self,
        rounds: usize,
        observer: &mut dyn EpisodeObserver,
    ) -> ValueSnapshot {
        observer.on_run_start(rounds, &self.view());

        let target = self.stats.episodes + rounds;
        while self.stats.episodes < target {
            self.tick(observer);
        }

        info!(
            episodes = rounds,
            total_episodes = self.stats.episodes,
            policy = self.policy.name(),
            "Run complete"
        );
        observer.on_run_end(&self.stats, &self.view());

        self.values.snapshot()
    }

    /// Run the configured number of rounds
    pub fn train(&mut self, observer: &mut dyn EpisodeObserver) -> ValueSnapshot {
        self.run_with_observer(self.config.rounds, observer)
    }

    /// Greedy path from the start cell over the current values
    pub fn rollout(&self, max_steps: usize) -> Vec<Coordinate> {
        greedy_rollout(&self.world, &self.values, self.world.board().start(), max_steps)
    }

    fn close_episode(
        &mut self,
        outcome: Outcome,
        reward: f64,
        observer: &mut dyn EpisodeObserver,
    ) -> EpisodeSummary {
        let summary = EpisodeSummary {
            episode: self.stats.episodes,
            outcome,
            reward,
            steps: self.episode_steps,
        };
        self.stats.record(outcome);
        observer.on_episode_end(&summary, &self.view());

        self.reset();
        summary
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("policy", &self.policy.name())
            .field("config", &self.config)
            .field("position", &self.state.position())
            .field("episode_steps", &self.episode_steps)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Agent statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AgentStats {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub truncated: usize,
    pub total_steps: usize,
}

impl AgentStats {
    fn record(&mut self, outcome: Outcome) {
        self.episodes += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Truncated => self.truncated += 1,
        }
    }

    pub fn average_steps(&self) -> f64 {
        if self.episodes > 0 {
            self.total_steps as f64 / self.episodes as f64
        } else {
            0.0
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.episodes > 0 {
            self.wins as f64 / self.episodes as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridtd_core::Action;
    use rand::RngCore;

    /// Always picks the same action
    struct Fixed(Action);

    impl Policy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn select(
            &self,
            _: &GridWorld,
            _: Coordinate,
            _: &ValueTable,
            _: &mut dyn RngCore,
        ) -> Decision {
            Decision {
                action: self.0,
                explored: false,
            }
        }
    }

    fn seeded() -> AgentConfig {
        AgentConfig::default().with_seed(42)
    }

    #[test]
    fn test_agent_creation() {
        let agent = Agent::new(seeded()).unwrap();
        assert_eq!(agent.current_position(), Coordinate::new(2, 0));
        assert!(!agent.is_episode_terminal());
        assert_eq!(agent.episodes_completed(), 0);
        assert_eq!(agent.policy_name(), "epsilon_greedy");
        assert!(agent.trajectory().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = Agent::new(AgentConfig::default().with_exploration_rate(1.2));
        assert!(matches!(
            result,
            Err(gridtd_core::GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_step_records_trajectory() {
        let mut agent = Agent::new(seeded())
            .unwrap()
            .with_policy(Box::new(Fixed(Action::Up)));

        let event = agent.step(&mut NoopObserver).unwrap();
        assert_eq!(event.from, Coordinate::new(2, 0));
        assert_eq!(event.to, Coordinate::new(1, 0));
        assert_eq!(event.step, 1);
        assert_eq!(agent.current_position(), Coordinate::new(1, 0));
        assert_eq!(agent.trajectory().as_slice(), &[Coordinate::new(1, 0)]);
    }

    #[test]
    fn test_rejected_move_still_recorded() {
        let mut agent = Agent::new(seeded())
            .unwrap()
            .with_policy(Box::new(Fixed(Action::Down)));

        agent.step(&mut NoopObserver);
        assert_eq!(agent.current_position(), Coordinate::new(2, 0));
        assert_eq!(agent.trajectory().as_slice(), &[Coordinate::new(2, 0)]);
    }

    #[test]
    fn test_finish_episode_requires_terminal() {
        let mut agent = Agent::new(seeded()).unwrap();
        assert!(agent.finish_episode(&mut NoopObserver).is_none());
        assert_eq!(agent.episodes_completed(), 0);
    }

    #[test]
    fn test_scripted_win_backs_up_and_resets() {
        let mut agent = Agent::new(seeded())
            .unwrap()
            .with_policy(Box::new(Fixed(Action::Up)));

        // (2,0) -> (1,0) -> (0,0)
        agent.step(&mut NoopObserver);
        agent.step(&mut NoopObserver);
        let mut agent = agent.with_policy(Box::new(Fixed(Action::Right)));
        // (0,0) -> (0,1) -> (0,2) -> (0,3)
        for _ in 0..3 {
            agent.step(&mut NoopObserver);
        }
        assert!(agent.is_episode_terminal());
        assert!(agent.step(&mut NoopObserver).is_none());

        let summary = agent.finish_episode(&mut NoopObserver).unwrap();
        assert_eq!(summary.outcome, Outcome::Win);
        assert_eq!(summary.reward, 1.0);
        assert_eq!(summary.steps, 5);
        assert_eq!(summary.episode, 0);

        let values = agent.values();
        assert_eq!(values.get(Coordinate::new(0, 3)), 1.0);
        assert_eq!(values.get(Coordinate::new(0, 2)), 0.2);
        assert_eq!(values.get(Coordinate::new(0, 1)), 0.04);
        assert_eq!(values.get(Coordinate::new(0, 0)), 0.008);
        assert_eq!(values.get(Coordinate::new(1, 0)), 0.002);

        assert_eq!(agent.current_position(), Coordinate::new(2, 0));
        assert!(agent.trajectory().is_empty());
        assert_eq!(agent.episodes_completed(), 1);
        assert_eq!(agent.stats().wins, 1);
    }

    #[test]
    fn test_truncation_at_step_cap() {
        let config = seeded().with_max_steps(3);
        let mut agent = Agent::new(config)
            .unwrap()
            .with_policy(Box::new(Fixed(Action::Down)));

        assert!(agent.tick(&mut NoopObserver).is_none());
        assert!(agent.tick(&mut NoopObserver).is_none());
        let summary = agent.tick(&mut NoopObserver).unwrap();

        assert_eq!(summary.outcome, Outcome::Truncated);
        assert_eq!(summary.steps, 3);
        assert_eq!(agent.stats().truncated, 1);
        assert!(agent.trajectory().is_empty());
        assert!(agent.values().iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_stats_averages() {
        let stats = AgentStats {
            episodes: 4,
            wins: 3,
            losses: 1,
            truncated: 0,
            total_steps: 20,
        };
        assert_eq!(stats.average_steps(), 5.0);
        assert_eq!(stats.win_rate(), 0.75);
        assert_eq!(AgentStats::default().average_steps(), 0.0);
    }

    #[test]
    fn test_zero_rounds_is_a_no_op() {
        let mut agent = Agent::new(seeded()).unwrap();
        let snapshot = agent.run(0);
        assert_eq!(agent.episodes_completed(), 0);
        assert!(snapshot.iter().all(|(_, v)| v == 0.0));
    }
}
