//! Observer seam for the episode loop
//!
//! Observers receive step and episode events from [`Agent`](crate::Agent)
//! together with a read-only view of the agent, so rendering and logging
//! stay outside the learning core.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gridtd_core::{Action, Board, Coordinate, GridWorld, Reward};

use crate::agent::AgentStats;
use crate::value_table::{ValueSnapshot, ValueTable};

/// One move inside an episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Zero-based episode index
    pub episode: usize,
    /// One-based step number within the episode
    pub step: usize,
    pub from: Coordinate,
    pub action: Action,
    pub to: Coordinate,
    pub explored: bool,
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    /// Step cap reached before a terminal cell
    Truncated,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
            Outcome::Truncated => write!(f, "truncated"),
        }
    }
}

/// Result of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub outcome: Outcome,
    pub reward: Reward,
    pub steps: usize,
}

/// Read-only view of an agent, handed to observers
#[derive(Debug, Clone, Copy)]
pub struct AgentView<'a> {
    pub(crate) world: &'a GridWorld,
    pub(crate) position: Coordinate,
    pub(crate) values: &'a ValueTable,
}

impl AgentView<'_> {
    pub fn board(&self) -> &Board {
        self.world.board()
    }

    pub fn current_position(&self) -> Coordinate {
        self.position
    }

    pub fn is_episode_terminal(&self) -> bool {
        self.world.is_terminal(self.position)
    }

    pub fn values(&self) -> &ValueTable {
        self.values
    }

    pub fn value_table_snapshot(&self) -> ValueSnapshot {
        self.values.snapshot()
    }
}

/// Callbacks fired by the episode loop. Every method defaults to a no-op.
pub trait EpisodeObserver {
    fn on_run_start(&mut self, _rounds: usize, _view: &AgentView<'_>) {}

    fn on_step(&mut self, _event: &StepEvent, _view: &AgentView<'_>) {}

    fn on_episode_end(&mut self, _summary: &EpisodeSummary, _view: &AgentView<'_>) {}

    fn on_run_end(&mut self, _stats: &AgentStats, _view: &AgentView<'_>) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}

/// Observer that emits structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EpisodeObserver for TracingObserver {
    fn on_run_start(&mut self, rounds: usize, view: &AgentView<'_>) {
        info!(rounds, start = %view.current_position(), "Training started");
    }

    fn on_step(&mut self, event: &StepEvent, _view: &AgentView<'_>) {
        debug!(
            episode = event.episode,
            step = event.step,
            from = %event.from,
            action = %event.action,
            to = %event.to,
            explored = event.explored,
            "step"
        );
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary, _view: &AgentView<'_>) {
        info!(
            episode = summary.episode,
            outcome = %summary.outcome,
            reward = summary.reward,
            steps = summary.steps,
            "Episode finished"
        );
    }

    fn on_run_end(&mut self, stats: &AgentStats, _view: &AgentView<'_>) {
        info!(
            episodes = stats.episodes,
            wins = stats.wins,
            losses = stats.losses,
            truncated = stats.truncated,
            "Training finished"
        );
    }
}
