//! Training command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use gridtd_core::Coordinate;
use gridtd_rl::{Agent, AgentConfig, AgentStats, ValueSnapshot};

use crate::render::{render_route, render_values, TranscriptObserver};
use crate::settings::Settings;

#[derive(Args, Debug, Default)]
pub struct TrainArgs {
    /// Number of episodes to run
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// TD step size
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Probability of a random action
    #[arg(long)]
    pub exploration_rate: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Truncate episodes after this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Also write the log to this file
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Only log episode results, not every move
    #[arg(long)]
    pub no_render: bool,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

impl TrainArgs {
    /// Layer command-line flags over loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        let agent = &mut settings.agent;
        if let Some(rounds) = self.rounds {
            agent.rounds = rounds;
        }
        if let Some(rate) = self.learning_rate {
            agent.learning_rate = rate;
        }
        if let Some(rate) = self.exploration_rate {
            agent.exploration_rate = rate;
        }
        if let Some(seed) = self.seed {
            agent.seed = Some(seed);
        }
        if let Some(max_steps) = self.max_steps {
            agent.max_steps_per_episode = Some(max_steps);
        }

        let output = &mut settings.output;
        if let Some(path) = &self.transcript {
            output.transcript = Some(path.clone());
        }
        if self.no_render {
            output.render_steps = false;
        }
        if self.json {
            output.json = true;
        }
    }
}

/// Final result of a training run
#[derive(Debug, Serialize)]
pub struct TrainReport {
    pub config: AgentConfig,
    pub stats: AgentStats,
    pub win_rate: f64,
    pub values: ValueSnapshot,
    pub start: Coordinate,
    pub route: Vec<Coordinate>,
    pub route_reaches_goal: bool,
}

pub fn train(settings: &Settings) -> Result<TrainReport> {
    if settings.agent.needs_step_cap() {
        warn!(
            cap = AgentConfig::DEFAULT_STEP_CAP,
            "No exploration and no step cap set, capping episodes"
        );
    }
    let config = settings.agent.clone().bounded();
    let mut agent = Agent::new(config).context("Invalid agent configuration")?;
    info!(
        rounds = agent.config().rounds,
        learning_rate = agent.config().learning_rate,
        exploration_rate = agent.config().exploration_rate,
        seed = ?agent.config().seed,
        max_steps = ?agent.config().max_steps_per_episode,
        "Starting training"
    );

    let mut observer = TranscriptObserver::new(settings.output.render_steps);
    let values = agent.train(&mut observer);

    let route = agent.rollout(settings.output.rollout_steps);
    let route_reaches_goal = route.last() == Some(&agent.world().board().win());

    Ok(TrainReport {
        config: agent.config().clone(),
        stats: agent.stats().clone(),
        win_rate: agent.stats().win_rate(),
        values,
        start: agent.world().board().start(),
        route,
        route_reaches_goal,
    })
}

pub fn run(settings: &Settings) -> Result<()> {
    let report = train(settings)?;

    if settings.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Learned values after {} episodes:", report.stats.episodes);
    for line in render_values(&report.values) {
        println!("{line}");
    }
    println!();
    println!(
        "Wins: {}  Losses: {}  Truncated: {}  Win rate: {:.1}%  Avg steps: {:.1}",
        report.stats.wins,
        report.stats.losses,
        report.stats.truncated,
        report.win_rate * 100.0,
        report.stats.average_steps()
    );
    println!("Greedy route: {}", render_route(report.start, &report.route));
    if !report.route_reaches_goal {
        println!("(greedy route does not reach the goal yet)");
    }

    Ok(())
}
