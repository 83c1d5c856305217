//! Action-selection policies

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use gridtd_core::{Action, Coordinate, GridWorld};

use crate::value_table::ValueTable;

/// An action together with how it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    /// True when the action was drawn at random rather than exploited
    pub explored: bool,
}

/// Trait for action-selection rules
pub trait Policy: Send + Sync {
    /// Policy name
    fn name(&self) -> &str;

    /// Choose the next action from `position`
    fn select(
        &self,
        world: &GridWorld,
        position: Coordinate,
        values: &ValueTable,
        rng: &mut dyn RngCore,
    ) -> Decision;
}

/// Explore uniformly with probability `exploration_rate`, otherwise move to
/// the neighbour with the highest value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    exploration_rate: f64,
}

impl EpsilonGreedy {
    pub fn new(exploration_rate: f64) -> Self {
        Self { exploration_rate }
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Policy for EpsilonGreedy {
    fn name(&self) -> &str {
        "epsilon_greedy"
    }

    fn select(
        &self,
        world: &GridWorld,
        position: Coordinate,
        values: &ValueTable,
        rng: &mut dyn RngCore,
    ) -> Decision {
        // gen() is in [0, 1): a rate of 0 never explores, 1 always does
        if rng.gen::<f64>() < self.exploration_rate {
            let action = Action::ALL[rng.gen_range(0..Action::COUNT)];
            Decision {
                action,
                explored: true,
            }
        } else {
            Decision {
                action: greedy_action(world, position, values),
                explored: false,
            }
        }
    }
}

/// Action whose resulting cell has the highest value.
///
/// Actions are scanned in [`Action::ALL`] order against a negative-infinity
/// sentinel with `>=`, so among equal values the last one scanned wins.
pub fn greedy_action(world: &GridWorld, position: Coordinate, values: &ValueTable) -> Action {
    let mut best = Action::ALL[0];
    let mut best_value = f64::NEG_INFINITY;

    for action in Action::ALL {
        let value = values.get(world.next_position(position, action));
        if value >= best_value {
            best = action;
            best_value = value;
        }
    }

    best
}

/// Follow the greedy policy from `start` without learning.
///
/// Returns the cells entered, stopping at a terminal cell or after
/// `max_steps` moves.
pub fn greedy_rollout(
    world: &GridWorld,
    values: &ValueTable,
    start: Coordinate,
    max_steps: usize,
) -> Vec<Coordinate> {
    let mut path = Vec::new();
    let mut position = start;

    while path.len() < max_steps && !world.is_terminal(position) {
        position = world.next_position(position, greedy_action(world, position, values));
        path.push(position);
    }

    path
}
