//! Deterministic reward and transition model

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::types::{Action, CellKind, Coordinate, Reward};

/// Reward and transition model over a fixed board. Holds no agent state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridWorld {
    board: Board,
}

impl GridWorld {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn standard() -> Self {
        Self::new(Board::standard())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// +1 on the win cell, -1 on the lose cell, 0 everywhere else
    pub fn reward_of(&self, position: Coordinate) -> Reward {
        match self.board.classify(position) {
            CellKind::Win => 1.0,
            CellKind::Lose => -1.0,
            CellKind::Normal | CellKind::Obstacle => 0.0,
        }
    }

    pub fn is_terminal(&self, position: Coordinate) -> bool {
        self.board.classify(position).is_terminal()
    }

    /// Where `action` leads from `current`. Moves that leave the grid or
    /// enter an obstacle are absorbed: the agent stays put.
    pub fn next_position(&self, current: Coordinate, action: Action) -> Coordinate {
        match action.apply(current) {
            Some(candidate) if self.board.contains(candidate) && !self.board.is_obstacle(candidate) => {
                candidate
            }
            _ => {
                trace!(%current, %action, "move rejected");
                current
            }
        }
    }

    /// Fresh state at the start cell
    pub fn start_state(&self) -> EnvState {
        EnvState::new(self.board.start())
    }

    /// State reached by taking `action` from `state`. The input is left untouched.
    pub fn advance(&self, state: &EnvState, action: Action) -> EnvState {
        EnvState::new(self.next_position(state.position(), action))
    }
}

/// Where the agent currently stands within an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvState {
    position: Coordinate,
}

impl EnvState {
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn is_terminal(&self, world: &GridWorld) -> bool {
        world.is_terminal(self.position)
    }
}
