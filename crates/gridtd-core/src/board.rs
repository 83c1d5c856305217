//! Board layout

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{CellKind, Coordinate, Marker};

/// Fixed grid topology: dimensions, start cell, terminal cells and obstacles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    start: Coordinate,
    win: Coordinate,
    lose: Coordinate,
    obstacles: Vec<Coordinate>,
}

impl Board {
    pub const STANDARD_ROWS: usize = 3;
    pub const STANDARD_COLS: usize = 4;

    /// The reference 3x4 layout
    pub fn standard() -> Self {
        Self {
            rows: Self::STANDARD_ROWS,
            cols: Self::STANDARD_COLS,
            start: Coordinate::new(2, 0),
            win: Coordinate::new(0, 3),
            lose: Coordinate::new(1, 3),
            obstacles: vec![Coordinate::new(1, 1)],
        }
    }

    /// Build a validated layout
    pub fn new(
        rows: usize,
        cols: usize,
        start: Coordinate,
        win: Coordinate,
        lose: Coordinate,
        obstacles: Vec<Coordinate>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }

        let board = Self {
            rows,
            cols,
            start,
            win,
            lose,
            obstacles,
        };

        for (name, cell) in [("start", start), ("win", win), ("lose", lose)] {
            if !board.contains(cell) {
                return Err(GridError::InvalidConfiguration(format!(
                    "{name} cell {cell} is outside the {rows}x{cols} grid"
                )));
            }
            if board.is_obstacle(cell) {
                return Err(GridError::InvalidConfiguration(format!(
                    "{name} cell {cell} is an obstacle"
                )));
            }
        }
        if let Some(outside) = board.obstacles.iter().find(|c| !board.contains(**c)) {
            return Err(GridError::InvalidConfiguration(format!(
                "obstacle {outside} is outside the {rows}x{cols} grid"
            )));
        }
        if win == lose {
            return Err(GridError::InvalidConfiguration(format!(
                "win and lose cells must differ, both are {win}"
            )));
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn win(&self) -> Coordinate {
        self.win
    }

    pub fn lose(&self) -> Coordinate {
        self.lose
    }

    pub fn obstacles(&self) -> &[Coordinate] {
        &self.obstacles
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn is_obstacle(&self, coord: Coordinate) -> bool {
        self.obstacles.contains(&coord)
    }

    pub fn classify(&self, coord: Coordinate) -> CellKind {
        if coord == self.win {
            CellKind::Win
        } else if coord == self.lose {
            CellKind::Lose
        } else if self.is_obstacle(coord) {
            CellKind::Obstacle
        } else {
            CellKind::Normal
        }
    }

    /// Render-only annotation for a cell
    pub fn marker(&self, coord: Coordinate) -> Option<Marker> {
        if coord == self.start {
            Some(Marker::Start)
        } else if coord == self.win {
            Some(Marker::Goal)
        } else {
            None
        }
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coordinate::new(row, col)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
