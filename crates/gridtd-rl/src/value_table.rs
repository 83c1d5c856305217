//! State-value table

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use gridtd_core::{Board, Coordinate};

/// One value estimate per grid cell, zero-initialised
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Array2<f64>,
}

impl ValueTable {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            values: Array2::zeros((rows, cols)),
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.rows(), board.cols())
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `coord`; cells outside the table read as 0
    pub fn get(&self, coord: Coordinate) -> f64 {
        self.values.get((coord.row, coord.col)).copied().unwrap_or(0.0)
    }

    /// Overwrite the value at `coord`. Returns false when the cell is outside the table.
    pub fn set(&mut self, coord: Coordinate, value: f64) -> bool {
        match self.values.get_mut((coord.row, coord.col)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Row-major `(cell, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, f64)> + '_ {
        self.values
            .indexed_iter()
            .map(|((row, col), value)| (Coordinate::new(row, col), *value))
    }

    /// Owned copy, detached from further learning
    pub fn snapshot(&self) -> ValueSnapshot {
        ValueSnapshot {
            values: self.values.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// Read-only copy of a value table, safe to format or serialise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    pub values: Vec<Vec<f64>>,
}

impl ValueSnapshot {
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn get(&self, coord: Coordinate) -> Option<f64> {
        self.values.get(coord.row)?.get(coord.col).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, f64)> + '_ {
        self.values.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .map(move |(col, value)| (Coordinate::new(row, col), *value))
        })
    }
}

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
