//! Per-episode trajectory buffer

use gridtd_core::Coordinate;

/// Cells entered during the current episode, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    cells: Vec<Coordinate>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cell entered by an action
    pub fn push(&mut self, cell: Coordinate) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.cells.last().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Coordinate> + '_ {
        self.cells.iter().copied()
    }

    /// Newest to oldest, the order [`td_backup`](crate::td_backup) consumes
    pub fn iter_rev(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().rev().copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.cells
    }
}

impl From<Vec<Coordinate>> for Trajectory {
    fn from(cells: Vec<Coordinate>) -> Self {
        Self { cells }
    }
}

impl FromIterator<Coordinate> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
