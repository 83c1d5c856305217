//! Backward TD(0) value propagation

use tracing::{trace, warn};

use gridtd_core::{Coordinate, Reward};

use crate::value_table::{round_to, ValueTable};

/// Propagate a terminal reward back through an episode.
///
/// The terminal cell takes `reward` outright. Each visited cell, newest
/// first, then moves `learning_rate` of the way toward the running return,
/// and its new value becomes the running return for the cell before it.
/// Stored values are rounded to `precision` places; the running return is
/// carried unrounded.
///
/// Cells outside the table are skipped with a warning.
///
/// Returns the number of trajectory updates applied.
pub fn td_backup<I>(
    values: &mut ValueTable,
    newest_first: I,
    terminal: Coordinate,
    reward: Reward,
    learning_rate: f64,
    precision: u32,
) -> usize
where
    I: IntoIterator<Item = Coordinate>,
{
    if !values.set(terminal, reward) {
        warn!(%terminal, "Terminal cell outside the value table");
    }

    let mut running = reward;
    let mut applied = 0;
    for cell in newest_first {
        let current = values.get(cell);
        running = current + learning_rate * (running - current);
        if values.set(cell, round_to(running, precision)) {
            applied += 1;
            trace!(%cell, value = running, "td backup");
        } else {
            warn!(%cell, "Trajectory cell outside the value table");
        }
    }

    applied
}
