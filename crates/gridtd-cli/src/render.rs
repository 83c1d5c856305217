//! Text rendering of the board and value table, plus the observer that
//! writes them to the log as training runs.

use tracing::info;

use gridtd_core::{Board, CellKind, Coordinate, Marker};
use gridtd_rl::{AgentStats, AgentView, EpisodeObserver, EpisodeSummary, StepEvent, ValueSnapshot};

const VALUE_WIDTH: usize = 6;

/// Token for one cell. The cursor overlay wins over markers, markers over kinds.
fn cell_token(board: &Board, cell: Coordinate, cursor: Option<Coordinate>) -> char {
    if cursor == Some(cell) {
        return 'x';
    }
    match board.marker(cell) {
        Some(Marker::Start) => 's',
        Some(Marker::Goal) => '*',
        None => match board.classify(cell) {
            CellKind::Lose => '#',
            CellKind::Obstacle => '/',
            CellKind::Win => '*',
            CellKind::Normal => '0',
        },
    }
}

/// Board as text rows separated by rules
pub fn render_board(board: &Board, cursor: Option<Coordinate>) -> Vec<String> {
    let rule = "-".repeat(1 + board.cols() * 4);
    let mut lines = Vec::with_capacity(board.rows() * 2 + 1);

    for row in 0..board.rows() {
        lines.push(rule.clone());
        let mut out = String::from("|");
        for col in 0..board.cols() {
            out.push(' ');
            out.push(cell_token(board, Coordinate::new(row, col), cursor));
            out.push_str(" |");
        }
        lines.push(out);
    }
    lines.push(rule);

    lines
}

fn format_value(value: f64) -> String {
    // Avoid printing "-0" for values rounded to zero
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

/// Value table as text rows, each value left-justified in a fixed column
pub fn render_values(values: &ValueSnapshot) -> Vec<String> {
    let rule = "-".repeat(1 + values.cols() * (VALUE_WIDTH + 1));
    let mut lines = Vec::with_capacity(values.rows() * 2 + 1);

    for row in &values.values {
        lines.push(rule.clone());
        let mut out = String::from("|");
        for value in row {
            out.push_str(&format!("{:<width$}|", format_value(*value), width = VALUE_WIDTH));
        }
        lines.push(out);
    }
    lines.push(rule);

    lines
}

/// A greedy route as `(2, 0) -> (1, 0) -> ...`
pub fn render_route(start: Coordinate, route: &[Coordinate]) -> String {
    std::iter::once(start)
        .chain(route.iter().copied())
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn log_lines(lines: &[String]) {
    for line in lines {
        info!("{line}");
    }
}

/// Logs a transcript of training: moves, boards and values
#[derive(Debug, Clone, Copy)]
pub struct TranscriptObserver {
    render_steps: bool,
}

impl TranscriptObserver {
    pub fn new(render_steps: bool) -> Self {
        Self { render_steps }
    }
}

impl EpisodeObserver for TranscriptObserver {
    fn on_run_start(&mut self, rounds: usize, view: &AgentView<'_>) {
        info!("Training for {rounds} episodes");
        log_lines(&render_board(view.board(), Some(view.current_position())));
    }

    fn on_step(&mut self, event: &StepEvent, view: &AgentView<'_>) {
        if !self.render_steps {
            return;
        }
        let kind = if event.explored { "explore" } else { "exploit" };
        info!(
            "Current position is {}, action is {} ({kind})",
            event.from, event.action
        );
        log_lines(&render_board(view.board(), Some(event.from)));
        info!("Next state is {}", event.to);
        log_lines(&render_board(view.board(), Some(event.to)));
        log_lines(&render_values(&view.value_table_snapshot()));
        info!("");
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary, view: &AgentView<'_>) {
        info!(
            "Game end reward={} (episode {}, {} steps, {})",
            summary.reward,
            summary.episode + 1,
            summary.steps,
            summary.outcome
        );
        if self.render_steps {
            log_lines(&render_values(&view.value_table_snapshot()));
            info!("");
        }
    }

    fn on_run_end(&mut self, stats: &AgentStats, view: &AgentView<'_>) {
        info!(
            "Finished {} episodes: {} wins, {} losses, {} truncated, {:.1} steps on average",
            stats.episodes,
            stats.wins,
            stats.losses,
            stats.truncated,
            stats.average_steps()
        );
        log_lines(&render_values(&view.value_table_snapshot()));
    }
}
