//! Integration tests for the grid-world environment model
//! Complements the inline unit tests in src/environment.rs

#![allow(clippy::float_cmp)]

use gridtd_core::{Action, Board, CellKind, Coordinate, GridWorld};

#[test]
fn test_reward_for_every_cell() {
    let world = GridWorld::standard();
    let board = world.board();

    for cell in board.cells() {
        let expected = if cell == board.win() {
            1.0
        } else if cell == board.lose() {
            -1.0
        } else {
            0.0
        };
        assert_eq!(world.reward_of(cell), expected, "reward at {cell}");
    }
}

#[test]
fn test_transition_legality_exhaustive() {
    let world = GridWorld::standard();
    let board = world.board();

    for cell in board.cells() {
        if board.classify(cell) != CellKind::Normal {
            continue;
        }
        for action in Action::ALL {
            let next = world.next_position(cell, action);
            assert!(board.contains(next), "{cell} --{action}--> {next} left the grid");
            assert!(!board.is_obstacle(next), "{cell} --{action}--> {next} entered an obstacle");
            let moved = cell.distance(next);
            assert!(moved <= 1, "{cell} --{action}--> {next} moved {moved} cells");
        }
    }
}

#[test]
fn test_rejected_moves_are_exactly_walls_and_obstacles() {
    let world = GridWorld::standard();
    let board = world.board();

    for cell in board.cells().filter(|c| !board.is_obstacle(*c)) {
        for action in Action::ALL {
            let stayed = world.next_position(cell, action) == cell;
            let blocked = match action.apply(cell) {
                Some(candidate) => !board.contains(candidate) || board.is_obstacle(candidate),
                None => true,
            };
            assert_eq!(stayed, blocked, "{cell} --{action}");
        }
    }
}

#[test]
fn test_obstacle_never_reachable() {
    let world = GridWorld::standard();
    let obstacle = Coordinate::new(1, 1);

    for neighbour in [
        Coordinate::new(0, 1),
        Coordinate::new(2, 1),
        Coordinate::new(1, 0),
        Coordinate::new(1, 2),
    ] {
        for action in Action::ALL {
            assert_ne!(world.next_position(neighbour, action), obstacle);
        }
    }
}

#[test]
fn test_custom_board_transitions() {
    let board = Board::new(
        2,
        2,
        Coordinate::new(1, 0),
        Coordinate::new(0, 1),
        Coordinate::new(1, 1),
        vec![],
    )
    .unwrap();
    let world = GridWorld::new(board);

    let start = world.start_state();
    let next = world.advance(&start, Action::Up);
    assert_eq!(next.position(), Coordinate::new(0, 0));

    let goal = world.advance(&next, Action::Right);
    assert!(goal.is_terminal(&world));
    assert_eq!(world.reward_of(goal.position()), 1.0);
}

#[test]
fn test_error_messages() {
    let err = "teleport".parse::<Action>().unwrap_err();
    assert_eq!(err.to_string(), "Invalid action: teleport");

    let c = Coordinate::new(0, 0);
    let err = Board::new(0, 0, c, c, c, vec![]).unwrap_err();
    assert!(err.to_string().starts_with("Invalid configuration:"));
}
