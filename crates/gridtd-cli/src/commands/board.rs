//! Board layout display

use anyhow::Result;

use gridtd_core::GridWorld;

use crate::render::render_board;

pub fn run() -> Result<()> {
    let world = GridWorld::standard();
    let board = world.board();

    println!("Board ({}x{})", board.rows(), board.cols());
    for line in render_board(board, None) {
        println!("{line}");
    }
    println!();
    println!("  s  start {}", board.start());
    println!("  *  win {} (reward {})", board.win(), world.reward_of(board.win()));
    println!("  #  lose {} (reward {})", board.lose(), world.reward_of(board.lose()));
    for obstacle in board.obstacles() {
        println!("  /  obstacle {obstacle}");
    }

    Ok(())
}
