//! gridtd Core - grid-world types and environment model
//!
//! This crate provides the board layout, coordinate and action types, and the
//! deterministic reward/transition model used by the learning agent.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod environment;
pub mod error;
pub mod types;

pub use board::Board;
pub use environment::{EnvState, GridWorld};
pub use error::{GridError, Result};
pub use types::{Action, CellKind, Coordinate, Marker, Reward};
