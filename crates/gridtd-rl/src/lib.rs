//! gridtd RL - tabular TD(0) value learning for the grid world
//!
//! This crate provides the value table, trajectory buffer, epsilon-greedy
//! policy and the episode driver that ties them to a [`gridtd_core::GridWorld`].

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod config;
pub mod learning;
pub mod observer;
pub mod policy;
pub mod trajectory;
pub mod value_table;

pub use agent::{Agent, AgentStats};
pub use config::AgentConfig;
pub use learning::td_backup;
pub use observer::{
    AgentView, EpisodeObserver, EpisodeSummary, NoopObserver, Outcome, StepEvent, TracingObserver,
};
pub use policy::{greedy_action, greedy_rollout, Decision, EpsilonGreedy, Policy};
pub use trajectory::Trajectory;
pub use value_table::{round_to, ValueSnapshot, ValueTable};
