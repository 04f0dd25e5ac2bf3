//! Heuristic AI: move enumeration, race-aware scoring and greedy commit.
//!
//! ## Decision procedure
//!
//! 1. Compare lore velocities to pick a `Strategy`
//! 2. Enumerate and score every candidate action
//! 3. Commit the highest score (ties go to enumeration order)

pub mod candidates;
pub mod config;
pub mod search;
pub mod strategy;

pub use candidates::{Candidate, Scorer};
pub use config::HeuristicWeights;
pub use search::{AiMove, HeuristicAi, PassPolicy, Policy};
pub use strategy::{Strategy, StrategyWeights};
