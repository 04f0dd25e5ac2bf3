//! # deckforge
//!
//! A rules engine, heuristic AI and batch simulator for a two-player
//! lore-racing trading card game.
//!
//! ## Design Principles
//!
//! 1. **Value Semantics**: Every rules operation takes a `GameState` and
//!    returns a new one. Callers keep the old state for undo, replay or
//!    speculative probing.
//!
//! 2. **Shared Immutable Data**: Card templates live behind `Arc` and are
//!    never mutated during a match. Zones are persistent `im` vectors, so
//!    cloning a state is cheap.
//!
//! 3. **Abilities as Data**: Card behaviour is looked up by card key in an
//!    `AbilityRegistry` of pure hook functions. Unregistered cards are
//!    vanilla.
//!
//! ## Architecture
//!
//! - **Two-sided perspective**: The side to move is always `active`. The
//!   opponent's turn and opponent hooks run by swapping perspective.
//!
//! - **Deterministic simulation**: Each simulated match gets its own random
//!   stream derived from the batch seed, so batches reproduce in parallel.
//!
//! ## Modules
//!
//! - `core`: Ids, sides, state, actions, RNG, rules configuration, errors
//! - `cards`: Templates, instances, the card pool, deck manifests
//! - `abilities`: Hook registry and the built-in abilities
//! - `rules`: Turn sequence, actions, banish sweep, lore velocity
//! - `ai`: Race-aware heuristic move selection
//! - `sim`: Batch Monte-Carlo simulation and reporting

pub mod abilities;
pub mod ai;
pub mod cards;
pub mod core;
pub mod rules;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Action, GameRng, GameState, IllegalAction, InstanceId, Phase, PlayerState, RulesConfig, Side, Zone,
};

pub use crate::cards::{CardInstance, CardKey, CardPool, CardTemplate, CardType, DeckManifest};

pub use crate::abilities::{AbilityRegistry, CardAbilities, Hook, TargetRule};

pub use crate::rules::Engine;

pub use crate::ai::{AiMove, HeuristicAi, HeuristicWeights, Policy, Strategy};

pub use crate::sim::{BatchConfig, BatchReport, DeckSource, MatchResult, Simulator};
