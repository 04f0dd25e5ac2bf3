//! Greedy one-ply decision making.
//!
//! `HeuristicAi` scores every candidate for the side to move and commits
//! the best one. Scoring only reads the state or probes clones of it; the
//! state handed in is never modified.
//!
//! ## Perspective
//!
//! - `decide` moves for the `active` side
//! - `generate_ai_move` moves for the `opposing` side: it swaps perspective,
//!   decides, and swaps back, so the result keeps the caller's labels
//!
//! ```
//! use deckforge::ai::HeuristicAi;
//! use deckforge::core::GameState;
//!
//! let ai = HeuristicAi::default();
//! let result = ai.decide(&GameState::new());
//! assert!(result.action.is_none());
//! assert!(result.rationale.contains("No valid moves"));
//! ```

use crate::core::{Action, GameState};
use crate::rules::{velocity, Engine};

use super::candidates::{Candidate, Scorer};
use super::config::HeuristicWeights;
use super::strategy::Strategy;

/// Outcome of one AI decision.
#[derive(Clone, Debug, PartialEq)]
pub struct AiMove {
    /// State after the committed action (unchanged if there was none).
    pub state: GameState,

    /// Human-readable explanation.
    pub rationale: String,

    /// The committed action, if any.
    pub action: Option<Action>,

    /// Score of the committed action.
    pub score: Option<f64>,
}

impl AiMove {
    /// Did the AI pass?
    #[must_use]
    pub fn passed(&self) -> bool {
        self.action.is_none()
    }
}

/// A move-selection strategy for the side to move.
///
/// Implementations must be deterministic for a given state so that batch
/// runs reproduce.
pub trait Policy: Send + Sync {
    /// Decide for the active side of `state`.
    fn decide(&self, state: &GameState) -> AiMove;
}

/// Heuristic, race-aware greedy AI.
#[derive(Clone, Debug, Default)]
pub struct HeuristicAi {
    engine: Engine,
    weights: HeuristicWeights,
}

impl HeuristicAi {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            weights: HeuristicWeights::default(),
        }
    }

    /// Replace the scoring weights (builder pattern).
    #[must_use]
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Ranked candidates for the active side, best first.
    #[must_use]
    pub fn candidates(&self, state: &GameState) -> Vec<Candidate> {
        let race = Strategy::for_state(state).weights(self.weights.race_factor);
        Scorer::new(&self.engine, &self.weights, race).ranked(state)
    }

    /// Commit the best action for the active side.
    #[must_use]
    pub fn decide(&self, state: &GameState) -> AiMove {
        let strategy = Strategy::for_state(state);
        let ranked = self.candidates(state);

        let Some(best) = ranked.first() else {
            return AiMove {
                state: state.clone(),
                rationale: "[AI] No valid moves available. Turn passed.".to_string(),
                action: None,
                score: None,
            };
        };

        let next = self.engine.apply(state, &best.action);
        let rationale = format!(
            "[AI] {}\n[AI] Heuristics: selected score {:.1} over {} other options ({}).",
            best.description,
            best.score,
            ranked.len() - 1,
            strategy
        );
        log::debug!("turn {}: {}", state.turn, best.description);

        AiMove {
            state: next,
            rationale,
            action: Some(best.action),
            score: Some(best.score),
        }
    }

    /// Commit the best action for the opposing side.
    #[must_use]
    pub fn generate_ai_move(&self, state: &GameState) -> AiMove {
        let mut result = self.decide(&state.swapped());
        result.state.swap_perspective();
        velocity::refresh(&mut result.state);
        result
    }
}

impl Policy for HeuristicAi {
    fn decide(&self, state: &GameState) -> AiMove {
        HeuristicAi::decide(self, state)
    }
}

/// Never acts. Useful as a baseline opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassPolicy;

impl Policy for PassPolicy {
    fn decide(&self, state: &GameState) -> AiMove {
        AiMove {
            state: state.clone(),
            rationale: "[AI] Passing.".to_string(),
            action: None,
            score: None,
        }
    }
}
