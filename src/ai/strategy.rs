//! Race-based strategy selection.
//!
//! Compares the two sides' lore velocity. A side that is behind leans on
//! challenges to slow the opponent down; a side that is ahead leans on
//! questing to close the game out.

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::rules::velocity;

/// How the side to move approaches the race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Opponent is faster: favor challenges.
    LosingRace,
    /// Even race.
    Balanced,
    /// We are faster: favor questing.
    Rushing,
}

/// Action-type multipliers derived from a `Strategy`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub strategy: Strategy,
    pub quest: f64,
    pub challenge: f64,
}

impl Strategy {
    /// Pick a strategy from the two velocities.
    #[must_use]
    pub fn from_velocities(active: f64, opposing: f64) -> Self {
        if opposing > active {
            Strategy::LosingRace
        } else if active > opposing {
            Strategy::Rushing
        } else {
            Strategy::Balanced
        }
    }

    /// Strategy for the active side of `state`.
    #[must_use]
    pub fn for_state(state: &GameState) -> Self {
        let (active, opposing) = velocity::velocities(state);
        Self::from_velocities(active, opposing)
    }

    /// Quest and challenge multipliers, reciprocal around 1.
    ///
    /// ```
    /// use deckforge::ai::Strategy;
    ///
    /// let w = Strategy::LosingRace.weights(1.5);
    /// assert!(w.challenge > 1.0);
    /// assert!((w.quest * w.challenge - 1.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn weights(self, race_factor: f64) -> StrategyWeights {
        let factor = if race_factor > 0.0 { race_factor } else { 1.0 };
        let (quest, challenge) = match self {
            Strategy::LosingRace => (1.0 / factor, factor),
            Strategy::Balanced => (1.0, 1.0),
            Strategy::Rushing => (factor, 1.0 / factor),
        };
        StrategyWeights { strategy: self, quest, challenge }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::LosingRace => "losing the race",
            Strategy::Balanced => "even race",
            Strategy::Rushing => "rushing",
        };
        f.write_str(name)
    }
}
