//! Match rules configuration.

use serde::{Deserialize, Serialize};

/// Tunable match rules shared by the engine, the AI loop and the simulator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Lore needed to win immediately.
    pub win_lore: u32,

    /// Hard cap on rounds; a match still running past it is a draw.
    /// Bounds worst-case AI oscillation.
    pub max_turns: u32,

    /// Cards per deck when sampling from a pool.
    pub deck_size: usize,

    /// Cards drawn into each opening hand.
    pub opening_hand: usize,

    /// Cards moved from each opening hand straight into the inkwell.
    pub opening_ink: usize,

    /// AI decisions per turn before the turn is forced to end.
    pub max_actions_per_turn: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            win_lore: 20,
            max_turns: 60,
            deck_size: 60,
            opening_hand: 7,
            opening_ink: 2,
            max_actions_per_turn: 10,
        }
    }
}

impl RulesConfig {
    /// Create the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lore needed to win.
    pub fn with_win_lore(mut self, lore: u32) -> Self {
        self.win_lore = lore;
        self
    }

    /// Set the round cap.
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the sampled deck size.
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the opening hand size and ramp ink count.
    pub fn with_opening(mut self, hand: usize, ink: usize) -> Self {
        self.opening_hand = hand;
        self.opening_ink = ink;
        self
    }

    /// Set the per-turn AI decision cap.
    pub fn with_max_actions_per_turn(mut self, actions: usize) -> Self {
        self.max_actions_per_turn = actions;
        self
    }
}
