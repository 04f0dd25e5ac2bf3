//! Single-match driver.
//!
//! ## Match loop
//!
//! 1. Both decks are instantiated, opening hands drawn and ramp ink placed
//! 2. Each round seat A takes a turn, then seat B
//! 3. A turn is `start_turn` followed by policy decisions until the policy
//!    passes or the per-turn cap is hit
//! 4. After each turn: reaching `win_lore` wins; starting the turn with an
//!    empty deck loses (lore is checked first)
//! 5. A match still running after `max_turns` rounds is a draw

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ai::Policy;
use crate::cards::CardTemplate;
use crate::core::GameState;
use crate::rules::{velocity, Engine};

/// A seat at the table. Seat A moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::A => write!(f, "A"),
            Seat::B => write!(f, "B"),
        }
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The winner reached the lore target.
    Lore,
    /// The loser started a turn with nothing to draw.
    DeckOut,
    /// Round cap reached.
    TurnCap,
}

/// Outcome of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// `None` for a draw.
    pub winner: Option<Seat>,
    pub reason: EndReason,
    /// Rounds started.
    pub turns: u32,
    /// Mean end-of-turn lore velocity of seat A.
    pub velocity_a: f64,
    /// Mean end-of-turn lore velocity of seat B.
    pub velocity_b: f64,
    /// Seed of the match's random stream.
    pub seed: u64,
}

impl MatchResult {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Plays matches with a fixed engine.
#[derive(Clone, Debug, Default)]
pub struct MatchRunner {
    engine: Engine,
}

impl MatchRunner {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the active side's turn: start it, then let `policy` act.
    ///
    /// Returns the new state and the number of actions taken.
    pub fn run_turn(&self, state: &GameState, policy: &dyn Policy) -> (GameState, usize) {
        let mut current = self.engine.start_turn(state);
        let mut actions = 0;
        while actions < self.engine.rules().max_actions_per_turn {
            let decision = policy.decide(&current);
            if decision.passed() {
                break;
            }
            current = decision.state;
            actions += 1;
        }
        (current, actions)
    }

    /// Play one match. Decks are used in the given order.
    pub fn play(
        &self,
        deck_a: &[Arc<CardTemplate>],
        deck_b: &[Arc<CardTemplate>],
        policy_a: &dyn Policy,
        policy_b: &dyn Policy,
        seed: u64,
    ) -> MatchResult {
        let rules = self.engine.rules();
        let mut state = self.engine.deal_opening(&self.engine.new_match(deck_a, deck_b));

        let mut velocity_sum = [0.0_f64; 2];
        let mut turns_taken = [0_u32; 2];
        let mut round = 0;

        while round < rules.max_turns {
            round += 1;
            for seat in [Seat::A, Seat::B] {
                let policy = match seat {
                    Seat::A => policy_a,
                    Seat::B => policy_b,
                };

                // seat B plays from the active perspective
                if seat == Seat::B {
                    state.swap_perspective();
                }
                let decked = state.active.deck.is_empty();
                let (next, actions) = self.run_turn(&state, policy);
                state = next;
                log::trace!("round {} seat {}: {} actions, lore {}", round, seat, actions, state.active.lore);

                velocity_sum[seat.index()] += velocity::lore_velocity(&state.active, state.turn);
                turns_taken[seat.index()] += 1;

                let outcome = if state.active.lore >= rules.win_lore {
                    Some((seat, EndReason::Lore))
                } else if decked {
                    Some((seat.other(), EndReason::DeckOut))
                } else {
                    None
                };
                if seat == Seat::B {
                    state.swap_perspective();
                }

                if let Some((winner, reason)) = outcome {
                    return self.finish(Some(winner), reason, round, velocity_sum, turns_taken, seed);
                }
            }
        }

        self.finish(None, EndReason::TurnCap, round, velocity_sum, turns_taken, seed)
    }

    fn finish(
        &self,
        winner: Option<Seat>,
        reason: EndReason,
        turns: u32,
        velocity_sum: [f64; 2],
        turns_taken: [u32; 2],
        seed: u64,
    ) -> MatchResult {
        let mean = |i: usize| {
            if turns_taken[i] == 0 {
                0.0
            } else {
                velocity_sum[i] / f64::from(turns_taken[i])
            }
        };
        let result = MatchResult {
            winner,
            reason,
            turns,
            velocity_a: mean(0),
            velocity_b: mean(1),
            seed,
        };
        match winner {
            Some(seat) => log::debug!("match {:#x}: seat {} wins by {:?} in {} turns", seed, seat, reason, turns),
            None => log::debug!("match {:#x}: draw after {} turns", seed, turns),
        }
        result
    }
}
