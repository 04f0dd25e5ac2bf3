//! Lore velocity: the pace of a side's race to the lore target.
//!
//! ```text
//! velocity = (banked lore + questable lore) / turn        (0 when turn = 0)
//! ```
//!
//! Questable lore counts field characters that could quest right now (ready,
//! not summoning-sick, not quest-restricted) plus the passive lore of field
//! locations.

use crate::cards::{CardInstance, CardType};
use crate::core::{GameState, PlayerState};

fn passive_lore(card: &CardInstance) -> u32 {
    match card.card_type() {
        CardType::Location => card.lore(),
        _ => 0,
    }
}

/// Lore the side could still add this turn.
#[must_use]
pub fn questable_lore(side: &PlayerState) -> u32 {
    side.field
        .iter()
        .map(|card| {
            if card.is_character() && card.can_quest() {
                card.lore()
            } else {
                passive_lore(card)
            }
        })
        .sum()
}

/// Lore the side would threaten once its characters ready.
///
/// Ignores exertion and summoning sickness, still honors quest
/// restrictions.
#[must_use]
pub fn readied_lore(side: &PlayerState) -> u32 {
    side.field
        .iter()
        .map(|card| {
            if card.is_character() && !card.modifiers.cannot_quest {
                card.lore()
            } else {
                passive_lore(card)
            }
        })
        .sum()
}

fn per_turn(lore: u32, turn: u32) -> f64 {
    if turn == 0 {
        0.0
    } else {
        f64::from(lore) / f64::from(turn)
    }
}

/// Velocity of one side at `turn`.
///
/// ```
/// use deckforge::core::PlayerState;
/// use deckforge::rules::velocity;
///
/// let mut side = PlayerState::new();
/// side.lore = 6;
/// assert_eq!(velocity::lore_velocity(&side, 3), 2.0);
/// assert_eq!(velocity::lore_velocity(&side, 0), 0.0);
/// ```
#[must_use]
pub fn lore_velocity(side: &PlayerState, turn: u32) -> f64 {
    per_turn(side.lore + questable_lore(side), turn)
}

/// Velocity of one side as if its field were readied.
#[must_use]
pub fn projected_velocity(side: &PlayerState, turn: u32) -> f64 {
    per_turn(side.lore + readied_lore(side), turn)
}

/// Active and opposing velocity.
#[must_use]
pub fn velocities(state: &GameState) -> (f64, f64) {
    (
        lore_velocity(&state.active, state.turn),
        lore_velocity(&state.opposing, state.turn),
    )
}

/// Recompute the cached `lore_velocity` of the active side.
pub fn refresh(state: &mut GameState) {
    state.lore_velocity = lore_velocity(&state.active, state.turn);
}
