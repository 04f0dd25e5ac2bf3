//! Turn structure: READY -> SET -> DRAW -> MAIN.
//!
//! `Engine::start_turn` runs the whole sequence for the active side in one
//! call. The other side takes its turn by swapping perspective and calling
//! it again; there is no separate END step.
//!
//! ## Turn counter
//!
//! Each side counts the turns it has started. The shared `turn` counter is
//! the larger of the two, so it reads 1 during both halves of the first
//! round, 2 during the second, and so on.

use crate::abilities::Hook;
use crate::cards::{CardInstance, CardType};
use crate::core::{GameState, InstanceId, Phase, PlayerState, Side};

use super::engine::Engine;
use super::velocity;

/// READY: un-exert and refresh the field and inkwell.
///
/// A frozen card clears `frozen` and otherwise stays as it is for this
/// readying.
pub fn ready_step(side: &mut PlayerState) {
    for card in side.field.iter_mut() {
        if card.modifiers.frozen {
            card.modifiers.frozen = false;
            continue;
        }
        card.exerted = false;
        card.summoning_sick = false;
        card.modifiers.reset_transient();
    }
    for card in side.inkwell.iter_mut() {
        card.exerted = false;
    }
    side.has_inked_this_turn = false;
}

/// SET: field locations add their lore.
pub fn set_step(side: &mut PlayerState) -> u32 {
    let lore: u32 = side
        .field
        .iter()
        .filter(|c| c.card_type() == CardType::Location)
        .map(CardInstance::lore)
        .sum();
    side.lore += lore;
    lore
}

impl Engine {
    /// Start the active side's turn.
    ///
    /// An empty deck makes the draw a no-op; deck-out is judged by the
    /// caller.
    #[must_use]
    pub fn start_turn(&self, state: &GameState) -> GameState {
        let mut next = state.clone();

        next.active.turns_taken += 1;
        next.turn = next.turn.max(next.active.turns_taken);

        next.phase = Phase::Ready;
        ready_step(&mut next.active);

        next.phase = Phase::Set;
        let passive = set_step(&mut next.active);
        if passive > 0 {
            log::trace!("locations add {} lore", passive);
        }

        let starters: Vec<InstanceId> = next
            .active
            .field
            .iter()
            .filter(|c| self.abilities().hook(c.key(), Hook::OnTurnStart).is_some())
            .map(|c| c.id)
            .collect();
        let mut fired = false;
        for id in starters {
            if let Some(source) = next.active.on_field(id).cloned() {
                fired |= self.fire(&mut next, Side::Active, &source, Hook::OnTurnStart, None);
            }
        }
        if fired {
            self.cleanup(&mut next);
        }

        next.phase = Phase::Draw;
        if !next.active.draw() {
            log::debug!("turn {}: draw from empty deck", next.turn);
        }

        next.phase = Phase::Main;
        velocity::refresh(&mut next);
        next
    }
}
