//! Built-in card abilities.
//!
//! A small illustrative set covering each hook shape the engine supports:
//! untargeted board effects, targeted damage with friendly fire, targeted
//! removal, and a reactive `OnAllyBanished` trigger.
//!
//! | key   | card                          | hook             | effect                                |
//! |-------|-------------------------------|------------------|---------------------------------------|
//! | 1-23  | Stitch, Adoring Fans          | `OnPlay`         | exert all opposing characters          |
//! | 1-66  | Dr. Facilier, Into the Shadows| `OnAllyBanished` | return the banished ally to hand       |
//! | 1-106 | Maleficent, Dragon Fire       | `OnPlay`         | banish chosen opposing character       |
//! | 1-128 | Be Prepared                   | `OnPlay`         | banish all characters                  |
//! | 1-196 | Smash                         | `OnPlay`         | 3 damage to chosen character           |
//!
//! The process-wide registry is built on first use and never mutated.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::registry::{AbilityRegistry, CardAbilities, Hook, TargetRule};
use crate::cards::{CardInstance, CardKey};
use crate::core::{GameState, InstanceId, Side, Zone};

pub const STITCH: CardKey = CardKey::new(1, 23);
pub const DR_FACILIER: CardKey = CardKey::new(1, 66);
pub const MALEFICENT: CardKey = CardKey::new(1, 106);
pub const BE_PREPARED: CardKey = CardKey::new(1, 128);
pub const SMASH: CardKey = CardKey::new(1, 196);

/// Damage dealt by Smash.
pub const SMASH_DAMAGE: u32 = 3;

static BUILTIN: Lazy<Arc<AbilityRegistry>> = Lazy::new(|| Arc::new(build()));

/// The shared built-in registry.
///
/// ```
/// use deckforge::abilities::{builtin, Hook};
///
/// let registry = builtin::registry();
/// assert!(registry.hook(builtin::SMASH, Hook::OnPlay).is_some());
/// assert!(registry.hook(builtin::DR_FACILIER, Hook::OnAllyBanished).is_some());
/// ```
#[must_use]
pub fn registry() -> Arc<AbilityRegistry> {
    Arc::clone(&BUILTIN)
}

fn build() -> AbilityRegistry {
    AbilityRegistry::new()
        .with(
            STITCH,
            CardAbilities::new("Adoring Fans").with(Hook::OnPlay, exert_all_opposing),
        )
        .with(
            DR_FACILIER,
            CardAbilities::new("Into the Shadows").with(Hook::OnAllyBanished, return_banished_ally),
        )
        .with(
            MALEFICENT,
            CardAbilities::new("Dragon Fire")
                .with(Hook::OnPlay, banish_chosen_opposing)
                .targeting(TargetRule::OpposingCharacter),
        )
        .with(
            BE_PREPARED,
            CardAbilities::new("Be Prepared").with(Hook::OnPlay, banish_all_characters),
        )
        .with(
            SMASH,
            CardAbilities::new("Smash")
                .with(Hook::OnPlay, deal_three_damage)
                .targeting(TargetRule::AnyCharacter),
        )
}

// === Effect primitives ===

/// Add damage to a field instance after its Resist.
pub fn deal_damage(state: &mut GameState, side: Side, id: InstanceId, amount: u32) -> bool {
    match state.side_mut(side).get_mut(Zone::Field, id) {
        Some(card) => {
            card.damage += card.damage_after_resist(amount);
            true
        }
        None => false,
    }
}

/// Move a field instance straight to its owner's discard.
///
/// Effect banishes bypass the damage sweep, so they do not fire
/// `OnAllyBanished`.
pub fn banish(state: &mut GameState, side: Side, id: InstanceId) -> bool {
    let player = state.side_mut(side);
    let Some(card) = player.take(Zone::Field, id) else {
        return false;
    };
    for attached in player.field.iter_mut().filter(|c| c.location == Some(id)) {
        attached.location = None;
    }
    player.discard.push_back(card);
    true
}

// === Abilities ===

fn exert_all_opposing(state: &GameState, _: &CardInstance, _: Option<InstanceId>) -> GameState {
    let mut next = state.clone();
    for card in next.opposing.field.iter_mut().filter(|c| c.is_character()) {
        card.exerted = true;
    }
    next
}

fn return_banished_ally(state: &GameState, source: &CardInstance, target: Option<InstanceId>) -> GameState {
    let Some(target) = target else {
        return state.clone();
    };
    if target == source.id {
        return state.clone();
    }

    let mut next = state.clone();
    if let Some(mut card) = next.active.take(Zone::Discard, target) {
        card.reset();
        next.active.hand.push_back(card);
    }
    next
}

fn banish_chosen_opposing(state: &GameState, _: &CardInstance, target: Option<InstanceId>) -> GameState {
    let mut next = state.clone();
    if let Some(target) = target {
        if next.opposing.on_field(target).is_some_and(CardInstance::is_character) {
            banish(&mut next, Side::Opposing, target);
        }
    }
    next
}

fn banish_all_characters(state: &GameState, _: &CardInstance, _: Option<InstanceId>) -> GameState {
    let mut next = state.clone();
    for side in [Side::Active, Side::Opposing] {
        let doomed: Vec<InstanceId> = next
            .side(side)
            .field
            .iter()
            .filter(|c| c.is_character())
            .map(|c| c.id)
            .collect();
        for id in doomed {
            banish(&mut next, side, id);
        }
    }
    next
}

fn deal_three_damage(state: &GameState, _: &CardInstance, target: Option<InstanceId>) -> GameState {
    let mut next = state.clone();
    if let Some(target) = target {
        // Friendly fire: an active-side target is legal
        if !deal_damage(&mut next, Side::Opposing, target, SMASH_DAMAGE) {
            deal_damage(&mut next, Side::Active, target, SMASH_DAMAGE);
        }
    }
    next
}
