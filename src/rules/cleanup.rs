//! State-based cleanup: the banish sweep.
//!
//! After every play, quest and challenge the engine sweeps both fields.
//! Each card whose damage has reached a positive willpower is banished to
//! its owner's discard. Every surviving card on the same side with an
//! `OnAllyBanished` ability fires once per banished ally, with its owner as
//! the active side and the ally's id as the target.
//!
//! Triggered abilities can deal more damage, so the sweep repeats until a
//! pass banishes nothing.

use smallvec::SmallVec;

use crate::abilities::Hook;
use crate::core::{GameState, InstanceId, Side};

use super::engine::Engine;
use super::velocity;

/// Upper bound on sweep passes per cleanup.
pub const MAX_CLEANUP_PASSES: usize = 32;

/// Move every dead field card of `side` to its discard.
///
/// Cards attached to a banished location are detached.
pub fn sweep_side(state: &mut GameState, side: Side) -> SmallVec<[InstanceId; 4]> {
    let player = state.side_mut(side);
    let dead: SmallVec<[InstanceId; 4]> = player.field.iter().filter(|c| c.is_dead()).map(|c| c.id).collect();

    for &id in &dead {
        if let Some(position) = player.field.iter().position(|c| c.id == id) {
            let card = player.field.remove(position);
            player.discard.push_back(card);
        }
    }
    if !dead.is_empty() {
        for card in player.field.iter_mut() {
            if card.location.is_some_and(|loc| dead.contains(&loc)) {
                card.location = None;
            }
        }
    }
    dead
}

/// No field card is at or past lethal damage.
#[must_use]
pub fn is_clean(state: &GameState) -> bool {
    state.active.field.iter().chain(state.opposing.field.iter()).all(|c| !c.is_dead())
}

impl Engine {
    /// Sweep both fields to a fixed point, firing `OnAllyBanished` triggers.
    pub fn cleanup(&self, state: &mut GameState) {
        let mut passes = 0;
        loop {
            if passes == MAX_CLEANUP_PASSES {
                log::warn!("cleanup stopped after {} passes with cards still dying", passes);
                break;
            }
            passes += 1;

            let mut queued: SmallVec<[(Side, InstanceId, InstanceId); 4]> = SmallVec::new();
            let mut banished_any = false;

            for side in [Side::Active, Side::Opposing] {
                let dead = sweep_side(state, side);
                if dead.is_empty() {
                    continue;
                }
                banished_any = true;
                log::trace!("banished {} card(s) on the {:?} side", dead.len(), side);

                for survivor in &state.side(side).field {
                    if self.abilities().hook(survivor.key(), Hook::OnAllyBanished).is_none() {
                        continue;
                    }
                    for &ally in &dead {
                        queued.push((side, survivor.id, ally));
                    }
                }
            }

            if !banished_any {
                break;
            }

            for (side, source_id, ally) in queued {
                // An earlier trigger may have moved the source off the field
                let Some(source) = state.side(side).on_field(source_id).cloned() else {
                    continue;
                };
                self.fire(state, side, &source, Hook::OnAllyBanished, Some(ally));
            }
        }

        debug_assert!(passes == MAX_CLEANUP_PASSES || is_clean(state), "dead card left on field after cleanup");
        velocity::refresh(state);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::abilities::{AbilityRegistry, CardAbilities};
    use crate::cards::{CardInstance, CardKey, CardTemplate};
    use crate::core::Zone;

    fn add(state: &mut GameState, side: Side, template: CardTemplate, damage: u32) -> InstanceId {
        let mut card = state.instantiate(Arc::new(template));
        card.damage = damage;
        let id = card.id;
        state.side_mut(side).field.push_back(card);
        id
    }

    fn plain(willpower: u32) -> CardTemplate {
        CardTemplate::character(CardKey::new(1, 1), "Plain", 1, 1, willpower, 1)
    }

    #[test]
    fn test_sweep_both_sides() {
        let engine = Engine::default().with_registry(Arc::new(AbilityRegistry::new()));
        let mut state = GameState::new();
        let dead_a = add(&mut state, Side::Active, plain(2), 2);
        add(&mut state, Side::Active, plain(2), 1);
        let dead_b = add(&mut state, Side::Opposing, plain(3), 5);

        engine.cleanup(&mut state);
        assert_eq!(state.active.field.len(), 1);
        assert_eq!(state.active.discard[0].id, dead_a);
        assert!(state.opposing.field.is_empty());
        assert_eq!(state.opposing.discard[0].id, dead_b);
        assert!(is_clean(&state));
    }

    #[test]
    fn test_zero_willpower_survives() {
        let engine = Engine::default();
        let mut state = GameState::new();
        add(
            &mut state,
            Side::Active,
            CardTemplate::new(CardKey::new(1, 2), "Lamp", crate::cards::CardType::Item, 1),
            4,
        );
        engine.cleanup(&mut state);
        assert_eq!(state.active.field.len(), 1);
    }

    fn count_banishes(state: &GameState, _: &CardInstance, _: Option<InstanceId>) -> GameState {
        let mut next = state.clone();
        next.active.lore += 1;
        next
    }

    fn chain_damage(state: &GameState, _: &CardInstance, _: Option<InstanceId>) -> GameState {
        // Each banish hurts every other ally by 1
        let mut next = state.clone();
        for card in next.active.field.iter_mut() {
            card.damage += 1;
        }
        next
    }

    #[test]
    fn test_ally_banished_fires_once_per_ally() {
        let watcher_key = CardKey::new(4, 4);
        let registry = AbilityRegistry::new().with(
            watcher_key,
            CardAbilities::new("Watcher").with(Hook::OnAllyBanished, count_banishes),
        );
        let engine = Engine::default().with_registry(Arc::new(registry));

        let mut state = GameState::new();
        let watcher = CardTemplate::character(watcher_key, "Watcher", 1, 1, 5, 1);
        add(&mut state, Side::Opposing, watcher, 0);
        add(&mut state, Side::Opposing, plain(1), 1);
        add(&mut state, Side::Opposing, plain(1), 1);
        add(&mut state, Side::Active, plain(1), 1);

        engine.cleanup(&mut state);
        // Two opposing allies died; hooks run for the opposing owner
        assert_eq!(state.opposing.lore, 2);
        assert_eq!(state.active.lore, 0);
    }

    #[test]
    fn test_watcher_dying_does_not_fire_for_itself() {
        let watcher_key = CardKey::new(4, 4);
        let registry = AbilityRegistry::new().with(
            watcher_key,
            CardAbilities::new("Watcher").with(Hook::OnAllyBanished, count_banishes),
        );
        let engine = Engine::default().with_registry(Arc::new(registry));

        let mut state = GameState::new();
        add(&mut state, Side::Active, CardTemplate::character(watcher_key, "Watcher", 1, 1, 1, 1), 1);
        engine.cleanup(&mut state);
        assert_eq!(state.active.lore, 0);
        assert_eq!(state.active.discard.len(), 1);
    }

    #[test]
    fn test_cascade_reaches_fixed_point() {
        let key = CardKey::new(4, 5);
        let registry = AbilityRegistry::new().with(
            key,
            CardAbilities::new("Chain").with(Hook::OnAllyBanished, chain_damage),
        );
        let engine = Engine::default().with_registry(Arc::new(registry));

        let mut state = GameState::new();
        add(&mut state, Side::Active, plain(1), 1);
        add(&mut state, Side::Active, CardTemplate::character(key, "Chain", 1, 1, 3, 1), 0);
        add(&mut state, Side::Active, plain(1), 0);

        engine.cleanup(&mut state);
        // The first death damages the 1-willpower ally, which dies on the next pass
        assert!(is_clean(&state));
        assert_eq!(state.active.discard.len(), 2);
        assert_eq!(state.active.field.len(), 1);
        assert_eq!(state.active.field[0].damage, 2);
    }

    #[test]
    fn test_banished_location_detaches() {
        let engine = Engine::default();
        let mut state = GameState::new();
        let tower = add(&mut state, Side::Active, CardTemplate::location(CardKey::new(3, 1), "Tower", 2, 2, 1, 1), 2);
        let guard = add(&mut state, Side::Active, plain(3), 0);
        state.active.get_mut(Zone::Field, guard).unwrap().location = Some(tower);

        engine.cleanup(&mut state);
        assert_eq!(state.active.on_field(guard).unwrap().location, None);
    }

    #[test]
    fn test_cleanup_refreshes_velocity() {
        let engine = Engine::default();
        let mut state = GameState::new();
        state.turn = 1;
        state.active.lore = 3;
        engine.cleanup(&mut state);
        assert_eq!(state.lore_velocity, 3.0);
    }
}
