//! Match state.
//!
//! ## Perspective
//!
//! The two sides are labeled `active` (the side whose turn it is, or whom
//! the AI is deciding for) and `opposing`, never by seat. Every rule is
//! written for the active side only; the other side takes its turn after
//! `swap_perspective` relabels the two. The swap moves two struct fields
//! and copies no cards.
//!
//! ## Cloning
//!
//! Zones are persistent vectors, so `GameState::clone` is cheap and the
//! clone is value-independent: mutating it never touches the original.
//! Clones keep every instance id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::{PlayerState, Zone};
use crate::cards::{CardInstance, CardTemplate};

/// Turn step. END is the swap back to READY for the other side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Ready,
    Set,
    Draw,
    Main,
}

/// Which label a side currently carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Active,
    Opposing,
}

/// Complete state of a match.
///
/// ## Example
///
/// ```
/// use deckforge::core::GameState;
///
/// let mut state = GameState::new();
/// state.active.lore = 3;
///
/// let swapped = state.swapped();
/// assert_eq!(swapped.opposing.lore, 3);
/// assert_eq!(swapped.swapped(), state);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Full rounds started; 0 before the first turn, then 1, 2, ...
    pub turn: u32,

    pub phase: Phase,

    pub active: PlayerState,

    pub opposing: PlayerState,

    /// UI selection. Ignored by the rules, cleared by a challenge.
    pub selected: Option<InstanceId>,

    /// Active side's lore velocity, recomputed after every state change.
    pub lore_velocity: f64,

    next_instance_id: InstanceId,
}

impl GameState {
    /// Create an empty match with no cards.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_instance_id: InstanceId::FIRST,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &PlayerState {
        match side {
            Side::Active => &self.active,
            Side::Opposing => &self.opposing,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut PlayerState {
        match side {
            Side::Active => &mut self.active,
            Side::Opposing => &mut self.opposing,
        }
    }

    // === Perspective ===

    /// Relabel `active` and `opposing` in place.
    pub fn swap_perspective(&mut self) {
        std::mem::swap(&mut self.active, &mut self.opposing);
    }

    /// A copy with `active` and `opposing` relabeled.
    #[must_use]
    pub fn swapped(&self) -> Self {
        let mut state = self.clone();
        state.swap_perspective();
        state
    }

    /// Run `f` with `side` as the active side, restoring labels afterwards.
    pub fn as_side<R>(&mut self, side: Side, f: impl FnOnce(&mut Self) -> R) -> R {
        if side == Side::Opposing {
            self.swap_perspective();
        }
        let result = f(self);
        if side == Side::Opposing {
            self.swap_perspective();
        }
        result
    }

    // === Instances ===

    /// Allocate a fresh instance id.
    pub fn alloc_id(&mut self) -> InstanceId {
        // `Default` leaves the counter at zero; ids start at 1
        if self.next_instance_id < InstanceId::FIRST {
            self.next_instance_id = InstanceId::FIRST;
        }
        let id = self.next_instance_id;
        self.next_instance_id = id.next();
        id
    }

    /// Create a new instance of `template` with a fresh id.
    pub fn instantiate(&mut self, template: Arc<CardTemplate>) -> CardInstance {
        let id = self.alloc_id();
        CardInstance::new(id, template)
    }

    /// Where an instance is, if anywhere.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(Side, Zone)> {
        [Side::Active, Side::Opposing]
            .into_iter()
            .find_map(|side| self.side(side).find(id).map(|zone| (side, zone)))
    }

    /// A field instance on either side.
    #[must_use]
    pub fn field_card(&self, id: InstanceId) -> Option<(Side, &CardInstance)> {
        [Side::Active, Side::Opposing]
            .into_iter()
            .find_map(|side| self.side(side).on_field(id).map(|card| (side, card)))
    }

    /// Check that no instance id appears twice across both sides.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut ids: Vec<InstanceId> = self
            .active
            .instance_ids()
            .chain(self.opposing.instance_ids())
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKey;

    fn template() -> Arc<CardTemplate> {
        Arc::new(CardTemplate::character(CardKey::new(1, 1), "Test", 1, 1, 1, 1))
    }

    #[test]
    fn test_alloc_ids_start_at_one() {
        let mut state = GameState::new();
        assert_eq!(state.alloc_id(), InstanceId(1));
        assert_eq!(state.alloc_id(), InstanceId(2));

        let mut defaulted = GameState::default();
        assert_eq!(defaulted.alloc_id(), InstanceId(1));
    }

    #[test]
    fn test_swap_is_involution() {
        let mut state = GameState::new();
        let card = state.instantiate(template());
        state.active.hand.push_back(card);
        state.opposing.lore = 4;

        let mut twice = state.clone();
        twice.swap_perspective();
        assert_eq!(twice.active.lore, 4);
        twice.swap_perspective();
        assert_eq!(twice, state);
    }

    #[test]
    fn test_as_side_restores_labels() {
        let mut state = GameState::new();
        state.as_side(Side::Opposing, |s| s.active.lore += 2);
        assert_eq!(state.opposing.lore, 2);
        assert_eq!(state.active.lore, 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::new();
        let card = state.instantiate(template());
        state.active.field.push_back(card);

        let mut probe = state.clone();
        probe.active.field[0].damage = 1;
        assert_eq!(state.active.field[0].damage, 0);
        assert_eq!(probe.active.field[0].id, state.active.field[0].id);
    }

    #[test]
    fn test_locate() {
        let mut state = GameState::new();
        let a = state.instantiate(template());
        let b = state.instantiate(template());
        let (a_id, b_id) = (a.id, b.id);
        state.active.hand.push_back(a);
        state.opposing.field.push_back(b);

        assert_eq!(state.locate(a_id), Some((Side::Active, Zone::Hand)));
        assert_eq!(state.locate(b_id), Some((Side::Opposing, Zone::Field)));
        assert!(state.field_card(a_id).is_none());
        assert_eq!(state.field_card(b_id).map(|(side, _)| side), Some(Side::Opposing));
    }

    #[test]
    fn test_unique_ids() {
        let mut state = GameState::new();
        let card = state.instantiate(template());
        state.active.hand.push_back(card.clone());
        assert!(state.has_unique_ids());
        state.opposing.hand.push_back(card);
        assert!(!state.has_unique_ids());
    }

    #[test]
    fn test_state_serialization() {
        let mut state = GameState::new();
        let card = state.instantiate(template());
        state.active.deck.push_back(card);
        state.turn = 3;

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
