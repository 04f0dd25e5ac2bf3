//! The rules engine facade.
//!
//! `Engine` bundles the match rules and the ability registry it dispatches
//! to. Every entry point takes the current state by reference and returns a
//! new state; the input is never modified.
//!
//! ## Entry points
//!
//! - `new_match` / `deal_opening`: set up a match from two deck lists
//! - `start_turn`: READY -> SET -> DRAW -> MAIN for the active side
//! - `ink`, `play`, `quest`, `challenge`, `apply`: the main-phase actions
//! - `validate`, `try_apply`: the same actions, reporting why they fail
//! - `legal_actions`: every action `validate` accepts right now
//!
//! ```
//! use deckforge::cards::starter;
//! use deckforge::rules::Engine;
//! use std::sync::Arc;
//!
//! let engine = Engine::default();
//! let deck: Vec<_> = starter::deck(20).into_iter().map(Arc::new).collect();
//!
//! let state = engine.deal_opening(&engine.new_match(&deck, &deck));
//! let state = engine.start_turn(&state);
//! assert_eq!(state.turn, 1);
//! assert_eq!(state.active.hand.len(), 6);
//! ```

use std::sync::Arc;

use crate::abilities::{builtin, AbilityRegistry, Hook};
use crate::cards::{CardInstance, CardTemplate};
use crate::core::{Action, GameState, PlayerState, RulesConfig, Side};

use super::velocity;

/// Rules engine: match rules plus the abilities they dispatch to.
///
/// Cloning is cheap; the registry is shared.
#[derive(Clone, Debug)]
pub struct Engine {
    rules: RulesConfig,
    abilities: Arc<AbilityRegistry>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl Engine {
    /// Create an engine with the built-in abilities.
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            abilities: builtin::registry(),
        }
    }

    /// Replace the ability registry (builder pattern).
    #[must_use]
    pub fn with_registry(mut self, abilities: Arc<AbilityRegistry>) -> Self {
        self.abilities = abilities;
        self
    }

    /// Replace the rules (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    // === Match setup ===

    /// Create a match. `deck_a` becomes the active side.
    ///
    /// Decks are used in the given order (index 0 is drawn first); shuffle
    /// them beforehand. Instance ids are allocated deck A first.
    #[must_use]
    pub fn new_match(&self, deck_a: &[Arc<CardTemplate>], deck_b: &[Arc<CardTemplate>]) -> GameState {
        let mut state = GameState::new();
        let a: Vec<CardInstance> = deck_a.iter().map(|t| state.instantiate(Arc::clone(t))).collect();
        let b: Vec<CardInstance> = deck_b.iter().map(|t| state.instantiate(Arc::clone(t))).collect();
        state.active = PlayerState::with_deck(a);
        state.opposing = PlayerState::with_deck(b);

        debug_assert!(state.has_unique_ids(), "duplicate instance ids in new match");
        log::debug!("new match: {} vs {} cards", deck_a.len(), deck_b.len());
        state
    }

    /// Draw both opening hands and move the ramp cards into the inkwells.
    ///
    /// Ramp cards come off the end of the hand, face-down and ready. This
    /// does not count as the turn's ink.
    #[must_use]
    pub fn deal_opening(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        for side in [Side::Active, Side::Opposing] {
            let player = next.side_mut(side);
            player.draw_many(self.rules.opening_hand);
            for _ in 0..self.rules.opening_ink {
                let Some(mut card) = player.hand.pop_back() else {
                    break;
                };
                card.face_down = true;
                card.exerted = false;
                player.inkwell.push_back(card);
            }
        }
        velocity::refresh(&mut next);
        next
    }

    // === Actions ===

    /// Every action that is legal for the active side.
    ///
    /// Order: quests, challenges, plays (each targeted card followed by its
    /// targets), inks. Cards are visited in zone order.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();

        for card in &state.active.field {
            let quest = Action::Quest { card: card.id };
            if self.validate(state, &quest).is_ok() {
                actions.push(quest);
            }
        }

        for attacker in &state.active.field {
            for defender in &state.opposing.field {
                let challenge = Action::Challenge { attacker: attacker.id, defender: defender.id };
                if self.validate(state, &challenge).is_ok() {
                    actions.push(challenge);
                }
            }
        }

        for card in &state.active.hand {
            let play = Action::Play { card: card.id, target: None };
            if self.validate(state, &play).is_err() {
                continue;
            }
            actions.push(play);
            let rule = self.abilities.target_rule(card.key());
            for target in rule.legal_targets(state) {
                actions.push(Action::Play { card: card.id, target: Some(target) });
            }
        }

        for card in &state.active.hand {
            let ink = Action::Ink { card: card.id };
            if self.validate(state, &ink).is_ok() {
                actions.push(ink);
            }
        }

        actions
    }

    // === Hooks ===

    /// Run `source`'s callback for `hook`, with `side` as the active side.
    pub(crate) fn fire(
        &self,
        state: &mut GameState,
        side: Side,
        source: &CardInstance,
        hook: Hook,
        target: Option<crate::core::InstanceId>,
    ) -> bool {
        let Some(callback) = self.abilities.hook(source.key(), hook) else {
            return false;
        };
        log::trace!("{} {} fires {}", source.name(), source.id, hook);
        state.as_side(side, |s| *s = callback(s, source, target));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKey;

    fn deck(n: u32) -> Vec<Arc<CardTemplate>> {
        (1..=n)
            .map(|i| Arc::new(CardTemplate::character(CardKey::new(1, i), format!("C{}", i), 1, 1, 1, 1).inkable()))
            .collect()
    }

    #[test]
    fn test_new_match_ids_and_order() {
        let engine = Engine::default();
        let state = engine.new_match(&deck(3), &deck(2));

        assert_eq!(state.turn, 0);
        assert_eq!(state.active.deck.len(), 3);
        assert_eq!(state.opposing.deck.len(), 2);
        assert_eq!(state.active.deck[0].name(), "C1");
        assert!(state.has_unique_ids());
        assert_eq!(state.opposing.deck[0].id.raw(), 4);
    }

    #[test]
    fn test_deal_opening() {
        let engine = Engine::default();
        let state = engine.deal_opening(&engine.new_match(&deck(10), &deck(10)));

        for side in [&state.active, &state.opposing] {
            assert_eq!(side.hand.len(), 5);
            assert_eq!(side.inkwell.len(), 2);
            assert_eq!(side.deck.len(), 3);
            assert!(side.inkwell.iter().all(|c| c.face_down && !c.exerted));
            assert!(!side.has_inked_this_turn);
        }
        // Ramp comes off the end of the hand
        assert_eq!(state.active.inkwell[0].name(), "C7");
    }

    #[test]
    fn test_deal_opening_short_deck() {
        let engine = Engine::default();
        let state = engine.deal_opening(&engine.new_match(&deck(1), &[]));
        assert_eq!(state.active.inkwell.len(), 1);
        assert!(state.active.hand.is_empty());
        assert!(state.opposing.inkwell.is_empty());
    }

    #[test]
    fn test_builtin_registry_by_default() {
        let engine = Engine::default();
        assert!(!engine.abilities().is_empty());

        let bare = Engine::default().with_registry(Arc::new(AbilityRegistry::new()));
        assert!(bare.abilities().is_empty());
        assert_eq!(bare.rules(), &RulesConfig::default());
    }
}
