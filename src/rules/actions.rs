//! Main-phase actions: ink, play, quest, challenge.
//!
//! ## Rejection
//!
//! An illegal action is a no-op. `validate` and `try_apply` say why it was
//! rejected; the plain action functions log the reason at `debug` and hand
//! back an unchanged copy, so callers can probe stale or speculative
//! actions freely.
//!
//! ## Resolution order
//!
//! - Play: pay ink, move the card, fire `OnPlay`, cleanup
//! - Quest: exert, bank lore, fire `OnQuest`, cleanup
//! - Challenge: exert attacker, clear selection, fire `OnChallenge`, deal
//!   both damages at once, cleanup
//! - Ink: move the card face-down; no cleanup

use crate::abilities::Hook;
use crate::cards::CardInstance;
use crate::core::{Action, GameState, IllegalAction, InstanceId, Side, Zone};

use super::engine::Engine;
use super::velocity;

/// Damage an attacker deals to a defender, after the defender's Resist.
#[must_use]
pub fn challenge_damage(attacker: &CardInstance, defender: &CardInstance) -> u32 {
    defender.damage_after_resist(attacker.strength())
}

impl Engine {
    // === Validation ===

    /// Check an action against the current state.
    pub fn validate(&self, state: &GameState, action: &Action) -> Result<(), IllegalAction> {
        match *action {
            Action::Ink { card } => validate_ink(state, card),
            Action::Play { card, .. } => validate_play(state, card),
            Action::Quest { card } => validate_quest(state, card),
            Action::Challenge { attacker, defender } => validate_challenge(state, attacker, defender),
        }
    }

    /// Apply an action, or report why it is illegal.
    pub fn try_apply(&self, state: &GameState, action: &Action) -> Result<GameState, IllegalAction> {
        self.validate(state, action)?;
        let mut next = state.clone();
        match *action {
            Action::Ink { card } => resolve_ink(&mut next, card),
            Action::Play { card, target } => self.resolve_play(&mut next, card, target),
            Action::Quest { card } => self.resolve_quest(&mut next, card),
            Action::Challenge { attacker, defender } => self.resolve_challenge(&mut next, attacker, defender),
        }
        Ok(next)
    }

    /// Apply an action; an illegal one returns the state unchanged.
    #[must_use]
    pub fn apply(&self, state: &GameState, action: &Action) -> GameState {
        match self.try_apply(state, action) {
            Ok(next) => next,
            Err(reason) => {
                log::debug!("rejected {}: {}", action, reason);
                state.clone()
            }
        }
    }

    /// Put a hand card into the inkwell.
    #[must_use]
    pub fn ink(&self, state: &GameState, card: InstanceId) -> GameState {
        self.apply(state, &Action::Ink { card })
    }

    /// Pay for and play a hand card.
    #[must_use]
    pub fn play(&self, state: &GameState, card: InstanceId, target: Option<InstanceId>) -> GameState {
        self.apply(state, &Action::Play { card, target })
    }

    /// Quest with a field character.
    #[must_use]
    pub fn quest(&self, state: &GameState, card: InstanceId) -> GameState {
        self.apply(state, &Action::Quest { card })
    }

    /// Challenge an exerted opposing card.
    #[must_use]
    pub fn challenge(&self, state: &GameState, attacker: InstanceId, defender: InstanceId) -> GameState {
        self.apply(state, &Action::Challenge { attacker, defender })
    }

    // === Resolution ===

    fn resolve_play(&self, state: &mut GameState, id: InstanceId, target: Option<InstanceId>) {
        let Some(mut card) = state.active.take(Zone::Hand, id) else {
            return;
        };
        let paid = state.active.pay_ink(card.cost());
        debug_assert!(paid, "play validated without enough ink");

        card.summoning_sick = true;
        card.exerted = false;
        card.face_down = false;
        card.damage = 0;

        let played = card.clone();
        if card.card_type().is_permanent() {
            state.active.field.push_back(card);
        } else {
            state.active.discard.push_back(card);
        }
        log::trace!("played {} {}", played.name(), played.id);

        self.fire(state, Side::Active, &played, Hook::OnPlay, target);
        self.cleanup(state);
    }

    fn resolve_quest(&self, state: &mut GameState, id: InstanceId) {
        let Some(card) = state.active.get_mut(Zone::Field, id) else {
            return;
        };
        card.exerted = true;
        let lore = card.lore();
        let quester = card.clone();
        state.active.lore += lore;

        self.fire(state, Side::Active, &quester, Hook::OnQuest, None);
        self.cleanup(state);
    }

    fn resolve_challenge(&self, state: &mut GameState, attacker_id: InstanceId, defender_id: InstanceId) {
        let Some(card) = state.active.get_mut(Zone::Field, attacker_id) else {
            return;
        };
        card.exerted = true;
        let attacker = card.clone();
        state.selected = None;

        self.fire(state, Side::Active, &attacker, Hook::OnChallenge, Some(defender_id));

        // The hook may have moved either card
        let attacker = state.active.on_field(attacker_id).cloned();
        let defender = state.opposing.on_field(defender_id).cloned();
        if let (Some(attacker), Some(defender)) = (attacker, defender) {
            let to_defender = challenge_damage(&attacker, &defender);
            let to_attacker = challenge_damage(&defender, &attacker);
            if let Some(card) = state.opposing.get_mut(Zone::Field, defender_id) {
                card.damage += to_defender;
            }
            if let Some(card) = state.active.get_mut(Zone::Field, attacker_id) {
                card.damage += to_attacker;
            }
            log::trace!(
                "{} deals {} to {}, takes {}",
                attacker.name(),
                to_defender,
                defender.name(),
                to_attacker
            );
        }

        self.cleanup(state);
    }
}

fn resolve_ink(state: &mut GameState, id: InstanceId) {
    let Some(mut card) = state.active.take(Zone::Hand, id) else {
        return;
    };
    card.face_down = true;
    card.exerted = false;
    card.damage = 0;
    state.active.inkwell.push_back(card);
    state.active.has_inked_this_turn = true;
    velocity::refresh(state);
}

fn hand_card(state: &GameState, id: InstanceId) -> Result<&CardInstance, IllegalAction> {
    state.active.get(Zone::Hand, id).ok_or(IllegalAction::NotInHand(id))
}

fn field_card(state: &GameState, id: InstanceId) -> Result<&CardInstance, IllegalAction> {
    state.active.on_field(id).ok_or(IllegalAction::NotOnField(id))
}

fn validate_ink(state: &GameState, id: InstanceId) -> Result<(), IllegalAction> {
    let card = hand_card(state, id)?;
    if state.active.has_inked_this_turn {
        return Err(IllegalAction::AlreadyInked);
    }
    if !card.template.inkable {
        return Err(IllegalAction::NotInkable(id));
    }
    Ok(())
}

fn validate_play(state: &GameState, id: InstanceId) -> Result<(), IllegalAction> {
    let card = hand_card(state, id)?;
    let available = state.active.ready_ink();
    if card.cost() > available {
        return Err(IllegalAction::CannotAfford { cost: card.cost(), available });
    }
    Ok(())
}

fn validate_ready(card: &CardInstance) -> Result<(), IllegalAction> {
    if !card.is_character() {
        return Err(IllegalAction::NotQuestable(card.id));
    }
    if card.exerted {
        return Err(IllegalAction::Exerted(card.id));
    }
    if card.summoning_sick {
        return Err(IllegalAction::SummoningSick(card.id));
    }
    Ok(())
}

fn validate_quest(state: &GameState, id: InstanceId) -> Result<(), IllegalAction> {
    let card = field_card(state, id)?;
    validate_ready(card)?;
    if card.modifiers.cannot_quest {
        return Err(IllegalAction::QuestRestricted(id));
    }
    Ok(())
}

fn validate_challenge(state: &GameState, attacker: InstanceId, defender: InstanceId) -> Result<(), IllegalAction> {
    let attacker_card = field_card(state, attacker)?;
    validate_ready(attacker_card)?;
    if attacker_card.modifiers.cannot_challenge {
        return Err(IllegalAction::ChallengeRestricted(attacker));
    }

    let defender_card = state
        .opposing
        .on_field(defender)
        .ok_or(IllegalAction::NotOnOpposingField(defender))?;
    if !defender_card.exerted {
        return Err(IllegalAction::DefenderReady(defender));
    }
    if defender_card.is_evasive() && !attacker_card.is_evasive() {
        return Err(IllegalAction::EvasiveDefender(defender));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::abilities::AbilityRegistry;
    use crate::cards::{CardKey, CardTemplate, CardType};

    fn engine() -> Engine {
        Engine::default().with_registry(Arc::new(AbilityRegistry::new()))
    }

    fn add(state: &mut GameState, side: Side, zone: Zone, template: CardTemplate) -> InstanceId {
        let card = state.instantiate(Arc::new(template));
        let id = card.id;
        state.side_mut(side).zone_mut(zone).push_back(card);
        id
    }

    fn hero(strength: u32, willpower: u32, lore: u32) -> CardTemplate {
        CardTemplate::character(CardKey::new(1, 1), "Hero", 2, strength, willpower, lore).inkable()
    }

    fn ready(state: &mut GameState, side: Side, id: InstanceId) {
        let card = state.side_mut(side).get_mut(Zone::Field, id).unwrap();
        card.summoning_sick = false;
        card.exerted = false;
    }

    fn exert(state: &mut GameState, side: Side, id: InstanceId) {
        state.side_mut(side).get_mut(Zone::Field, id).unwrap().exerted = true;
    }

    // === Ink ===

    #[test]
    fn test_ink_once_per_turn() {
        let engine = engine();
        let mut state = GameState::new();
        let a = add(&mut state, Side::Active, Zone::Hand, hero(1, 1, 1));
        let b = add(&mut state, Side::Active, Zone::Hand, hero(1, 1, 1));

        let next = engine.ink(&state, a);
        assert_eq!(next.active.inkwell.len(), 1);
        assert!(next.active.inkwell[0].face_down);
        assert!(next.active.has_inked_this_turn);

        assert_eq!(engine.validate(&next, &Action::Ink { card: b }), Err(IllegalAction::AlreadyInked));
        assert_eq!(engine.ink(&next, b), next);
    }

    #[test]
    fn test_ink_requires_inkable() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(
            &mut state,
            Side::Active,
            Zone::Hand,
            CardTemplate::character(CardKey::new(1, 66), "Uninkable", 7, 4, 5, 3),
        );
        assert_eq!(engine.validate(&state, &Action::Ink { card: id }), Err(IllegalAction::NotInkable(id)));
        assert_eq!(engine.ink(&state, id), state);
    }

    // === Play ===

    #[test]
    fn test_play_free_card() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(
            &mut state,
            Side::Active,
            Zone::Hand,
            CardTemplate::character(CardKey::new(1, 2), "Free", 0, 1, 1, 1),
        );

        let next = engine.play(&state, id, None);
        assert!(next.active.hand.is_empty());
        assert_eq!(next.active.field.len(), 1);
        assert!(next.active.field[0].summoning_sick);
    }

    #[test]
    fn test_play_pays_exact_cost() {
        let engine = engine();
        let mut state = GameState::new();
        for _ in 0..3 {
            add(&mut state, Side::Active, Zone::Inkwell, hero(1, 1, 1));
        }
        let id = add(&mut state, Side::Active, Zone::Hand, hero(1, 1, 1));

        let next = engine.play(&state, id, None);
        assert_eq!(next.active.ready_ink(), 1);
    }

    #[test]
    fn test_play_unaffordable() {
        let engine = engine();
        let mut state = GameState::new();
        add(&mut state, Side::Active, Zone::Inkwell, hero(1, 1, 1));
        let id = add(&mut state, Side::Active, Zone::Hand, hero(1, 1, 1));

        assert_eq!(
            engine.validate(&state, &Action::Play { card: id, target: None }),
            Err(IllegalAction::CannotAfford { cost: 2, available: 1 })
        );
        assert_eq!(engine.play(&state, id, None), state);
    }

    #[test]
    fn test_play_action_goes_to_discard() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(
            &mut state,
            Side::Active,
            Zone::Hand,
            CardTemplate::new(CardKey::new(1, 300), "Fizzle", CardType::Action, 0),
        );
        let next = engine.play(&state, id, None);
        assert!(next.active.field.is_empty());
        assert_eq!(next.active.discard[0].id, id);
    }

    // === Quest ===

    #[test]
    fn test_quest_banks_lore() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(&mut state, Side::Active, Zone::Field, hero(1, 1, 2));
        ready(&mut state, Side::Active, id);

        let next = engine.quest(&state, id);
        assert_eq!(next.active.lore, 2);
        assert!(next.active.field[0].exerted);
    }

    #[test]
    fn test_quest_rejections_leave_state_unchanged() {
        let engine = engine();
        let mut state = GameState::new();
        let sick = add(&mut state, Side::Active, Zone::Field, hero(1, 1, 2));
        let tired = add(&mut state, Side::Active, Zone::Field, hero(1, 1, 2));
        ready(&mut state, Side::Active, tired);
        exert(&mut state, Side::Active, tired);
        let barred = add(&mut state, Side::Active, Zone::Field, hero(1, 1, 2));
        ready(&mut state, Side::Active, barred);
        state.active.get_mut(Zone::Field, barred).unwrap().modifiers.cannot_quest = true;

        assert_eq!(engine.validate(&state, &Action::Quest { card: sick }), Err(IllegalAction::SummoningSick(sick)));
        assert_eq!(engine.validate(&state, &Action::Quest { card: tired }), Err(IllegalAction::Exerted(tired)));
        assert_eq!(
            engine.validate(&state, &Action::Quest { card: barred }),
            Err(IllegalAction::QuestRestricted(barred))
        );
        for id in [sick, tired, barred, InstanceId(99)] {
            assert_eq!(engine.quest(&state, id), state);
        }
    }

    #[test]
    fn test_quest_location_rejected() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(
            &mut state,
            Side::Active,
            Zone::Field,
            CardTemplate::location(CardKey::new(3, 1), "Tower", 2, 5, 1, 1),
        );
        ready(&mut state, Side::Active, id);
        assert_eq!(engine.validate(&state, &Action::Quest { card: id }), Err(IllegalAction::NotQuestable(id)));
    }

    // === Challenge ===

    #[test]
    fn test_challenge_simultaneous_damage() {
        let engine = engine();
        let mut state = GameState::new();
        let attacker = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, attacker);
        let defender = add(&mut state, Side::Opposing, Zone::Field, hero(3, 5, 1));
        exert(&mut state, Side::Opposing, defender);
        state.selected = Some(attacker);

        let next = engine.challenge(&state, attacker, defender);
        assert_eq!(next.opposing.field[0].damage, 2);
        assert_eq!(next.active.field[0].damage, 3);
        assert!(next.active.field[0].exerted);
        assert_eq!(next.selected, None);
    }

    #[test]
    fn test_challenge_resist_and_bonus() {
        let engine = engine();
        let mut state = GameState::new();
        let attacker = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, attacker);
        state.active.get_mut(Zone::Field, attacker).unwrap().modifiers.strength_bonus = 2;
        let defender = add(&mut state, Side::Opposing, Zone::Field, hero(1, 9, 1).with_resist(1));
        exert(&mut state, Side::Opposing, defender);
        state.opposing.get_mut(Zone::Field, defender).unwrap().modifiers.resist_granted = 1;

        let next = engine.challenge(&state, attacker, defender);
        assert_eq!(next.opposing.field[0].damage, 2);
        assert_eq!(next.active.field[0].damage, 1);
    }

    #[test]
    fn test_challenge_ready_defender_rejected() {
        let engine = engine();
        let mut state = GameState::new();
        let attacker = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, attacker);
        let defender = add(&mut state, Side::Opposing, Zone::Field, hero(3, 5, 1));

        assert_eq!(
            engine.validate(&state, &Action::Challenge { attacker, defender }),
            Err(IllegalAction::DefenderReady(defender))
        );
        assert_eq!(engine.challenge(&state, attacker, defender), state);
    }

    #[test]
    fn test_challenge_evasive_rules() {
        let engine = engine();
        let mut state = GameState::new();
        let plain = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, plain);
        let flyer = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, flyer);
        state.active.get_mut(Zone::Field, flyer).unwrap().modifiers.evasive_granted = true;
        let defender = add(&mut state, Side::Opposing, Zone::Field, hero(1, 5, 1).evasive());
        exert(&mut state, Side::Opposing, defender);

        assert_eq!(
            engine.validate(&state, &Action::Challenge { attacker: plain, defender }),
            Err(IllegalAction::EvasiveDefender(defender))
        );
        let rejected = engine.challenge(&state, plain, defender);
        assert_eq!(rejected, state);
        assert!(!rejected.active.field[0].exerted);

        assert!(engine.validate(&state, &Action::Challenge { attacker: flyer, defender }).is_ok());
    }

    #[test]
    fn test_challenge_restricted_attacker() {
        let engine = engine();
        let mut state = GameState::new();
        let attacker = add(&mut state, Side::Active, Zone::Field, hero(2, 5, 1));
        ready(&mut state, Side::Active, attacker);
        state.active.get_mut(Zone::Field, attacker).unwrap().modifiers.cannot_challenge = true;
        let defender = add(&mut state, Side::Opposing, Zone::Field, hero(1, 5, 1));
        exert(&mut state, Side::Opposing, defender);

        assert_eq!(
            engine.validate(&state, &Action::Challenge { attacker, defender }),
            Err(IllegalAction::ChallengeRestricted(attacker))
        );
    }

    #[test]
    fn test_apply_dispatch_matches_functions() {
        let engine = engine();
        let mut state = GameState::new();
        let id = add(&mut state, Side::Active, Zone::Hand, hero(1, 1, 1));
        assert_eq!(engine.apply(&state, &Action::Ink { card: id }), engine.ink(&state, id));
    }
}
