//! Card instances - runtime card state.
//!
//! A `CardInstance` is one physical copy of a card inside a match. Its
//! template is shared (`Arc`) and never mutated; everything that changes
//! during play (exertion, damage, modifiers, attachment) lives on the
//! instance itself.
//!
//! Instances keep their id for the whole match, including after being
//! banished: a card in the discard pile is still the same instance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardKey, CardTemplate, CardType};
use crate::core::entity::InstanceId;

/// Runtime modifiers placed on an instance by abilities.
///
/// `strength_bonus`, `evasive_granted` and `resist_granted` are transient
/// and reset at the owner's READY step. `frozen` skips exactly one readying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub cannot_quest: bool,
    pub cannot_challenge: bool,
    pub frozen: bool,
    pub evasive_granted: bool,
    pub resist_granted: u32,
    pub strength_bonus: i32,
}

impl Modifiers {
    /// Clear the modifiers that only last until the next READY step.
    pub fn reset_transient(&mut self) {
        self.strength_bonus = 0;
        self.evasive_granted = false;
        self.resist_granted = 0;
    }
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique for the life of the match.
    pub id: InstanceId,

    pub template: Arc<CardTemplate>,

    pub exerted: bool,

    /// Just played; cannot quest or challenge until the owner's next READY.
    pub summoning_sick: bool,

    pub face_down: bool,

    pub damage: u32,

    #[serde(default)]
    pub modifiers: Modifiers,

    /// Location this character is attached to, if any.
    #[serde(default)]
    pub location: Option<InstanceId>,
}

impl CardInstance {
    /// Create a fresh instance of a template.
    ///
    /// New instances are summoning-sick, ready, undamaged and unmodified.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use deckforge::cards::{CardInstance, CardKey, CardTemplate};
    /// use deckforge::core::InstanceId;
    ///
    /// let template = Arc::new(CardTemplate::character(CardKey::new(1, 1), "Ariel", 1, 1, 2, 1));
    /// let card = CardInstance::new(InstanceId(3), template);
    /// assert!(card.summoning_sick);
    /// assert!(!card.exerted);
    /// assert_eq!(card.damage, 0);
    /// ```
    #[must_use]
    pub fn new(id: InstanceId, template: Arc<CardTemplate>) -> Self {
        Self {
            id,
            template,
            exerted: false,
            summoning_sick: true,
            face_down: false,
            damage: 0,
            modifiers: Modifiers::default(),
            location: None,
        }
    }

    /// Return this instance to a just-created state, keeping its id.
    ///
    /// Used when a card leaves play for a hidden zone.
    pub fn reset(&mut self) {
        self.exerted = false;
        self.summoning_sick = true;
        self.face_down = false;
        self.damage = 0;
        self.modifiers = Modifiers::default();
        self.location = None;
    }

    #[must_use]
    pub fn key(&self) -> CardKey {
        self.template.key()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.template.card_type
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.template.card_type == CardType::Character
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.template.cost
    }

    #[must_use]
    pub fn lore(&self) -> u32 {
        self.template.lore
    }

    #[must_use]
    pub fn willpower(&self) -> u32 {
        self.template.willpower
    }

    /// Strength including the transient bonus, floored at zero.
    #[must_use]
    pub fn strength(&self) -> u32 {
        (i64::from(self.template.strength) + i64::from(self.modifiers.strength_bonus)).max(0) as u32
    }

    /// Innate or granted Evasive.
    #[must_use]
    pub fn is_evasive(&self) -> bool {
        self.template.keywords.evasive || self.modifiers.evasive_granted
    }

    /// Innate plus granted Resist.
    #[must_use]
    pub fn resist(&self) -> u32 {
        self.template.keywords.resist + self.modifiers.resist_granted
    }

    /// Damage this card would take from a hit of `amount` after Resist.
    #[must_use]
    pub fn damage_after_resist(&self, amount: u32) -> u32 {
        amount.saturating_sub(self.resist())
    }

    /// Would `extra` more damage banish this card?
    #[must_use]
    pub fn is_lethal(&self, extra: u32) -> bool {
        let willpower = self.willpower();
        willpower > 0 && self.damage + extra >= willpower
    }

    /// Damage at or above a positive willpower.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.is_lethal(0)
    }

    /// Ready, not sick, allowed to quest.
    #[must_use]
    pub fn can_quest(&self) -> bool {
        !self.exerted && !self.summoning_sick && !self.modifiers.cannot_quest
    }

    /// Ready, not sick, allowed to challenge.
    #[must_use]
    pub fn can_challenge(&self) -> bool {
        !self.exerted && !self.summoning_sick && !self.modifiers.cannot_challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::CardKey;

    fn knight() -> CardInstance {
        let template = CardTemplate::character(CardKey::new(1, 2), "Knight", 3, 3, 4, 1).with_resist(1);
        CardInstance::new(InstanceId(1), Arc::new(template))
    }

    #[test]
    fn test_new_instance_defaults() {
        let card = knight();
        assert!(card.summoning_sick);
        assert!(!card.exerted);
        assert!(!card.face_down);
        assert_eq!(card.modifiers, Modifiers::default());
        assert_eq!(card.location, None);
    }

    #[test]
    fn test_strength_bonus_floor() {
        let mut card = knight();
        card.modifiers.strength_bonus = 2;
        assert_eq!(card.strength(), 5);
        card.modifiers.strength_bonus = -10;
        assert_eq!(card.strength(), 0);
    }

    #[test]
    fn test_resist_and_lethality() {
        let mut card = knight();
        card.modifiers.resist_granted = 1;
        assert_eq!(card.resist(), 2);
        assert_eq!(card.damage_after_resist(5), 3);
        assert_eq!(card.damage_after_resist(1), 0);

        assert!(!card.is_lethal(3));
        assert!(card.is_lethal(4));
        card.damage = 4;
        assert!(card.is_dead());
    }

    #[test]
    fn test_zero_willpower_never_dies() {
        let template = CardTemplate::new(CardKey::new(1, 3), "Lantern", CardType::Item, 1);
        let mut card = CardInstance::new(InstanceId(2), Arc::new(template));
        card.damage = 10;
        assert!(!card.is_dead());
    }

    #[test]
    fn test_transient_reset() {
        let mut mods = Modifiers {
            cannot_quest: true,
            frozen: true,
            evasive_granted: true,
            resist_granted: 2,
            strength_bonus: 3,
            ..Modifiers::default()
        };
        mods.reset_transient();
        assert!(mods.cannot_quest);
        assert!(mods.frozen);
        assert!(!mods.evasive_granted);
        assert_eq!(mods.resist_granted, 0);
        assert_eq!(mods.strength_bonus, 0);
    }

    #[test]
    fn test_reset_keeps_id() {
        let mut card = knight();
        card.exerted = true;
        card.damage = 2;
        card.summoning_sick = false;
        card.reset();
        assert_eq!(card.id, InstanceId(1));
        assert_eq!(card.damage, 0);
        assert!(card.summoning_sick);
    }
}
