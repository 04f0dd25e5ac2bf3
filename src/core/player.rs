//! Per-side state: the five zones, the lore score and the ink flag.
//!
//! ## Zones
//!
//! Each side owns a deck, a hand, an inkwell, a field and a discard pile.
//! Zones are `im::Vector`s so that cloning a whole match for AI look-ahead
//! shares structure instead of copying every card. Order within a zone is
//! not significant to the rules except for the deck, which is drawn from
//! the front.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use crate::cards::CardInstance;

/// Zone selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Inkwell,
    Field,
    Discard,
}

impl Zone {
    /// All zones, in a fixed order.
    pub const ALL: [Zone; 5] = [Zone::Deck, Zone::Hand, Zone::Inkwell, Zone::Field, Zone::Discard];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Inkwell => "inkwell",
            Zone::Field => "field",
            Zone::Discard => "discard",
        };
        f.write_str(name)
    }
}

/// One side of a match.
///
/// ## Example
///
/// ```
/// use deckforge::core::{PlayerState, Zone};
///
/// let side = PlayerState::new();
/// assert_eq!(side.ready_ink(), 0);
/// assert!(side.zone(Zone::Deck).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub deck: Vector<CardInstance>,
    pub hand: Vector<CardInstance>,
    pub inkwell: Vector<CardInstance>,
    pub field: Vector<CardInstance>,
    pub discard: Vector<CardInstance>,

    pub lore: u32,

    /// At most one card may be inked per turn.
    pub has_inked_this_turn: bool,

    /// Turns this side has started; drives the shared turn counter.
    #[serde(default)]
    pub turns_taken: u32,
}

impl PlayerState {
    /// Create an empty side.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a side whose deck holds `cards` in draw order.
    #[must_use]
    pub fn with_deck(cards: impl IntoIterator<Item = CardInstance>) -> Self {
        Self {
            deck: cards.into_iter().collect(),
            ..Self::default()
        }
    }

    // === Zones ===

    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vector<CardInstance> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Inkwell => &self.inkwell,
            Zone::Field => &self.field,
            Zone::Discard => &self.discard,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vector<CardInstance> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Inkwell => &mut self.inkwell,
            Zone::Field => &mut self.field,
            Zone::Discard => &mut self.discard,
        }
    }

    /// Position of an instance within a zone.
    #[must_use]
    pub fn position(&self, zone: Zone, id: InstanceId) -> Option<usize> {
        self.zone(zone).iter().position(|c| c.id == id)
    }

    /// Look up an instance within a zone.
    #[must_use]
    pub fn get(&self, zone: Zone, id: InstanceId) -> Option<&CardInstance> {
        self.zone(zone).iter().find(|c| c.id == id)
    }

    /// Mutable lookup within a zone.
    pub fn get_mut(&mut self, zone: Zone, id: InstanceId) -> Option<&mut CardInstance> {
        let index = self.position(zone, id)?;
        self.zone_mut(zone).get_mut(index)
    }

    /// Remove an instance from a zone.
    pub fn take(&mut self, zone: Zone, id: InstanceId) -> Option<CardInstance> {
        let index = self.position(zone, id)?;
        Some(self.zone_mut(zone).remove(index))
    }

    /// Which zone holds an instance, if any.
    #[must_use]
    pub fn find(&self, id: InstanceId) -> Option<Zone> {
        Zone::ALL.into_iter().find(|&zone| self.position(zone, id).is_some())
    }

    /// Field lookup.
    #[must_use]
    pub fn on_field(&self, id: InstanceId) -> Option<&CardInstance> {
        self.get(Zone::Field, id)
    }

    // === Ink ===

    /// Un-exerted inkwell cards; the ink available to pay costs.
    #[must_use]
    pub fn ready_ink(&self) -> u32 {
        self.inkwell.iter().filter(|c| !c.exerted).count() as u32
    }

    /// Exert `amount` ready ink cards. Returns false (and changes nothing)
    /// if there is not enough ready ink.
    pub fn pay_ink(&mut self, amount: u32) -> bool {
        if self.ready_ink() < amount {
            return false;
        }
        let mut remaining = amount;
        for card in self.inkwell.iter_mut() {
            if remaining == 0 {
                break;
            }
            if !card.exerted {
                card.exerted = true;
                remaining -= 1;
            }
        }
        true
    }

    // === Draw ===

    /// Move the top deck card to hand. Returns false if the deck is empty.
    pub fn draw(&mut self) -> bool {
        match self.deck.pop_front() {
            Some(card) => {
                self.hand.push_back(card);
                true
            }
            None => false,
        }
    }

    /// Draw up to `count` cards, returning how many were drawn.
    pub fn draw_many(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw()).count()
    }

    // === Queries ===

    /// Every instance id held by this side.
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        Zone::ALL
            .into_iter()
            .flat_map(move |zone| self.zone(zone).iter().map(|c| c.id))
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        Zone::ALL.into_iter().map(|zone| self.zone(zone).len()).sum()
    }
}
