//! Deck manifests.
//!
//! A manifest is the plain-data deck list handed over by the catalog layer:
//! a name, a release chapter, a description and a `"<set>-<number>" ->
//! quantity` map. Hydrating it against a `CardPool` produces the card list
//! the simulator plays with.
//!
//! Entries that cannot be resolved are skipped and reported, never fatal:
//! a partial deck still plays.
//!
//! ```
//! use deckforge::cards::{CardKey, CardPool, CardTemplate, DeckManifest};
//!
//! let pool = CardPool::from_templates([
//!     CardTemplate::character(CardKey::new(1, 12), "Mickey Mouse", 3, 3, 3, 2),
//! ]);
//! let manifest = DeckManifest::new("Test")
//!     .with_card("1-12", 3)
//!     .with_card("1-999", 2);
//!
//! let hydration = manifest.hydrate(&pool);
//! assert_eq!(hydration.cards.len(), 3);
//! assert_eq!(hydration.missing.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardKey, CardTemplate};
use super::registry::CardPool;
use crate::core::error::CardKeyError;

/// A deck list keyed by `"<set>-<number>"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManifest {
    pub name: String,

    #[serde(default)]
    pub chapter: u32,

    #[serde(default)]
    pub description: String,

    /// Card key to quantity. Ordered so hydration is reproducible.
    pub cards: BTreeMap<String, u32>,
}

/// A manifest entry that did not hydrate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HydrationGap {
    /// The key is not `"<set>-<number>"`.
    InvalidKey { error: CardKeyError, quantity: u32 },

    /// The key is well formed but absent from the pool.
    NotInPool { key: CardKey, quantity: u32 },
}

impl HydrationGap {
    /// Copies lost from the deck.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        match self {
            HydrationGap::InvalidKey { quantity, .. } | HydrationGap::NotInPool { quantity, .. } => {
                *quantity
            }
        }
    }
}

/// Result of hydrating a manifest.
#[derive(Clone, Debug, Default)]
pub struct Hydration {
    /// One entry per copy, in manifest key order.
    pub cards: Vec<Arc<CardTemplate>>,

    pub missing: Vec<HydrationGap>,
}

impl Hydration {
    /// Did every entry resolve?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Total copies skipped.
    #[must_use]
    pub fn missing_copies(&self) -> u32 {
        self.missing.iter().map(HydrationGap::quantity).sum()
    }
}

impl DeckManifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the release chapter (builder pattern).
    #[must_use]
    pub fn with_chapter(mut self, chapter: u32) -> Self {
        self.chapter = chapter;
        self
    }

    /// Add copies of a card (builder pattern). Repeated keys accumulate.
    #[must_use]
    pub fn with_card(mut self, key: impl Into<String>, quantity: u32) -> Self {
        *self.cards.entry(key.into()).or_insert(0) += quantity;
        self
    }

    /// Total copies listed.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.cards.values().sum()
    }

    /// Resolve every entry against a pool.
    pub fn hydrate(&self, pool: &CardPool) -> Hydration {
        let mut hydration = Hydration::default();

        for (raw, &quantity) in &self.cards {
            let key = match raw.parse::<CardKey>() {
                Ok(key) => key,
                Err(error) => {
                    log::warn!("deck {:?}: {}", self.name, error);
                    hydration.missing.push(HydrationGap::InvalidKey { error, quantity });
                    continue;
                }
            };

            match pool.get(key) {
                Some(template) => {
                    hydration
                        .cards
                        .extend(std::iter::repeat(template).take(quantity as usize).cloned());
                }
                None => {
                    log::warn!("deck {:?}: card {} not in pool, skipping {} copies", self.name, key, quantity);
                    hydration.missing.push(HydrationGap::NotInPool { key, quantity });
                }
            }
        }

        hydration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> CardPool {
        CardPool::from_templates([
            CardTemplate::character(CardKey::new(1, 12), "Mickey Mouse", 3, 3, 3, 2),
            CardTemplate::character(CardKey::new(1, 14), "Moana", 5, 4, 5, 2),
        ])
    }

    #[test]
    fn test_hydrate_complete() {
        let manifest = DeckManifest::new("C1: Amber & Amethyst")
            .with_chapter(1)
            .with_card("1-12", 3)
            .with_card("1-14", 1);

        let hydration = manifest.hydrate(&pool());
        assert!(hydration.is_complete());
        assert_eq!(hydration.cards.len(), 4);
        assert_eq!(manifest.total_cards(), 4);
    }

    #[test]
    fn test_hydrate_reports_gaps() {
        let manifest = DeckManifest::new("Broken")
            .with_card("1-12", 2)
            .with_card("7-7", 3)
            .with_card("oops", 1);

        let hydration = manifest.hydrate(&pool());
        assert_eq!(hydration.cards.len(), 2);
        assert_eq!(hydration.missing.len(), 2);
        assert_eq!(hydration.missing_copies(), 4);
        assert!(hydration
            .missing
            .contains(&HydrationGap::NotInPool { key: CardKey::new(7, 7), quantity: 3 }));
    }

    #[test]
    fn test_repeated_keys_accumulate() {
        let manifest = DeckManifest::new("Dup").with_card("1-12", 1).with_card("1-12", 2);
        assert_eq!(manifest.cards["1-12"], 3);
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = r#"{
            "name": "C1: Emerald & Ruby",
            "chapter": 1,
            "description": "Evasion & Lore Theft.",
            "cards": { "1-113": 1, "1-105": 3 }
        }"#;
        let manifest: DeckManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.chapter, 1);
        assert_eq!(manifest.total_cards(), 4);
    }
}
