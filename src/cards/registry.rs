//! Card pool for template lookup.
//!
//! The `CardPool` stores the card library supplied by the data-loading
//! layer. It provides fast lookup by `CardKey` and iterates in insertion
//! order, so sampling decks from a pool is reproducible for a given seed.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardKey, CardTemplate, CardType};

/// Library of card templates keyed by `(set, number)`.
///
/// ## Example
///
/// ```
/// use deckforge::cards::{CardKey, CardPool, CardTemplate};
///
/// let mut pool = CardPool::new();
/// pool.insert(CardTemplate::character(CardKey::new(1, 12), "Mickey Mouse", 3, 3, 3, 2));
///
/// let found = pool.get(CardKey::new(1, 12)).unwrap();
/// assert_eq!(found.name, "Mickey Mouse");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    cards: FxHashMap<CardKey, Arc<CardTemplate>>,
    order: Vec<CardKey>,
}

impl CardPool {
    /// Create a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from templates.
    pub fn from_templates(templates: impl IntoIterator<Item = CardTemplate>) -> Self {
        let mut pool = Self::new();
        for template in templates {
            pool.insert(template);
        }
        pool
    }

    /// Insert a template, inferring keywords from its ability text.
    ///
    /// A template with an existing key replaces the old one in place and
    /// the old template is returned.
    pub fn insert(&mut self, template: CardTemplate) -> Option<Arc<CardTemplate>> {
        let template = template.with_inferred_keywords();
        let key = template.key();
        let previous = self.cards.insert(key, Arc::new(template));
        if previous.is_some() {
            log::debug!("card {} replaced in pool", key);
        } else {
            self.order.push(key);
        }
        previous
    }

    /// Get a template by key.
    #[must_use]
    pub fn get(&self, key: CardKey) -> Option<&Arc<CardTemplate>> {
        self.cards.get(&key)
    }

    /// Check if a key is in the pool.
    #[must_use]
    pub fn contains(&self, key: CardKey) -> bool {
        self.cards.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.order.iter().filter_map(move |key| self.cards.get(key))
    }

    /// Find templates by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.iter().filter(move |c| c.card_type == card_type)
    }

    /// All templates in insertion order, as shared handles.
    #[must_use]
    pub fn templates(&self) -> Vec<Arc<CardTemplate>> {
        self.iter().cloned().collect()
    }
}
