//! Deck construction for simulated matches.

use std::sync::Arc;

use crate::cards::{CardPool, CardTemplate, Hydration};
use crate::core::GameRng;

/// Where a side's deck comes from.
#[derive(Clone, Debug)]
pub enum DeckSource {
    /// Sample `deck_size` cards uniformly, with replacement.
    Pool(Vec<Arc<CardTemplate>>),

    /// Use exactly these cards.
    Fixed(Vec<Arc<CardTemplate>>),
}

impl DeckSource {
    /// Sample from every template in a pool.
    #[must_use]
    pub fn from_pool(pool: &CardPool) -> Self {
        DeckSource::Pool(pool.templates())
    }

    /// Play a hydrated manifest as-is.
    #[must_use]
    pub fn from_hydration(hydration: Hydration) -> Self {
        DeckSource::Fixed(hydration.cards)
    }

    /// Play exactly these templates.
    pub fn fixed(cards: impl IntoIterator<Item = CardTemplate>) -> Self {
        DeckSource::Fixed(cards.into_iter().map(Arc::new).collect())
    }

    /// Build a shuffled deck.
    ///
    /// An empty pool yields an empty deck.
    ///
    /// ```
    /// use deckforge::cards::starter;
    /// use deckforge::core::GameRng;
    /// use deckforge::sim::DeckSource;
    ///
    /// let source = DeckSource::from_pool(&starter::pool());
    /// let deck = source.build(60, &mut GameRng::new(1));
    /// assert_eq!(deck.len(), 60);
    /// ```
    #[must_use]
    pub fn build(&self, deck_size: usize, rng: &mut GameRng) -> Vec<Arc<CardTemplate>> {
        let mut deck = match self {
            DeckSource::Pool(pool) if pool.is_empty() => Vec::new(),
            DeckSource::Pool(pool) => (0..deck_size)
                .map(|_| Arc::clone(&pool[rng.gen_range_usize(0..pool.len())]))
                .collect(),
            DeckSource::Fixed(cards) => cards.clone(),
        };
        rng.shuffle(&mut deck);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter, CardKey};

    #[test]
    fn test_pool_sampling_deterministic() {
        let source = DeckSource::from_pool(&starter::pool());
        let a = source.build(30, &mut GameRng::new(9));
        let b = source.build(30, &mut GameRng::new(9));
        let keys = |deck: &[Arc<CardTemplate>]| deck.iter().map(|c| c.key()).collect::<Vec<CardKey>>();
        assert_eq!(keys(&a), keys(&b));
    }

    #[test]
    fn test_fixed_keeps_cards() {
        let source = DeckSource::fixed(starter::deck(12));
        let deck = source.build(60, &mut GameRng::new(3));
        assert_eq!(deck.len(), 12);
    }

    #[test]
    fn test_empty_pool() {
        let source = DeckSource::Pool(Vec::new());
        assert!(source.build(60, &mut GameRng::new(3)).is_empty());
    }
}
