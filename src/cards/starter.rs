//! Built-in starter card set.
//!
//! A small library used when no card data has been loaded: every card with
//! a built-in ability plus a handful of vanilla characters. Also handy as a
//! pool for tests and benchmarks.

use super::definition::{CardKey, CardTemplate, CardType};
use super::registry::CardPool;

/// The starter templates, in library order.
#[must_use]
pub fn templates() -> Vec<CardTemplate> {
    vec![
        CardTemplate::character(CardKey::new(1, 1), "The Queen", 5, 4, 5, 2)
            .inkable()
            .with_ability("Wicked and Vain: Exert - Opposing character gets -4 Strength this turn."),
        CardTemplate::character(CardKey::new(1, 12), "Mickey Mouse", 3, 3, 3, 2).inkable(),
        CardTemplate::character(CardKey::new(1, 23), "Stitch", 6, 3, 5, 3)
            .inkable()
            .with_ability("Shift 4 (You may pay 4 ink to play this on top of one of your Stitch characters).")
            .with_ability("Adoring Fans: When you play this character, you may exert all opposing characters."),
        CardTemplate::character(CardKey::new(1, 66), "Dr. Facilier", 7, 4, 5, 3)
            .with_ability("Shift 5")
            .with_ability(
                "Into the Shadows: Whenever one of your other characters is banished in a challenge, \
                 you may return that card to your hand.",
            ),
        CardTemplate::character(CardKey::new(1, 36), "Magic Broom", 2, 2, 2, 1)
            .inkable()
            .with_ability("Sweep: When you play this character, you may shuffle a card from any discard into its player's deck."),
        CardTemplate::character(CardKey::new(1, 106), "Maleficent", 9, 7, 5, 2)
            .with_ability("Dragon Fire: When you play this character, you may banish chosen opposing character."),
        CardTemplate::character(CardKey::new(1, 142), "Belle", 4, 2, 4, 3)
            .inkable()
            .with_ability(
                "Read a Book: During your turn, you may put an additional card from your hand into your inkwell face down.",
            ),
        CardTemplate::new(CardKey::new(1, 196), "Smash", CardType::Action, 3)
            .inkable()
            .with_ability("Deal 3 damage to chosen character."),
        CardTemplate::new(CardKey::new(1, 128), "Be Prepared", CardType::Song, 7)
            .with_ability("Banish all characters.")
            .with_ability("(A character with cost 7 or more can Exert to sing this song for free.)"),
        CardTemplate::character(CardKey::new(1, 119), "Robin Hood", 6, 4, 4, 2)
            .inkable()
            .with_ability("Good Shot: During your turn, this character gains Evasive. (They can challenge characters with Evasive)."),
    ]
}

/// The starter templates as a pool.
#[must_use]
pub fn pool() -> CardPool {
    CardPool::from_templates(templates())
}

/// A deck list of `size` cards cycling through the starter templates.
#[must_use]
pub fn deck(size: usize) -> Vec<CardTemplate> {
    templates().into_iter().cycle().take(size).collect()
}
