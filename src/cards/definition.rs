//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a printed card: its
//! set/number identity, cost, type, inkability, base stats and keywords.
//! Runtime data (damage, exertion, modifiers) lives in `CardInstance`.
//!
//! Templates deserialize from the card-library JSON shape supplied by the
//! data-loading layer (`Set_Num`, `Card_Num`, `Name`, `Cost`, ...). Fields
//! the engine does not use (rarity, image, flavor text) are ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::CardKeyError;

/// Printed identity of a card: `(set, number)`.
///
/// Serves as the lookup key for both the card pool and the ability
/// registry. Renders and parses as `"<set>-<number>"`, the deck manifest key
/// format.
///
/// ```
/// use deckforge::cards::CardKey;
///
/// let key: CardKey = "1-128".parse().unwrap();
/// assert_eq!(key, CardKey::new(1, 128));
/// assert_eq!(key.to_string(), "1-128");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub set: u32,
    pub number: u32,
}

impl CardKey {
    /// Create a card key.
    #[must_use]
    pub const fn new(set: u32, number: u32) -> Self {
        Self { set, number }
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.set, self.number)
    }
}

impl FromStr for CardKey {
    type Err = CardKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CardKeyError { key: s.to_string() };
        let (set, number) = s.trim().split_once('-').ok_or_else(err)?;
        Ok(Self {
            set: set.parse().map_err(|_| err())?,
            number: number.parse().map_err(|_| err())?,
        })
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Character,
    Item,
    Action,
    #[serde(alias = "Action - Song")]
    Song,
    Location,
}

impl CardType {
    /// Does the card stay on the field once played?
    ///
    /// Characters, items and locations do; actions and songs resolve and go
    /// straight to the discard.
    #[must_use]
    pub fn is_permanent(self) -> bool {
        matches!(self, CardType::Character | CardType::Item | CardType::Location)
    }
}

/// Static keyword abilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keywords {
    /// Only evasive attackers may challenge this card.
    #[serde(default)]
    pub evasive: bool,

    /// Reduces incoming challenge damage by this much.
    #[serde(default)]
    pub resist: u32,
}

impl Keywords {
    /// Read keywords out of printed ability lines.
    ///
    /// Recognizes lines starting with `Evasive` and `Resist +N`.
    ///
    /// ```
    /// use deckforge::cards::Keywords;
    ///
    /// let kw = Keywords::from_ability_text(&[
    ///     "Evasive (Only characters with Evasive can challenge this character.)".to_string(),
    ///     "Resist +2".to_string(),
    /// ]);
    /// assert!(kw.evasive);
    /// assert_eq!(kw.resist, 2);
    /// ```
    #[must_use]
    pub fn from_ability_text(lines: &[String]) -> Self {
        let mut keywords = Self::default();
        for line in lines {
            let line = line.trim();
            if starts_with_word(line, "Evasive") {
                keywords.evasive = true;
            } else if starts_with_word(line, "Resist") {
                let amount: String = line
                    .get("Resist".len()..)
                    .unwrap_or_default()
                    .trim_start()
                    .trim_start_matches('+')
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                if let Ok(n) = amount.parse::<u32>() {
                    keywords.resist = keywords.resist.max(n);
                }
            }
        }
        keywords
    }

    /// Combine two keyword sets.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            evasive: self.evasive || other.evasive,
            resist: self.resist.max(other.resist),
        }
    }
}

fn starts_with_word(line: &str, word: &str) -> bool {
    let head = line.get(..word.len());
    let tail = line.get(word.len()..);
    head.is_some_and(|h| h.eq_ignore_ascii_case(word))
        && tail.is_some_and(|t| t.chars().next().map_or(true, |c| !c.is_ascii_alphanumeric()))
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use deckforge::cards::{CardKey, CardTemplate, CardType};
///
/// let mickey = CardTemplate::character(CardKey::new(1, 12), "Mickey Mouse", 3, 3, 3, 2)
///     .inkable();
///
/// assert_eq!(mickey.card_type, CardType::Character);
/// assert_eq!(mickey.key().to_string(), "1-12");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(rename = "Set_Num")]
    pub set: u32,

    #[serde(rename = "Card_Num")]
    pub number: u32,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Cost")]
    pub cost: u32,

    #[serde(rename = "Type")]
    pub card_type: CardType,

    #[serde(rename = "Inkable", default)]
    pub inkable: bool,

    #[serde(rename = "Strength", default)]
    pub strength: u32,

    #[serde(rename = "Willpower", default)]
    pub willpower: u32,

    #[serde(rename = "Lore", default)]
    pub lore: u32,

    /// Ink paid to move a character onto this location.
    #[serde(rename = "Move_Cost", default)]
    pub move_cost: u32,

    /// Printed ability text (keywords are read from it on pool insertion).
    #[serde(rename = "Abilities", default)]
    pub abilities: Vec<String>,

    #[serde(default)]
    pub keywords: Keywords,
}

impl CardTemplate {
    /// Create a template with no stats.
    #[must_use]
    pub fn new(key: CardKey, name: impl Into<String>, card_type: CardType, cost: u32) -> Self {
        Self {
            set: key.set,
            number: key.number,
            name: name.into(),
            cost,
            card_type,
            inkable: false,
            strength: 0,
            willpower: 0,
            lore: 0,
            move_cost: 0,
            abilities: Vec::new(),
            keywords: Keywords::default(),
        }
    }

    /// Create a character template.
    #[must_use]
    pub fn character(
        key: CardKey,
        name: impl Into<String>,
        cost: u32,
        strength: u32,
        willpower: u32,
        lore: u32,
    ) -> Self {
        let mut card = Self::new(key, name, CardType::Character, cost);
        card.strength = strength;
        card.willpower = willpower;
        card.lore = lore;
        card
    }

    /// Create a location template.
    #[must_use]
    pub fn location(
        key: CardKey,
        name: impl Into<String>,
        cost: u32,
        willpower: u32,
        lore: u32,
        move_cost: u32,
    ) -> Self {
        let mut card = Self::new(key, name, CardType::Location, cost);
        card.willpower = willpower;
        card.lore = lore;
        card.move_cost = move_cost;
        card
    }

    /// Mark as inkable (builder pattern).
    #[must_use]
    pub fn inkable(mut self) -> Self {
        self.inkable = true;
        self
    }

    /// Give the Evasive keyword (builder pattern).
    #[must_use]
    pub fn evasive(mut self) -> Self {
        self.keywords.evasive = true;
        self
    }

    /// Give Resist N (builder pattern).
    #[must_use]
    pub fn with_resist(mut self, resist: u32) -> Self {
        self.keywords.resist = resist;
        self
    }

    /// Add a line of ability text (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.abilities.push(text.into());
        self
    }

    /// Merge keywords found in the ability text into `keywords`.
    #[must_use]
    pub fn with_inferred_keywords(mut self) -> Self {
        self.keywords = self.keywords.union(Keywords::from_ability_text(&self.abilities));
        self
    }

    /// The `(set, number)` key.
    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::new(self.set, self.number)
    }
}
