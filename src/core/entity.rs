//! Card instance identification.
//!
//! Every card in a match gets a unique `InstanceId` when its deck is built.
//! The id is stable for the life of the match and never reused: a card
//! keeps it as it moves deck -> hand -> inkwell/field -> discard, and a
//! banished card keeps it in the discard pile.
//!
//! Ids are allocated by the `GameState` that owns the card, starting at 1.
//! Cloned states keep the same ids so that effects looking cards up by id
//! keep working inside an AI probe.
//!
//! ```
//! use deckforge::core::InstanceId;
//!
//! let id = InstanceId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.next(), InstanceId::new(8));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// First id handed out by a fresh match.
    pub const FIRST: InstanceId = InstanceId(1);

    /// Create an instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
