//! Player actions.
//!
//! The four actions legal during the main phase. Every action names its
//! cards by `InstanceId`; the engine resolves the ids against the state it
//! is applied to, so an action built against one state can be replayed
//! against a clone of it.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;

/// A main-phase action for the active side.
///
/// ```
/// use deckforge::core::{Action, InstanceId};
///
/// let play = Action::Play { card: InstanceId(4), target: Some(InstanceId(9)) };
/// assert_eq!(play.source(), InstanceId(4));
/// assert_eq!(play.to_string(), "play #4 -> #9");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put a card from hand into the inkwell.
    Ink { card: InstanceId },

    /// Pay a card's cost and play it, optionally choosing a target.
    Play {
        card: InstanceId,
        target: Option<InstanceId>,
    },

    /// Exert a character to gain its lore.
    Quest { card: InstanceId },

    /// Exert a character to fight an exerted opposing character.
    Challenge {
        attacker: InstanceId,
        defender: InstanceId,
    },
}

impl Action {
    /// The active-side card performing the action.
    #[must_use]
    pub fn source(&self) -> InstanceId {
        match *self {
            Action::Ink { card } | Action::Play { card, .. } | Action::Quest { card } => card,
            Action::Challenge { attacker, .. } => attacker,
        }
    }

    /// Short verb, used in logs and rationales.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Ink { .. } => "ink",
            Action::Play { .. } => "play",
            Action::Quest { .. } => "quest",
            Action::Challenge { .. } => "challenge",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Action::Ink { card } | Action::Quest { card } => write!(f, "{} {}", self.verb(), card),
            Action::Play { card, target: None } => write!(f, "play {}", card),
            Action::Play { card, target: Some(t) } => write!(f, "play {} -> {}", card, t),
            Action::Challenge { attacker, defender } => {
                write!(f, "challenge {} -> {}", attacker, defender)
            }
        }
    }
}
