//! Ability registry.
//!
//! Cards with programmed behavior register a `CardAbilities` under their
//! `CardKey`. Each registration is a small table of optional function
//! pointers, one per `Hook`, plus the `TargetRule` the AI uses to enumerate
//! targets. Lookup is a plain hash probe; a card with no registration simply
//! has no behavior beyond its keywords.
//!
//! ## Hook contract
//!
//! Every hook receives the current state, the instance that owns the
//! ability, and an optional target id, and returns the next state. Hooks
//! always run with their owner as the `active` side. They do not run
//! cleanup themselves; the engine sweeps after them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, CardKey};
use crate::core::{GameState, InstanceId};

/// Ability callback: `(state, owner, target) -> state`.
pub type AbilityFn = fn(&GameState, &CardInstance, Option<InstanceId>) -> GameState;

/// Points in the rules where abilities fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hook {
    /// After the card is paid for and has changed zone.
    OnPlay,
    /// After the card quests and its lore is banked.
    OnQuest,
    /// When the card attacks, before damage. Target is the defender.
    OnChallenge,
    /// When another card on the same side is banished. Target is the ally.
    OnAllyBanished,
    /// During the owner's turn start, after SET and before DRAW.
    OnTurnStart,
}

impl Hook {
    pub const ALL: [Hook; 5] = [
        Hook::OnPlay,
        Hook::OnQuest,
        Hook::OnChallenge,
        Hook::OnAllyBanished,
        Hook::OnTurnStart,
    ];
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Hook::OnPlay => "onPlay",
            Hook::OnQuest => "onQuest",
            Hook::OnChallenge => "onChallenge",
            Hook::OnAllyBanished => "onAllyBanished",
            Hook::OnTurnStart => "onTurnStart",
        };
        f.write_str(name)
    }
}

/// Which targets an `OnPlay` ability can be given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRule {
    /// Untargeted.
    #[default]
    None,
    /// A character on the opposing field.
    OpposingCharacter,
    /// A character on either field, opposing side first.
    AnyCharacter,
}

impl TargetRule {
    /// Does this rule take a target?
    #[must_use]
    pub fn is_targeted(self) -> bool {
        self != TargetRule::None
    }

    /// Legal targets in `state`, from the active side's point of view.
    #[must_use]
    pub fn legal_targets(self, state: &GameState) -> SmallVec<[InstanceId; 8]> {
        let characters = |cards: &im::Vector<CardInstance>| {
            cards
                .iter()
                .filter(|c| c.is_character())
                .map(|c| c.id)
                .collect::<SmallVec<[InstanceId; 8]>>()
        };
        match self {
            TargetRule::None => SmallVec::new(),
            TargetRule::OpposingCharacter => characters(&state.opposing.field),
            TargetRule::AnyCharacter => {
                let mut targets = characters(&state.opposing.field);
                targets.extend(characters(&state.active.field));
                targets
            }
        }
    }
}

/// One card's programmed abilities.
///
/// ```
/// use deckforge::abilities::{CardAbilities, Hook, TargetRule};
/// use deckforge::cards::CardInstance;
/// use deckforge::core::{GameState, InstanceId};
///
/// fn draw_one(state: &GameState, _: &CardInstance, _: Option<InstanceId>) -> GameState {
///     let mut next = state.clone();
///     next.active.draw();
///     next
/// }
///
/// let abilities = CardAbilities::new("Fishbone Quill").with(Hook::OnQuest, draw_one);
/// assert!(abilities.get(Hook::OnQuest).is_some());
/// assert!(abilities.get(Hook::OnPlay).is_none());
/// assert_eq!(abilities.target, TargetRule::None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CardAbilities {
    /// Ability name, for logs and rationales.
    pub name: &'static str,
    pub on_play: Option<AbilityFn>,
    pub on_quest: Option<AbilityFn>,
    pub on_challenge: Option<AbilityFn>,
    pub on_ally_banished: Option<AbilityFn>,
    pub on_turn_start: Option<AbilityFn>,
    pub target: TargetRule,
}

impl CardAbilities {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Attach a callback to a hook (builder pattern).
    #[must_use]
    pub fn with(mut self, hook: Hook, f: AbilityFn) -> Self {
        *self.slot_mut(hook) = Some(f);
        self
    }

    /// Set the target rule (builder pattern).
    #[must_use]
    pub fn targeting(mut self, target: TargetRule) -> Self {
        self.target = target;
        self
    }

    /// Callback for a hook, if any.
    #[must_use]
    pub fn get(&self, hook: Hook) -> Option<AbilityFn> {
        match hook {
            Hook::OnPlay => self.on_play,
            Hook::OnQuest => self.on_quest,
            Hook::OnChallenge => self.on_challenge,
            Hook::OnAllyBanished => self.on_ally_banished,
            Hook::OnTurnStart => self.on_turn_start,
        }
    }

    fn slot_mut(&mut self, hook: Hook) -> &mut Option<AbilityFn> {
        match hook {
            Hook::OnPlay => &mut self.on_play,
            Hook::OnQuest => &mut self.on_quest,
            Hook::OnChallenge => &mut self.on_challenge,
            Hook::OnAllyBanished => &mut self.on_ally_banished,
            Hook::OnTurnStart => &mut self.on_turn_start,
        }
    }

    /// Hooks with a callback attached.
    pub fn hooks(&self) -> impl Iterator<Item = Hook> + '_ {
        Hook::ALL.into_iter().filter(move |&hook| self.get(hook).is_some())
    }
}

/// Registry of programmed abilities keyed by card.
///
/// Built once and then only read; share it behind an `Arc` across any number
/// of concurrently running matches.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    abilities: FxHashMap<CardKey, CardAbilities>,
}

impl AbilityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card's abilities, replacing any earlier registration.
    pub fn register(&mut self, key: CardKey, abilities: CardAbilities) {
        if self.abilities.insert(key, abilities).is_some() {
            log::debug!("abilities for {} replaced", key);
        }
    }

    /// Register abilities (builder pattern).
    #[must_use]
    pub fn with(mut self, key: CardKey, abilities: CardAbilities) -> Self {
        self.register(key, abilities);
        self
    }

    #[must_use]
    pub fn get(&self, key: CardKey) -> Option<&CardAbilities> {
        self.abilities.get(&key)
    }

    /// The callback a card has for a hook.
    #[must_use]
    pub fn hook(&self, key: CardKey, hook: Hook) -> Option<AbilityFn> {
        self.get(key).and_then(|a| a.get(hook))
    }

    /// Target rule for a card; untargeted when unregistered.
    #[must_use]
    pub fn target_rule(&self, key: CardKey) -> TargetRule {
        self.get(key).map_or(TargetRule::None, |a| a.target)
    }

    #[must_use]
    pub fn contains(&self, key: CardKey) -> bool {
        self.abilities.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}
