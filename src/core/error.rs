//! Error types.
//!
//! Illegal actions are reported, never raised: the action functions turn an
//! `IllegalAction` into an unchanged state so the AI can probe freely.

use thiserror::Error;

use super::entity::InstanceId;

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("{0} is not in the active hand")]
    NotInHand(InstanceId),

    #[error("{0} cannot be put into the inkwell")]
    NotInkable(InstanceId),

    #[error("the active side has already inked this turn")]
    AlreadyInked,

    #[error("cost {cost} exceeds {available} ready ink")]
    CannotAfford { cost: u32, available: u32 },

    #[error("{0} is not on the active field")]
    NotOnField(InstanceId),

    #[error("{0} is not on the opposing field")]
    NotOnOpposingField(InstanceId),

    #[error("{0} is exerted")]
    Exerted(InstanceId),

    #[error("{0} is summoning-sick")]
    SummoningSick(InstanceId),

    #[error("{0} cannot quest")]
    QuestRestricted(InstanceId),

    #[error("{0} cannot challenge")]
    ChallengeRestricted(InstanceId),

    #[error("{0} is not a character")]
    NotQuestable(InstanceId),

    #[error("defender {0} is ready and cannot be challenged")]
    DefenderReady(InstanceId),

    #[error("defender {0} is evasive and the attacker is not")]
    EvasiveDefender(InstanceId),
}

/// A deck manifest key that is not `"<set>-<number>"`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card key {key:?}: expected \"<set>-<number>\"")]
pub struct CardKeyError {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            IllegalAction::CannotAfford { cost: 5, available: 2 }.to_string(),
            "cost 5 exceeds 2 ready ink"
        );
        assert_eq!(
            IllegalAction::EvasiveDefender(InstanceId(9)).to_string(),
            "defender #9 is evasive and the attacker is not"
        );
        assert_eq!(
            CardKeyError { key: "x".into() }.to_string(),
            "invalid card key \"x\": expected \"<set>-<number>\""
        );
    }
}
