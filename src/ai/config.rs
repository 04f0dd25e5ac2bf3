//! Heuristic AI scoring weights.

use serde::{Deserialize, Serialize};

/// Scoring weights for candidate actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Quest score per point of lore.
    pub quest_per_lore: f64,

    /// Subtracted from a quest when a ready opposing card could banish the
    /// quester in a challenge.
    pub quest_threat_penalty: f64,

    /// Challenge score for any banish.
    pub challenge_base: f64,

    /// Challenge score per point of the defender's lore.
    pub challenge_per_lore: f64,

    /// Challenge score per point of the defender's cost.
    pub challenge_per_cost: f64,

    /// Subtracted per point of the attacker's cost when it dies too.
    pub challenge_loss_per_cost: f64,

    /// Play score per point of cost.
    pub play_per_cost: f64,

    /// Lore multiplier in a character's stat sum.
    pub play_lore_multiplier: f64,

    /// Reward per point of opposing velocity removed by a targeted play.
    pub target_velocity_reward: f64,

    /// Ink score for a card that cannot be afforded yet.
    pub ink_unaffordable: f64,

    /// Ink score for an affordable card.
    pub ink_spare: f64,

    /// Weight multiplier applied in the favored action when racing
    /// (>= 1.0). Its reciprocal applies to the disfavored one.
    pub race_factor: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            quest_per_lore: 50.0,
            quest_threat_penalty: 20.0,
            challenge_base: 40.0,
            challenge_per_lore: 10.0,
            challenge_per_cost: 5.0,
            challenge_loss_per_cost: 5.0,
            play_per_cost: 10.0,
            play_lore_multiplier: 5.0,
            target_velocity_reward: 50.0,
            ink_unaffordable: 15.0,
            ink_spare: 10.0,
            race_factor: 1.5,
        }
    }
}

impl HeuristicWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the race factor.
    pub fn with_race_factor(mut self, factor: f64) -> Self {
        self.race_factor = factor;
        self
    }

    /// Set the quest score per lore.
    pub fn with_quest_per_lore(mut self, score: f64) -> Self {
        self.quest_per_lore = score;
        self
    }

    /// Set the targeted-play velocity reward.
    pub fn with_target_velocity_reward(mut self, reward: f64) -> Self {
        self.target_velocity_reward = reward;
        self
    }

    /// Set both ink scores.
    pub fn with_ink_scores(mut self, unaffordable: f64, spare: f64) -> Self {
        self.ink_unaffordable = unaffordable;
        self.ink_spare = spare;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = HeuristicWeights::default();
        assert_eq!(weights.quest_per_lore, 50.0);
        assert_eq!(weights.challenge_base, 40.0);
        assert_eq!(weights.ink_unaffordable, 15.0);
        assert!((weights.race_factor - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_builder_pattern() {
        let weights = HeuristicWeights::new().with_race_factor(2.0).with_ink_scores(1.0, 0.5);
        assert_eq!(weights.race_factor, 2.0);
        assert_eq!(weights.ink_unaffordable, 1.0);
        assert_eq!(weights.ink_spare, 0.5);
    }

    #[test]
    fn test_serialization() {
        let weights = HeuristicWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let deserialized: HeuristicWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, deserialized);
    }
}
