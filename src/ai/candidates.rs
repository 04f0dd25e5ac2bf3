//! Candidate enumeration and scoring.
//!
//! Every legal action the heuristic considers becomes a `Candidate` with a
//! score. Enumeration order is quests, challenges, plays, inks; ranking is a
//! stable sort, so equal scores keep that order.
//!
//! | kind      | score                                                           |
//! |-----------|-----------------------------------------------------------------|
//! | quest     | (50 x lore - threat penalty) x quest weight                      |
//! | challenge | (40 + 10 x lore + 5 x cost - 5 x own cost if trade) x challenge weight |
//! | play      | 10 x cost + strength + willpower + 5 x lore (characters)        |
//! | targeted  | play score + 50 x opposing velocity removed                     |
//! | ink       | 15 if unaffordable, 10 otherwise                                |
//!
//! Challenges are only considered when they banish the defender. Targeted
//! plays are only aimed at opposing characters.

use crate::cards::{CardInstance, CardType};
use crate::core::{Action, GameState, Zone};
use crate::rules::{challenge_damage, velocity, Engine};

use super::config::HeuristicWeights;
use super::strategy::StrategyWeights;

/// A scored action.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub action: Action,
    pub score: f64,
    pub description: String,
}

/// Scores every candidate for the active side of one state.
pub struct Scorer<'a> {
    engine: &'a Engine,
    weights: &'a HeuristicWeights,
    race: StrategyWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(engine: &'a Engine, weights: &'a HeuristicWeights, race: StrategyWeights) -> Self {
        Self { engine, weights, race }
    }

    /// All candidates in enumeration order.
    #[must_use]
    pub fn enumerate(&self, state: &GameState) -> Vec<Candidate> {
        let mut out = Vec::new();
        self.quests(state, &mut out);
        self.challenges(state, &mut out);
        self.plays(state, &mut out);
        self.inks(state, &mut out);
        out
    }

    /// All candidates, best first.
    #[must_use]
    pub fn ranked(&self, state: &GameState) -> Vec<Candidate> {
        let mut candidates = self.enumerate(state);
        rank(&mut candidates);
        candidates
    }

    fn quests(&self, state: &GameState, out: &mut Vec<Candidate>) {
        for card in &state.active.field {
            if card.lore() == 0 || !self.legal(state, Action::Quest { card: card.id }) {
                continue;
            }
            let mut score = self.weights.quest_per_lore * f64::from(card.lore());
            if is_threatened(state, card) {
                score -= self.weights.quest_threat_penalty;
            }
            score *= self.race.quest;
            out.push(Candidate {
                action: Action::Quest { card: card.id },
                score,
                description: format!("Quest with {} (value {:.1})", card.name(), score),
            });
        }
    }

    fn challenges(&self, state: &GameState, out: &mut Vec<Candidate>) {
        for attacker in &state.active.field {
            for defender in &state.opposing.field {
                let action = Action::Challenge { attacker: attacker.id, defender: defender.id };
                if !self.legal(state, action) {
                    continue;
                }
                if !defender.is_lethal(challenge_damage(attacker, defender)) {
                    continue;
                }
                let mut score = self.weights.challenge_base
                    + self.weights.challenge_per_lore * f64::from(defender.lore())
                    + self.weights.challenge_per_cost * f64::from(defender.cost());
                if attacker.is_lethal(challenge_damage(defender, attacker)) {
                    score -= self.weights.challenge_loss_per_cost * f64::from(attacker.cost());
                }
                score *= self.race.challenge;
                out.push(Candidate {
                    action,
                    score,
                    description: format!(
                        "Challenge {} with {} (value {:.1})",
                        defender.name(),
                        attacker.name(),
                        score
                    ),
                });
            }
        }
    }

    fn plays(&self, state: &GameState, out: &mut Vec<Candidate>) {
        for card in &state.active.hand {
            let untargeted = Action::Play { card: card.id, target: None };
            if !self.legal(state, untargeted) {
                continue;
            }
            let base = self.play_score(card);
            out.push(Candidate {
                action: untargeted,
                score: base,
                description: format!("Play {} (value {:.1})", card.name(), base),
            });

            let rule = self.engine.abilities().target_rule(card.key());
            if !rule.is_targeted() {
                continue;
            }
            let before = velocity::projected_velocity(&state.opposing, state.turn);
            for target in rule.legal_targets(state) {
                let Some(victim) = state.opposing.on_field(target) else {
                    continue;
                };
                let action = Action::Play { card: card.id, target: Some(target) };
                // Probe on a copy; the real state is untouched
                let Ok(probe) = self.engine.try_apply(state, &action) else {
                    continue;
                };
                let after = velocity::projected_velocity(&probe.opposing, probe.turn);
                let reduction = (before - after).max(0.0);
                let score = base + self.weights.target_velocity_reward * reduction;
                log::trace!("{} -> {}: velocity {:.2} -> {:.2}", card.name(), victim.name(), before, after);
                out.push(Candidate {
                    action,
                    score,
                    description: format!("Play {} on {} (value {:.1})", card.name(), victim.name(), score),
                });
            }
        }
    }

    fn inks(&self, state: &GameState, out: &mut Vec<Candidate>) {
        if state.active.has_inked_this_turn || state.active.hand.len() <= 1 {
            return;
        }
        let ready_ink = state.active.ready_ink();
        for card in &state.active.hand {
            if !self.legal(state, Action::Ink { card: card.id }) {
                continue;
            }
            let score = if card.cost() > ready_ink {
                self.weights.ink_unaffordable
            } else {
                self.weights.ink_spare
            };
            out.push(Candidate {
                action: Action::Ink { card: card.id },
                score,
                description: format!("Ink {} (value {:.1})", card.name(), score),
            });
        }
    }

    fn play_score(&self, card: &CardInstance) -> f64 {
        let mut score = self.weights.play_per_cost * f64::from(card.cost());
        if card.card_type() == CardType::Character {
            score += f64::from(card.template.strength)
                + f64::from(card.willpower())
                + self.weights.play_lore_multiplier * f64::from(card.lore());
        }
        score
    }

    fn legal(&self, state: &GameState, action: Action) -> bool {
        self.engine.validate(state, &action).is_ok()
    }
}

/// Could a ready opposing card banish `card` by challenging it once exerted?
#[must_use]
pub fn is_threatened(state: &GameState, card: &CardInstance) -> bool {
    state
        .opposing
        .zone(Zone::Field)
        .iter()
        .filter(|enemy| enemy.is_character() && !enemy.exerted)
        .any(|enemy| card.is_lethal(challenge_damage(enemy, card)))
}

/// Sort best first. Stable: ties keep enumeration order.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}
