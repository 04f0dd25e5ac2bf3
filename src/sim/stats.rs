//! Aggregate statistics over a batch of matches.

use serde::{Deserialize, Serialize};

use super::runner::{EndReason, MatchResult, Seat};

/// Summary of a batch, from seat A's point of view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Matches completed (fewer than requested if cancelled).
    pub matches_played: usize,

    pub wins: usize,
    pub losses: usize,
    pub draws: usize,

    /// Seat A win percentage, 0 to 100.
    pub win_rate: f64,

    /// Mean rounds per match.
    pub avg_turns: f64,

    /// Mean lore velocity of seat A.
    pub avg_lore_velocity: f64,

    /// Mean lore velocity of seat B.
    pub avg_opponent_velocity: f64,

    /// Matches decided by lore.
    pub lore_wins: usize,

    /// Matches decided by deck-out.
    pub deck_outs: usize,

    /// Matches that hit the round cap.
    pub turn_caps: usize,

    /// `win_rate + 10 * avg_lore_velocity`.
    pub power_score: f64,

    /// Set if the batch stopped early.
    pub cancelled: bool,
}

impl BatchReport {
    /// Summarize results in order.
    ///
    /// An empty slice gives an all-zero report.
    ///
    /// ```
    /// use deckforge::sim::BatchReport;
    ///
    /// let report = BatchReport::from_results(&[]);
    /// assert_eq!(report.win_rate, 0.0);
    /// assert_eq!(report.power_score, 0.0);
    /// ```
    #[must_use]
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut acc = Accumulator::default();
        for result in results {
            acc.record(result);
        }
        acc.finish()
    }

    /// Seat B win percentage.
    #[must_use]
    pub fn loss_rate(&self) -> f64 {
        percent(self.losses, self.matches_played)
    }

    /// Draw percentage.
    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        percent(self.draws, self.matches_played)
    }
}

#[derive(Default)]
struct Accumulator {
    report: BatchReport,
    turns: u64,
    velocity_a: f64,
    velocity_b: f64,
}

impl Accumulator {
    fn record(&mut self, result: &MatchResult) {
        let r = &mut self.report;
        r.matches_played += 1;
        match result.winner {
            Some(Seat::A) => r.wins += 1,
            Some(Seat::B) => r.losses += 1,
            None => r.draws += 1,
        }
        match result.reason {
            EndReason::Lore => r.lore_wins += 1,
            EndReason::DeckOut => r.deck_outs += 1,
            EndReason::TurnCap => r.turn_caps += 1,
        }
        self.turns += u64::from(result.turns);
        self.velocity_a += result.velocity_a;
        self.velocity_b += result.velocity_b;
    }

    fn finish(mut self) -> BatchReport {
        let n = self.report.matches_played;
        if n > 0 {
            let count = n as f64;
            self.report.win_rate = percent(self.report.wins, n);
            self.report.avg_turns = self.turns as f64 / count;
            self.report.avg_lore_velocity = self.velocity_a / count;
            self.report.avg_opponent_velocity = self.velocity_b / count;
            self.report.power_score = self.report.win_rate + self.report.avg_lore_velocity * 10.0;
        }
        self.report
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<Seat>, reason: EndReason, turns: u32, velocity_a: f64) -> MatchResult {
        MatchResult {
            winner,
            reason,
            turns,
            velocity_a,
            velocity_b: 1.0,
            seed: 0,
        }
    }

    #[test]
    fn test_report_aggregates() {
        let results = [
            result(Some(Seat::A), EndReason::Lore, 10, 2.0),
            result(Some(Seat::B), EndReason::DeckOut, 20, 1.0),
            result(None, EndReason::TurnCap, 60, 0.0),
            result(Some(Seat::A), EndReason::Lore, 10, 1.0),
        ];
        let report = BatchReport::from_results(&results);
        assert_eq!(report.matches_played, 4);
        assert_eq!((report.wins, report.losses, report.draws), (2, 1, 1));
        assert_eq!((report.lore_wins, report.deck_outs, report.turn_caps), (2, 1, 1));
        assert_eq!(report.win_rate, 50.0);
        assert_eq!(report.avg_turns, 25.0);
        assert_eq!(report.avg_lore_velocity, 1.0);
        assert_eq!(report.avg_opponent_velocity, 1.0);
        assert_eq!(report.power_score, 60.0);
        assert_eq!(report.loss_rate(), 25.0);
        assert_eq!(report.draw_rate(), 25.0);
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::from_results(&[]);
        assert_eq!(report, BatchReport::default());
        assert_eq!(report.loss_rate(), 0.0);
    }
}
