//! Batch execution.
//!
//! Every match gets its own random stream, derived from the batch seed and
//! the match index, so a batch reproduces exactly whether it runs
//! sequentially or on the rayon pool.
//!
//! ## Scheduling
//!
//! - Sequential: yields the thread every `yield_every` matches and reports
//!   progress at the same points
//! - Parallel: runs chunks of matches on the rayon pool and reports
//!   progress after each chunk
//!
//! Cancellation stops scheduling new matches. A match already running is
//! always played to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::abilities::AbilityRegistry;
use crate::ai::HeuristicAi;
use crate::cards::CardPool;
use crate::core::GameRng;
use crate::rules::Engine;

use super::config::BatchConfig;
use super::deck::DeckSource;
use super::runner::{MatchResult, MatchRunner};
use super::stats::BatchReport;

/// Matches handed to the rayon pool at a time.
const PARALLEL_CHUNK: usize = 64;

/// Runs batches of AI-vs-AI matches.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: BatchConfig,
    runner: MatchRunner,
    ai: HeuristicAi,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl Simulator {
    /// Create a simulator using the built-in abilities.
    #[must_use]
    pub fn new(config: BatchConfig) -> Self {
        let engine = Engine::new(config.rules.clone());
        Self::with_engine(config, engine)
    }

    /// Use a custom ability registry.
    #[must_use]
    pub fn with_registry(self, abilities: Arc<AbilityRegistry>) -> Self {
        let engine = Engine::new(self.config.rules.clone()).with_registry(abilities);
        Self::with_engine(self.config, engine)
    }

    fn with_engine(config: BatchConfig, engine: Engine) -> Self {
        let ai = HeuristicAi::new(engine.clone()).with_weights(config.weights.clone());
        Self {
            runner: MatchRunner::new(engine),
            ai,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Play match `index` of the batch.
    #[must_use]
    pub fn play_match(&self, deck_a: &DeckSource, deck_b: &DeckSource, index: usize) -> MatchResult {
        let mut rng = GameRng::new(self.config.seed).for_match(index as u64);
        let seed = rng.seed();
        let size = self.config.rules.deck_size;
        let a = deck_a.build(size, &mut rng);
        let b = deck_b.build(size, &mut rng);
        self.runner.play(&a, &b, &self.ai, &self.ai, seed)
    }

    /// Mirror batch: both sides draw from the same source.
    pub fn run_batch(&self, source: &DeckSource, on_progress: impl FnMut(usize)) -> BatchReport {
        self.run_matchup(source, source, on_progress)
    }

    /// Seat A plays `deck_a`, seat B plays `deck_b`.
    pub fn run_matchup(&self, deck_a: &DeckSource, deck_b: &DeckSource, on_progress: impl FnMut(usize)) -> BatchReport {
        self.run_matchup_cancellable(deck_a, deck_b, on_progress, &AtomicBool::new(false))
    }

    /// Mirror batch that stops scheduling once `cancel` is set.
    pub fn run_batch_cancellable(
        &self,
        source: &DeckSource,
        on_progress: impl FnMut(usize),
        cancel: &AtomicBool,
    ) -> BatchReport {
        self.run_matchup_cancellable(source, source, on_progress, cancel)
    }

    /// Matchup that stops scheduling once `cancel` is set.
    pub fn run_matchup_cancellable(
        &self,
        deck_a: &DeckSource,
        deck_b: &DeckSource,
        on_progress: impl FnMut(usize),
        cancel: &AtomicBool,
    ) -> BatchReport {
        let requested = self.config.iterations;
        log::info!(
            "running {} matches (seed {}, {})",
            requested,
            self.config.seed,
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let results = if self.config.parallel {
            self.run_parallel(deck_a, deck_b, on_progress, cancel)
        } else {
            self.run_sequential(deck_a, deck_b, on_progress, cancel)
        };

        let mut report = BatchReport::from_results(&results);
        report.cancelled = results.len() < requested;
        if report.cancelled {
            log::info!("batch cancelled after {} of {} matches", results.len(), requested);
        }
        log::info!(
            "batch done: win rate {:.1}%, avg turns {:.1}, avg velocity {:.2}, power {:.2}",
            report.win_rate,
            report.avg_turns,
            report.avg_lore_velocity,
            report.power_score
        );
        report
    }

    fn run_sequential(
        &self,
        deck_a: &DeckSource,
        deck_b: &DeckSource,
        mut on_progress: impl FnMut(usize),
        cancel: &AtomicBool,
    ) -> Vec<MatchResult> {
        let total = self.config.iterations;
        let every = self.config.yield_every.max(1);
        let mut results = Vec::with_capacity(total);

        for i in 0..total {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            if i % every == 0 {
                std::thread::yield_now();
                on_progress(i);
            }
            results.push(self.play_match(deck_a, deck_b, i));
        }
        if results.len() == total {
            on_progress(total);
        }
        results
    }

    fn run_parallel(
        &self,
        deck_a: &DeckSource,
        deck_b: &DeckSource,
        mut on_progress: impl FnMut(usize),
        cancel: &AtomicBool,
    ) -> Vec<MatchResult> {
        let total = self.config.iterations;
        let mut results = Vec::with_capacity(total);
        let mut start = 0;

        while start < total && !cancel.load(Ordering::Relaxed) {
            let end = (start + PARALLEL_CHUNK).min(total);
            let chunk: Vec<Option<MatchResult>> = (start..end)
                .into_par_iter()
                .map(|i| {
                    if cancel.load(Ordering::Relaxed) {
                        None
                    } else {
                        Some(self.play_match(deck_a, deck_b, i))
                    }
                })
                .collect();

            // keep only the unbroken prefix so the report stays reproducible
            let before = results.len();
            results.extend(chunk.into_iter().map_while(|r| r));
            let complete = results.len() - before == end - start;
            on_progress(results.len());
            if !complete {
                break;
            }
            start = end;
        }
        results
    }
}

/// Mirror batch over every card in `pool` with default settings.
///
/// ```
/// use deckforge::cards::starter;
/// use deckforge::sim;
///
/// let report = sim::run_batch(&starter::pool(), 2, |_| {});
/// assert_eq!(report.matches_played, 2);
/// assert!((0.0..=100.0).contains(&report.win_rate));
/// ```
pub fn run_batch(pool: &CardPool, iterations: usize, on_progress: impl FnMut(usize)) -> BatchReport {
    Simulator::new(BatchConfig::new(iterations)).run_batch(&DeckSource::from_pool(pool), on_progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter;
    use crate::core::RulesConfig;

    fn quick(iterations: usize) -> BatchConfig {
        BatchConfig::new(iterations)
            .with_seed(11)
            .with_rules(RulesConfig::default().with_max_turns(15))
    }

    #[test]
    fn test_zero_iterations() {
        let sim = Simulator::new(quick(0));
        let report = sim.run_batch(&DeckSource::from_pool(&starter::pool()), |_| {});
        assert_eq!(report.matches_played, 0);
        assert_eq!(report.win_rate, 0.0);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_progress_reported() {
        let sim = Simulator::new(quick(12).with_yield_every(5));
        let mut seen = Vec::new();
        sim.run_batch(&DeckSource::from_pool(&starter::pool()), |i| seen.push(i));
        assert_eq!(seen, vec![0, 5, 10, 12]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = DeckSource::from_pool(&starter::pool());
        let sequential = Simulator::new(quick(8)).run_batch(&source, |_| {});
        let parallel = Simulator::new(quick(8).with_parallel(true)).run_batch(&source, |_| {});
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_cancel_before_start() {
        let sim = Simulator::new(quick(10));
        let cancel = AtomicBool::new(true);
        let report = sim.run_batch_cancellable(&DeckSource::from_pool(&starter::pool()), |_| {}, &cancel);
        assert_eq!(report.matches_played, 0);
        assert!(report.cancelled);
    }

    #[test]
    fn test_cancel_midway() {
        let sim = Simulator::new(quick(10).with_yield_every(1));
        let cancel = AtomicBool::new(false);
        let report = sim.run_batch_cancellable(
            &DeckSource::from_pool(&starter::pool()),
            |i| {
                if i == 3 {
                    cancel.store(true, Ordering::Relaxed);
                }
            },
            &cancel,
        );
        // the match scheduled at the cancel point still runs
        assert_eq!(report.matches_played, 4);
        assert!(report.cancelled);
    }
}
