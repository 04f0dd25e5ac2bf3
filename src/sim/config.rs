//! Batch simulation configuration.

use serde::{Deserialize, Serialize};

use crate::ai::HeuristicWeights;
use crate::core::RulesConfig;

/// Configuration for a batch of simulated matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Matches to play.
    pub iterations: usize,

    /// Batch seed. Match `i` derives its own stream from it, so results do
    /// not depend on scheduling.
    pub seed: u64,

    /// Spread matches across the rayon thread pool.
    pub parallel: bool,

    /// Sequential runs yield the thread every this many matches.
    pub yield_every: usize,

    /// Match rules.
    #[serde(default)]
    pub rules: RulesConfig,

    /// AI weights, used for both sides.
    #[serde(default)]
    pub weights: HeuristicWeights,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            seed: 42,
            parallel: false,
            yield_every: 5,
            rules: RulesConfig::default(),
            weights: HeuristicWeights::default(),
        }
    }
}

impl BatchConfig {
    /// Create a config for `iterations` matches.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Set the batch seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run matches in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the yield interval.
    pub fn with_yield_every(mut self, matches: usize) -> Self {
        self.yield_every = matches;
        self
    }

    /// Set the match rules.
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set the AI weights.
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }
}
