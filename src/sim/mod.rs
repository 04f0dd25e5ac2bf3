//! Headless Monte-Carlo match simulation.
//!
//! Drives AI-vs-AI matches with the rules engine and aggregates the results
//! into a `BatchReport` whose `power_score` compares deck archetypes.
//!
//! ```
//! use deckforge::cards::starter;
//! use deckforge::sim::{BatchConfig, DeckSource, Simulator};
//!
//! let sim = Simulator::new(BatchConfig::new(4).with_seed(3));
//! let report = sim.run_batch(&DeckSource::from_pool(&starter::pool()), |_| {});
//! assert_eq!(report.matches_played, 4);
//! assert_eq!(report.wins + report.losses + report.draws, 4);
//! ```

pub mod batch;
pub mod config;
pub mod deck;
pub mod runner;
pub mod stats;

pub use batch::{run_batch, Simulator};
pub use config::BatchConfig;
pub use deck::DeckSource;
pub use runner::{EndReason, MatchResult, MatchRunner, Seat};
pub use stats::BatchReport;
