//! Rules: the turn sequence, the four main-phase actions, the banish sweep
//! and the lore-velocity metric.
//!
//! All of it hangs off `Engine`, which is split across the submodules by
//! concern.

pub mod actions;
pub mod cleanup;
pub mod engine;
pub mod turn;
pub mod velocity;

pub use actions::challenge_damage;
pub use cleanup::MAX_CLEANUP_PASSES;
pub use engine::Engine;
