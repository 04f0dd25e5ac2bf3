//! Core engine types: ids, sides, state, actions, RNG, configuration, errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Action;
pub use config::RulesConfig;
pub use entity::InstanceId;
pub use error::{CardKeyError, IllegalAction};
pub use player::{PlayerState, Zone};
pub use rng::GameRng;
pub use state::{GameState, Phase, Side};
