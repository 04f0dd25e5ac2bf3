//! Card abilities: the hook registry and the built-in ability set.

pub mod builtin;
pub mod registry;

pub use registry::{AbilityFn, AbilityRegistry, CardAbilities, Hook, TargetRule};
