//! Card system: templates, instances, the card pool and deck manifests.
//!
//! ## Templates vs Instances
//!
//! - `CardTemplate`: static printed data (name, cost, stats, keywords)
//! - `CardInstance`: one copy in a match (damage, exertion, modifiers)
//!
//! Instances share their template through an `Arc`; templates are never
//! mutated after loading.

pub mod definition;
pub mod instance;
pub mod manifest;
pub mod registry;
pub mod starter;

pub use definition::{CardKey, CardTemplate, CardType, Keywords};
pub use instance::{CardInstance, Modifiers};
pub use manifest::{DeckManifest, Hydration, HydrationGap};
pub use registry::CardPool;
