//! Alteration ledger: timed buffs/debuffs and the player base they sit on.
//!
//! ## Key Types
//!
//! - `Alteration`: immutable definition (stackable, duration, effect)
//! - `AlterationSet`: live entries with stack counts and countdowns
//! - `PlayerBase`: health pool with damage reduction plus an `AlterationSet`
//! - `HealthChange`: what a damage/heal call actually did

pub mod active;
pub mod base;
pub mod definition;

pub use active::{ActiveAlteration, AlterationOutcome, AlterationSet};
pub use base::{BaseId, HealthChange, HealthChangeKind, PlayerBase, PlayerBaseConfig};
pub use definition::{Alteration, AlterationEffect, AlterationId, AlterationKind};
