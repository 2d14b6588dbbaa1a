//! Combat resolution and the game session that drives it.
//!
//! ## Key Types
//!
//! - `CombatAction` / `Effect`: what a player does and its consequences
//! - `CombatResolver`: pays for an action and applies it to the bases
//! - `GameSession`: owns state, bases, combat log and history for one game

pub mod action;
pub mod resolver;
pub mod session;

pub use action::{CombatAction, Effect};
pub use resolver::{Bases, CombatError, CombatResolver, Resolution};
pub use session::{GameSession, SharedContent};
