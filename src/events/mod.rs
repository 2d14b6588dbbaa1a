//! Combat events and the log they are published on.
//!
//! ## Key Types
//!
//! - `CombatEvent`: typed record of one combat outcome
//! - `CombatLog`: in-process bus with explicit subscription tokens

pub mod event;
pub mod bus;

pub use event::CombatEvent;
pub use bus::{CombatLog, Listener, SubscriptionId};
