//! Resource economy: the regenerating "motivation" pool.
//!
//! ## Key Types
//!
//! - `ResourceModifier`: additive or percentage bonus, optionally timed
//! - `ModifierId`: per-player modifier handle
//!
//! The operations in [`motivation`] are free functions over `&Player`.

pub mod modifier;
pub mod motivation;

pub use modifier::{ModifierId, ResourceModifier};
pub use motivation::{
    add_modifier, consume, effective_base, initialize_motivation, remove_modifier, renew,
};
