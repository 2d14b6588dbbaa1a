//! Card system: definitions, instances, equipment and content lookup.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (kind, stats, passive effect)
//! - `CardInstance`: Runtime card state (health, slots, alterations)
//! - `ObjectSlot`: Equipment attachment point on a personnage
//! - `ContentRepository`: Read-only lookup, implemented by `CardRegistry`

pub mod definition;
pub mod instance;
pub mod registry;
pub mod stats;

pub use definition::{CardDefinition, CardId, CardKind, PassiveEffect, PassiveKind};
pub use instance::{CardInstance, InstanceId, ObjectSlot, ObjectSlots, SlotId};
pub use registry::{CardRegistry, ContentRepository, RegistryError};
pub use stats::{StatKey, Stats};
