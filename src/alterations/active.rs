//! Live alterations carried by a base or a card.
//!
//! ## Stacking rules
//!
//! | Definition   | Already present | Result                                     |
//! |--------------|-----------------|--------------------------------------------|
//! | any          | no              | new entry, 1 stack, definition's duration  |
//! | non-stackable| yes             | duration refreshed, still one entry        |
//! | stackable    | yes             | +1 stack, duration refreshed if it has one |
//!
//! ## Expiry
//!
//! [`AlterationSet::tick`] counts timed entries down by one and drops the
//! ones that reach 0. Permanent entries (`remaining_duration == None`)
//! are never dropped by a tick.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{Alteration, AlterationEffect, AlterationId};
use crate::cards::InstanceId;

/// An alteration applied to something.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveAlteration {
    pub alteration: Arc<Alteration>,

    /// Turns left. `None` is permanent.
    pub remaining_duration: Option<u32>,

    pub stack_count: u32,

    /// Card instance that applied it, if any.
    pub source: Option<InstanceId>,
}

impl ActiveAlteration {
    /// Alteration ID shortcut.
    #[must_use]
    pub fn id(&self) -> AlterationId {
        self.alteration.id
    }

    /// Net health change this entry causes per turn (negative = damage).
    #[must_use]
    pub fn periodic_delta(&self) -> f64 {
        let stacks = f64::from(self.stack_count);
        match self.alteration.effect {
            AlterationEffect::DamageOverTime { value } => -value * stacks,
            AlterationEffect::HealOverTime { value } => value * stacks,
            AlterationEffect::Other => 0.0,
        }
    }
}

/// What [`AlterationSet::add`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlterationOutcome {
    /// A new entry was created.
    Added,
    /// An existing non-stackable entry had its duration reset.
    Refreshed,
    /// An existing stackable entry gained a stack (new count inside).
    Stacked(u32),
}

/// Ordered set of live alterations, at most one entry per alteration ID.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterationSet {
    entries: Vec<ActiveAlteration>,
}

impl AlterationSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an alteration following the stacking rules.
    pub fn add(&mut self, alteration: Arc<Alteration>, source: Option<InstanceId>) -> AlterationOutcome {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id() == alteration.id) {
            if alteration.stackable {
                existing.stack_count += 1;
                if alteration.duration.is_some() {
                    existing.remaining_duration = alteration.duration;
                }
                return AlterationOutcome::Stacked(existing.stack_count);
            }
            existing.remaining_duration = alteration.duration;
            return AlterationOutcome::Refreshed;
        }

        self.entries.push(ActiveAlteration {
            remaining_duration: alteration.duration,
            alteration,
            stack_count: 1,
            source,
        });
        AlterationOutcome::Added
    }

    /// Remove an entry. Returns it if it was present.
    pub fn remove(&mut self, id: AlterationId) -> Option<ActiveAlteration> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Check if an alteration is present.
    #[must_use]
    pub fn contains(&self, id: AlterationId) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Get an entry by alteration ID.
    #[must_use]
    pub fn get(&self, id: AlterationId) -> Option<&ActiveAlteration> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Count down timed entries and drop the expired ones.
    ///
    /// Returns the IDs that expired, in set order.
    pub fn tick(&mut self) -> Vec<AlterationId> {
        let mut expired = Vec::new();
        self.entries.retain_mut(|entry| match entry.remaining_duration {
            None => true,
            Some(turns) => {
                let left = turns.saturating_sub(1);
                entry.remaining_duration = Some(left);
                if left == 0 {
                    expired.push(entry.id());
                    false
                } else {
                    true
                }
            }
        });
        expired
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in application order.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveAlteration> {
        self.entries.iter()
    }
}
