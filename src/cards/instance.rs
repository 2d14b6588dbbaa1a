//! Card instances - runtime card state.
//!
//! `CardInstance` is one copy of a card on the field: its health, its
//! alterations, and, for personnage cards, its object slots.
//!
//! ## Object slots
//!
//! Slots are numbered from 1. An instance has no slots until
//! [`CardInstance::initialize_object_slots`] is called, and only
//! personnage cards accept that call. The slot count is fixed from then
//! on.
//!
//! - A slot holds at most one object, and an object sits in at most one slot
//!   of this card. Keeping an object on a single card is up to the owner of
//!   the instances; `GameSession::equip` does it for a running game.
//! - A locked slot neither accepts nor releases an object
//! - `temporary_stats` is recomputed after every equip/unequip

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardDefinition;
use super::stats::{Stats, HEALTH};
use crate::alterations::{Alteration, AlterationId, AlterationOutcome, AlterationSet};

/// Unique identifier for a card instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// 1-based object slot number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u8);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// An attachment point on a personnage card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSlot {
    pub slot_id: SlotId,
    pub equipped: Option<Arc<CardInstance>>,
    pub is_locked: bool,
}

impl ObjectSlot {
    fn empty(slot_id: SlotId) -> Self {
        Self {
            slot_id,
            equipped: None,
            is_locked: false,
        }
    }

    /// Unlocked and empty.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.is_locked && self.equipped.is_none()
    }
}

/// Inline storage for the usual three slots.
pub type ObjectSlots = SmallVec<[ObjectSlot; 3]>;

/// A card in play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    pub instance_id: InstanceId,

    pub definition: Arc<CardDefinition>,

    pub current_health: f64,

    pub max_health: f64,

    /// Base stats with equipment passives folded in.
    pub temporary_stats: Stats,

    /// `None` until slots are initialized (personnage cards only).
    pub object_slots: Option<ObjectSlots>,

    pub alterations: AlterationSet,

    /// Already acted this turn.
    pub is_exhausted: bool,
}

impl CardInstance {
    /// Create an instance at full health with no equipment.
    #[must_use]
    pub fn new(instance_id: InstanceId, definition: Arc<CardDefinition>) -> Self {
        let max_health = definition.stats.get(HEALTH).max(0.0);
        Self {
            instance_id,
            temporary_stats: definition.stats.clone(),
            definition,
            current_health: max_health,
            max_health,
            object_slots: None,
            alterations: AlterationSet::new(),
            is_exhausted: false,
        }
    }

    // === Object slots ===

    /// Give a personnage card `count` empty slots, numbered from 1.
    ///
    /// Returns `false` (and changes nothing) for other card kinds or if
    /// slots already exist.
    pub fn initialize_object_slots(&mut self, count: u8) -> bool {
        if !self.definition.is_personnage() || self.object_slots.is_some() {
            return false;
        }
        self.object_slots = Some((1..=count).map(|i| ObjectSlot::empty(SlotId::new(i))).collect());
        true
    }

    /// Look up a slot.
    #[must_use]
    pub fn slot(&self, slot_id: SlotId) -> Option<&ObjectSlot> {
        self.object_slots
            .as_ref()?
            .iter()
            .find(|s| s.slot_id == slot_id)
    }

    fn slot_mut(&mut self, slot_id: SlotId) -> Option<&mut ObjectSlot> {
        self.object_slots
            .as_mut()?
            .iter_mut()
            .find(|s| s.slot_id == slot_id)
    }

    /// Check if an instance is equipped in any slot.
    #[must_use]
    pub fn is_equipped(&self, object: InstanceId) -> bool {
        self.equipped_objects().any(|o| o.instance_id == object)
    }

    /// Equip an object.
    ///
    /// With a slot ID, that slot must exist, be unlocked and be empty.
    /// Without one, the first available slot is used. Fails if the object
    /// is already held by one of this card's slots.
    pub fn equip_object(&mut self, object: Arc<CardInstance>, slot_id: Option<SlotId>) -> bool {
        if self.is_equipped(object.instance_id) {
            return false;
        }
        let target = match slot_id {
            Some(id) => id,
            None => match self.available_object_slot() {
                Some(id) => id,
                None => return false,
            },
        };
        let holder = self.instance_id;
        let object_id = object.instance_id;
        let Some(slot) = self.slot_mut(target) else {
            return false;
        };
        if !slot.is_available() {
            return false;
        }
        slot.equipped = Some(object);

        log::debug!("{holder} equips {object_id} in slot {}", target.raw());
        self.recalculate_stats();
        true
    }

    /// Remove the object from a slot.
    ///
    /// `None` if the slot is absent, locked or empty.
    pub fn unequip_object(&mut self, slot_id: SlotId) -> Option<Arc<CardInstance>> {
        let slot = self.slot_mut(slot_id)?;
        if slot.is_locked {
            return None;
        }
        let object = slot.equipped.take()?;

        log::debug!(
            "{} unequips {} from slot {}",
            self.instance_id,
            object.instance_id,
            slot_id.raw()
        );
        self.recalculate_stats();
        Some(object)
    }

    /// Objects currently equipped, in slot order.
    pub fn equipped_objects(&self) -> impl Iterator<Item = &Arc<CardInstance>> {
        self.object_slots
            .iter()
            .flatten()
            .filter_map(|s| s.equipped.as_ref())
    }

    /// Check if any slot is unlocked and empty.
    #[must_use]
    pub fn has_available_object_slot(&self) -> bool {
        self.available_object_slot().is_some()
    }

    /// First unlocked, empty slot.
    #[must_use]
    pub fn available_object_slot(&self) -> Option<SlotId> {
        self.object_slots
            .as_ref()?
            .iter()
            .find(|s| s.is_available())
            .map(|s| s.slot_id)
    }

    /// Lock or unlock a slot. Returns `false` if the slot does not exist.
    pub fn set_slot_locked(&mut self, slot_id: SlotId, locked: bool) -> bool {
        match self.slot_mut(slot_id) {
            Some(slot) => {
                slot.is_locked = locked;
                true
            }
            None => false,
        }
    }

    /// Rebuild `temporary_stats` from base stats and equipped passives.
    ///
    /// Percentage boosts apply in slot order, each on the running value.
    /// Max health follows the health stat; current health is clamped to it.
    pub fn recalculate_stats(&mut self) {
        let mut stats = self.definition.stats.clone();
        for object in self.equipped_objects() {
            if let Some(effect) = object.definition.passive_effect {
                if let Some(key) = effect.stat() {
                    stats.boost(key, effect.value);
                }
            }
        }

        self.max_health = stats.get(HEALTH).max(0.0);
        self.current_health = self.current_health.min(self.max_health);
        self.temporary_stats = stats;
    }

    // === Health ===

    /// Take damage, clamped to current health. Returns damage dealt.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let actual = amount.min(self.current_health);
        self.current_health -= actual;
        actual
    }

    /// Restore health, clamped to max health. Returns health restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let healed = (self.current_health + amount).min(self.max_health);
        let actual = healed - self.current_health;
        self.current_health = healed;
        actual
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0.0
    }

    // === Alterations ===

    pub fn add_alteration(
        &mut self,
        alteration: Arc<Alteration>,
        source: Option<InstanceId>,
    ) -> AlterationOutcome {
        self.alterations.add(alteration, source)
    }

    pub fn remove_alteration(&mut self, id: AlterationId) -> bool {
        self.alterations.remove(id).is_some()
    }

    #[must_use]
    pub fn has_alteration(&self, id: AlterationId) -> bool {
        self.alterations.contains(id)
    }

    /// Run damage/heal over time. Returns the net health change.
    pub fn apply_alteration_effects(&mut self) -> f64 {
        let deltas: Vec<f64> = self.alterations.iter().map(|a| a.periodic_delta()).collect();
        deltas
            .into_iter()
            .map(|delta| {
                if delta < 0.0 {
                    -self.apply_damage(-delta)
                } else {
                    self.heal(delta)
                }
            })
            .sum()
    }

    // === Turn ===

    /// Can act: not exhausted and still standing.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.is_exhausted && self.current_health > 0.0
    }

    /// Start-of-turn reset: clear exhaustion and count alterations down.
    ///
    /// Returns the alterations that expired.
    pub fn reset_for_next_turn(&mut self) -> Vec<AlterationId> {
        self.is_exhausted = false;
        self.alterations.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alterations::{AlterationEffect, AlterationKind};
    use crate::cards::definition::{CardId, CardKind, PassiveEffect, PassiveKind};
    use crate::cards::stats::ATTACK;

    fn knight() -> CardInstance {
        let def = CardDefinition::new(CardId::new(1), "Chevalier", CardKind::Personnage)
            .with_stat(ATTACK, 10.0)
            .with_stat(HEALTH, 20.0);
        let mut card = CardInstance::new(InstanceId::new(1), Arc::new(def));
        assert!(card.initialize_object_slots(3));
        card
    }

    fn sword(id: u32) -> Arc<CardInstance> {
        let def = CardDefinition::new(CardId::new(10), "Épée", CardKind::Objet)
            .with_passive(PassiveEffect::new(PassiveKind::AttackBoost, 50.0));
        Arc::new(CardInstance::new(InstanceId::new(id), Arc::new(def)))
    }

    #[test]
    fn test_slots_only_for_personnage() {
        let mut object = CardInstance::new(InstanceId::new(2), sword(2).definition.clone());
        assert!(!object.initialize_object_slots(3));
        assert!(object.object_slots.is_none());
        assert!(!object.has_available_object_slot());
    }

    #[test]
    fn test_initialize_slots() {
        let card = knight();
        let slots = card.object_slots.as_ref().unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].slot_id, SlotId::new(1));
        assert!(slots.iter().all(ObjectSlot::is_available));
    }

    #[test]
    fn test_equip_recomputes_stats() {
        let mut card = knight();
        assert!(card.equip_object(sword(2), None));
        assert_eq!(card.temporary_stats.get(ATTACK), 15.0);

        assert!(card.equip_object(sword(3), Some(SlotId::new(3))));
        assert_eq!(card.temporary_stats.get(ATTACK), 22.5);

        assert!(card.unequip_object(SlotId::new(1)).is_some());
        assert_eq!(card.temporary_stats.get(ATTACK), 15.0);
    }

    #[test]
    fn test_same_object_twice_rejected() {
        let mut card = knight();
        let s = sword(2);
        assert!(card.equip_object(s.clone(), Some(SlotId::new(1))));
        assert!(!card.equip_object(s, Some(SlotId::new(2))));
        assert_eq!(card.equipped_objects().count(), 1);
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut card = knight();
        assert!(!card.equip_object(sword(2), Some(SlotId::new(4))));
        assert!(card.unequip_object(SlotId::new(0)).is_none());
    }

    #[test]
    fn test_card_health() {
        let mut card = knight();
        assert_eq!(card.apply_damage(25.0), 20.0);
        assert!(card.is_defeated());
        assert!(!card.can_attack());
        assert_eq!(card.heal(5.0), 5.0);
        assert_eq!(card.heal(50.0), 15.0);
        assert_eq!(card.current_health, 20.0);
    }

    #[test]
    fn test_alteration_effects_on_card() {
        let mut card = knight();
        let bleed = Arc::new(
            Alteration::new(AlterationId::new(1), "Saignement", AlterationKind::Debuff)
                .stackable()
                .with_duration(1)
                .with_effect(AlterationEffect::DamageOverTime { value: 3.0 }),
        );
        card.add_alteration(bleed.clone(), None);
        card.add_alteration(bleed, None);

        assert_eq!(card.apply_alteration_effects(), -6.0);
        assert_eq!(card.current_health, 14.0);

        card.is_exhausted = true;
        assert_eq!(card.reset_for_next_turn(), vec![AlterationId::new(1)]);
        assert!(card.can_attack());
        assert!(!card.has_alteration(AlterationId::new(1)));
    }
}
