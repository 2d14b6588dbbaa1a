//! Content lookup: card and alteration definitions.
//!
//! The host application owns the content database. The engine only
//! needs read access by ID, expressed by [`ContentRepository`].
//! [`CardRegistry`] is the in-memory implementation.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::definition::{CardDefinition, CardId, CardKind};
use crate::alterations::{Alteration, AlterationId};

/// Why a content batch was rejected. Nothing is registered when one is
/// returned.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate card {0}")]
    DuplicateCard(CardId),

    #[error("duplicate alteration {0}")]
    DuplicateAlteration(AlterationId),
}

/// Read-only lookup of immutable content records.
pub trait ContentRepository {
    /// Get a card definition.
    fn card(&self, id: CardId) -> Option<Arc<CardDefinition>>;

    /// Get an alteration definition.
    fn alteration(&self, id: AlterationId) -> Option<Arc<Alteration>>;

    /// Get several cards. Unknown IDs are skipped.
    fn cards(&self, ids: &[CardId]) -> Vec<Arc<CardDefinition>> {
        ids.iter().filter_map(|id| self.card(*id)).collect()
    }

    /// Get several alterations. Unknown IDs are skipped.
    fn alterations(&self, ids: &[AlterationId]) -> Vec<Arc<Alteration>> {
        ids.iter().filter_map(|id| self.alteration(*id)).collect()
    }
}

/// In-memory content registry.
///
/// ## Example
///
/// ```
/// use yeayeayea_engine::cards::{CardDefinition, CardId, CardKind, CardRegistry, ContentRepository};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Chevalier", CardKind::Personnage));
///
/// assert_eq!(registry.card(CardId::new(1)).unwrap().name, "Chevalier");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    alterations: FxHashMap<AlterationId, Arc<Alteration>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) -> Arc<CardDefinition> {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        let card = Arc::new(card);
        self.cards.insert(card.id, Arc::clone(&card));
        card
    }

    /// Register an alteration definition.
    ///
    /// Panics if an alteration with the same ID already exists.
    pub fn register_alteration(&mut self, alteration: Alteration) -> Arc<Alteration> {
        if self.alterations.contains_key(&alteration.id) {
            panic!("Alteration with ID {:?} already registered", alteration.id);
        }
        let alteration = Arc::new(alteration);
        self.alterations.insert(alteration.id, Arc::clone(&alteration));
        alteration
    }

    /// Load card records from a JSON array.
    ///
    /// The batch is all-or-nothing: a parse error or an ID that is already
    /// registered (or repeated in the batch) registers nothing.
    pub fn load_cards_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut seen = FxHashSet::default();
        if let Some(card) = cards
            .iter()
            .find(|c| self.cards.contains_key(&c.id) || !seen.insert(c.id))
        {
            return Err(RegistryError::DuplicateCard(card.id));
        }

        let count = cards.len();
        for card in cards {
            self.cards.insert(card.id, Arc::new(card));
        }
        log::debug!("loaded {count} cards");
        Ok(count)
    }

    /// Load alteration records from a JSON array. All-or-nothing, like
    /// [`CardRegistry::load_cards_json`].
    pub fn load_alterations_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let alterations: Vec<Alteration> = serde_json::from_str(json)?;
        let mut seen = FxHashSet::default();
        if let Some(alteration) = alterations
            .iter()
            .find(|a| self.alterations.contains_key(&a.id) || !seen.insert(a.id))
        {
            return Err(RegistryError::DuplicateAlteration(alteration.id));
        }

        let count = alterations.len();
        for alteration in alterations {
            self.alterations.insert(alteration.id, Arc::new(alteration));
        }
        log::debug!("loaded {count} alterations");
        Ok(count)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find cards by kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(move |c| c.kind == kind)
    }
}

impl ContentRepository for CardRegistry {
    fn card(&self, id: CardId) -> Option<Arc<CardDefinition>> {
        self.cards.get(&id).cloned()
    }

    fn alteration(&self, id: AlterationId) -> Option<Arc<Alteration>> {
        self.alterations.get(&id).cloned()
    }
}
