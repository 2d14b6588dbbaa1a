//! Game save snapshots.
//!
//! A save holds the full [`GameState`] together with its [`GameHistory`],
//! so a loaded game can still be undone. `InMemorySaveStore` keeps each
//! save as a `bincode` blob.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameHistory, GameState};

/// Save identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SaveId(pub u64);

impl SaveId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save({})", self.0)
    }
}

/// A loaded save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub user_id: String,
    pub state: GameState,
    pub history: GameHistory,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no save with id {0}")]
    NotFound(SaveId),

    #[error("failed to encode save: {0}")]
    Codec(#[from] bincode::Error),
}

/// Storage for game snapshots.
pub trait GameSaveStore {
    /// Store a snapshot and return its id.
    fn save(
        &mut self,
        user_id: &str,
        state: &GameState,
        history: &GameHistory,
    ) -> Result<SaveId, SaveError>;

    fn load(&self, id: SaveId) -> Result<SavedGame, SaveError>;
}

#[derive(Serialize)]
struct SaveRef<'a> {
    user_id: &'a str,
    state: &'a GameState,
    history: &'a GameHistory,
}

/// In-memory store of bincode-encoded saves.
#[derive(Clone, Debug, Default)]
pub struct InMemorySaveStore {
    saves: FxHashMap<SaveId, Vec<u8>>,
    next_id: u64,
}

impl InMemorySaveStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }

    /// Encoded size of a save, in bytes.
    pub fn size_of(&self, id: SaveId) -> Option<usize> {
        self.saves.get(&id).map(Vec::len)
    }

    /// Drop a save. Returns `false` if it did not exist.
    pub fn delete(&mut self, id: SaveId) -> bool {
        self.saves.remove(&id).is_some()
    }
}

impl GameSaveStore for InMemorySaveStore {
    fn save(
        &mut self,
        user_id: &str,
        state: &GameState,
        history: &GameHistory,
    ) -> Result<SaveId, SaveError> {
        let bytes = bincode::serialize(&SaveRef {
            user_id,
            state,
            history,
        })?;
        let id = SaveId::new(self.next_id);
        self.next_id += 1;
        log::debug!("saved {id} for {user_id}: {} bytes", bytes.len());
        self.saves.insert(id, bytes);
        Ok(id)
    }

    fn load(&self, id: SaveId) -> Result<SavedGame, SaveError> {
        let bytes = self.saves.get(&id).ok_or(SaveError::NotFound(id))?;
        Ok(bincode::deserialize(bytes)?)
    }
}
