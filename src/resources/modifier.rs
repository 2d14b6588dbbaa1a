//! Motivation modifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a modifier, unique within one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifierId(pub u64);

impl ModifierId {
    /// Create a new modifier ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Modifier({})", self.0)
    }
}

/// A bonus or malus on a player's per-turn motivation.
///
/// Absolute modifiers add `value`. Percentage modifiers scale the running
/// total by `1 + value / 100`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceModifier {
    pub id: ModifierId,

    /// Amount (negative for a malus).
    pub value: f64,

    /// Interpret `value` as a percentage.
    #[serde(default)]
    pub is_percentage: bool,

    /// What granted the modifier (card name, effect, ...).
    pub source: String,

    /// Renewals left. `None` is permanent. External records may encode
    /// permanence as `-1`, which deserializes to `None`.
    #[serde(
        default,
        serialize_with = "duration_as_signed",
        deserialize_with = "negative_is_permanent"
    )]
    pub duration: Option<u32>,
}

impl ResourceModifier {
    /// Create a permanent absolute modifier.
    pub fn new(id: ModifierId, value: f64, source: impl Into<String>) -> Self {
        Self {
            id,
            value,
            is_percentage: false,
            source: source.into(),
            duration: None,
        }
    }

    /// Mark as percentage (builder pattern).
    #[must_use]
    pub fn percentage(mut self) -> Self {
        self.is_percentage = true;
        self
    }

    /// Set a duration in renewals (builder pattern).
    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    /// Check if the modifier never expires.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }

    /// Check if the modifier has run out and will be dropped at the next renewal.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.duration == Some(0)
    }
}

// Encoded signed to match `negative_is_permanent`.
pub(crate) fn duration_as_signed<S>(duration: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    duration.map(i64::from).serialize(serializer)
}

pub(crate) fn negative_is_permanent<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|d| u32::try_from(d).ok()))
}
