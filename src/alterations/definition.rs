//! Alteration definitions - immutable reference data.
//!
//! Definitions come from the content repository and are shared between
//! every base and card that carries them via `Arc<Alteration>`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for an alteration definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlterationId(pub u32);

impl AlterationId {
    /// Create a new alteration ID.
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

impl std::fmt::Display for AlterationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alteration({})", self.0)
    }
}

/// Broad category of an alteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlterationKind {
    Buff,
    Debuff,
    Status,
    #[default]
    #[serde(other)]
    Other,
}

/// What an alteration does each turn.
///
/// Stored as `{ "action": "...", "value": n }`. Only the periodic
/// actions are interpreted by the engine; everything else is carried
/// through as [`AlterationEffect::Other`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AlterationEffect {
    /// Damage per turn, per stack.
    DamageOverTime { value: f64 },
    /// Healing per turn, per stack.
    HealOverTime { value: f64 },
    #[default]
    #[serde(other)]
    Other,
}

/// Static alteration definition.
///
/// ## Example
///
/// ```
/// use yeayeayea_engine::alterations::{Alteration, AlterationEffect, AlterationId, AlterationKind};
///
/// let poison = Alteration::new(AlterationId::new(1), "Poison", AlterationKind::Debuff)
///     .stackable()
///     .with_duration(3)
///     .with_effect(AlterationEffect::DamageOverTime { value: 2.0 });
///
/// assert!(poison.stackable);
/// assert_eq!(poison.duration, Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alteration {
    pub id: AlterationId,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: AlterationKind,

    /// Re-application adds a stack instead of refreshing.
    #[serde(default)]
    pub stackable: bool,

    #[serde(default)]
    pub unique_effect: bool,

    /// Turns the alteration lasts. `None` (or a stored 0) is permanent.
    #[serde(
        default,
        serialize_with = "duration_as_signed",
        deserialize_with = "non_positive_is_permanent"
    )]
    pub duration: Option<u32>,

    #[serde(default)]
    pub effect: AlterationEffect,
}

impl Alteration {
    /// Create a permanent, non-stackable alteration with no periodic effect.
    pub fn new(id: AlterationId, name: impl Into<String>, kind: AlterationKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stackable: false,
            unique_effect: false,
            duration: None,
            effect: AlterationEffect::Other,
        }
    }

    /// Allow stacking (builder pattern).
    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Mark as a unique effect (builder pattern).
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique_effect = true;
        self
    }

    /// Set the duration in turns. 0 means permanent.
    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = (turns > 0).then_some(turns);
        self
    }

    /// Set the periodic effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: AlterationEffect) -> Self {
        self.effect = effect;
        self
    }
}

fn duration_as_signed<S>(duration: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    duration.map(i64::from).serialize(serializer)
}

fn non_positive_is_permanent<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|d| *d > 0)
        .and_then(|d| u32::try_from(d).ok()))
}
