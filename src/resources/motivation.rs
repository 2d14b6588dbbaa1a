//! Per-turn motivation economy.
//!
//! All operations are pure: they take a `&Player` and return a new
//! `Player`. Callers swap their own reference.
//!
//! ## Renewal order
//!
//! 1. Start from `base_motivation` (default 10)
//! 2. Drop modifiers whose duration reached 0
//! 3. Decrement remaining finite durations
//! 4. Add every absolute modifier, in list order
//! 5. Multiply by `1 + v/100` for every percentage modifier, in list order
//! 6. Round half away from zero, floor at 0

use crate::core::config::DEFAULT_MOTIVATION;
use crate::core::player::Player;

use super::modifier::{ModifierId, ResourceModifier};

/// Per-turn budget a player renews to before modifiers.
///
/// An unset or zero base falls back to [`DEFAULT_MOTIVATION`].
#[must_use]
pub fn effective_base(player: &Player) -> u32 {
    match player.base_motivation {
        Some(base) if base > 0 => base,
        _ => DEFAULT_MOTIVATION,
    }
}

/// Recompute a player's motivation at the start of their turn.
#[must_use]
pub fn renew(player: &Player) -> Player {
    let modifiers: Vec<ResourceModifier> = player
        .motivation_modifiers
        .iter()
        .filter(|m| !m.is_expired())
        .cloned()
        .map(|mut m| {
            if let Some(turns) = m.duration {
                m.duration = Some(turns - 1);
            }
            m
        })
        .collect();

    let mut total = f64::from(effective_base(player));
    for m in modifiers.iter().filter(|m| !m.is_percentage) {
        total += m.value;
    }
    for m in modifiers.iter().filter(|m| m.is_percentage) {
        total *= 1.0 + m.value / 100.0;
    }

    let motivation = if total.is_finite() {
        total.round().clamp(0.0, f64::from(u32::MAX)) as u32
    } else {
        0
    };

    log::debug!(
        "renewed motivation for {}: {} -> {} ({} modifiers)",
        player.id,
        player.motivation,
        motivation,
        modifiers.len()
    );

    Player {
        motivation,
        motivation_modifiers: modifiers,
        ..player.clone()
    }
}

/// Spend motivation. `None` when the player cannot afford `amount`.
#[must_use]
pub fn consume(player: &Player, amount: u32) -> Option<Player> {
    let motivation = player.motivation.checked_sub(amount)?;
    Some(Player {
        motivation,
        ..player.clone()
    })
}

/// Append a modifier. `duration` of `None` is permanent.
///
/// Returns the new player and the ID assigned to the modifier.
#[must_use]
pub fn add_modifier(
    player: &Player,
    value: f64,
    is_percentage: bool,
    source: impl Into<String>,
    duration: Option<u32>,
) -> (Player, ModifierId) {
    let mut next = player.clone();
    let id = next.alloc_modifier_id();
    next.motivation_modifiers.push(ResourceModifier {
        id,
        value,
        is_percentage,
        source: source.into(),
        duration,
    });
    (next, id)
}

/// Drop a modifier by ID. Unknown IDs leave the list unchanged.
#[must_use]
pub fn remove_modifier(player: &Player, id: ModifierId) -> Player {
    let mut next = player.clone();
    next.motivation_modifiers.retain(|m| m.id != id);
    next
}

/// Reset a player's pool for a new game: base and current motivation set
/// to `base`, modifiers cleared.
#[must_use]
pub fn initialize_motivation(player: &Player, base: u32) -> Player {
    Player {
        motivation: base,
        base_motivation: Some(base),
        motivation_modifiers: Vec::new(),
        ..player.clone()
    }
}
