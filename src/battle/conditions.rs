use schema::{StatType, StatusType};
use serde::{Deserialize, Serialize};

/// A status condition as it lives on a combatant, carrying its runtime
/// bookkeeping. The payload-free [`StatusKind`] mirror is the hash key, so
/// `Sleep { turns_remaining: 2 }` and `Sleep { turns_remaining: 1 }` occupy
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveStatus {
    Dehydrated,
    Greased,
    Sour,
    Sleep { turns_remaining: u8 },
    Trapped { just_applied: bool },
    Burned { attack_drop_applied: bool },
}

/// Payload-free mirror of [`ActiveStatus`], used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Dehydrated,
    Greased,
    Sour,
    Sleep,
    Trapped,
    Burned,
}

/// How many turns a freshly applied sleep lasts.
pub const SLEEP_TURNS: u8 = 2;

impl ActiveStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            ActiveStatus::Dehydrated => StatusKind::Dehydrated,
            ActiveStatus::Greased => StatusKind::Greased,
            ActiveStatus::Sour => StatusKind::Sour,
            ActiveStatus::Sleep { .. } => StatusKind::Sleep,
            ActiveStatus::Trapped { .. } => StatusKind::Trapped,
            ActiveStatus::Burned { .. } => StatusKind::Burned,
        }
    }

    pub fn status_type(&self) -> StatusType {
        self.kind().status_type()
    }

    /// Build a freshly applied instance with default bookkeeping.
    pub fn from_status_type(status: StatusType) -> Self {
        match status {
            StatusType::Dehydrated => ActiveStatus::Dehydrated,
            StatusType::Greased => ActiveStatus::Greased,
            StatusType::Sour => ActiveStatus::Sour,
            StatusType::Sleep => ActiveStatus::Sleep {
                turns_remaining: SLEEP_TURNS,
            },
            StatusType::Trapped => ActiveStatus::Trapped { just_applied: true },
            StatusType::Burned => ActiveStatus::Burned {
                attack_drop_applied: false,
            },
        }
    }

    /// Does this status prevent the holder from acting this turn?
    pub fn prevents_action(&self) -> bool {
        matches!(self, ActiveStatus::Sleep { .. })
    }
}

impl StatusKind {
    pub fn all() -> [StatusKind; 6] {
        [
            StatusKind::Dehydrated,
            StatusKind::Greased,
            StatusKind::Sour,
            StatusKind::Sleep,
            StatusKind::Trapped,
            StatusKind::Burned,
        ]
    }

    pub fn status_type(self) -> StatusType {
        match self {
            StatusKind::Dehydrated => StatusType::Dehydrated,
            StatusKind::Greased => StatusType::Greased,
            StatusKind::Sour => StatusType::Sour,
            StatusKind::Sleep => StatusType::Sleep,
            StatusKind::Trapped => StatusType::Trapped,
            StatusKind::Burned => StatusType::Burned,
        }
    }

    pub fn from_status_type(status: StatusType) -> Self {
        ActiveStatus::from_status_type(status).kind()
    }

    /// Percent of max HP this status drains per end-of-turn tick, or None for
    /// statuses with no damage-over-time component.
    pub fn dot_percent(self) -> Option<u8> {
        match self {
            StatusKind::Dehydrated => Some(8),
            StatusKind::Burned => Some(6),
            _ => None,
        }
    }

    /// The stat a just-applied status immediately shifts, with the delta.
    pub fn on_apply_stat_drop(self) -> Option<(StatType, i8)> {
        match self {
            StatusKind::Greased => Some((StatType::Accuracy, -1)),
            StatusKind::Sour => Some((StatType::Speed, -1)),
            _ => None,
        }
    }

    /// Statuses stripped from the user by a purify effect.
    pub fn is_purifiable(self) -> bool {
        matches!(self, StatusKind::Greased | StatusKind::Sour)
    }
}

/// End-of-turn chip from a damage-over-time status. The defender's effective
/// defense softens the tick, so tanky combatants bleed slower.
pub fn status_tick_damage(max_hp: u16, percent: u8, effective_defense: u16) -> u16 {
    let raw = (max_hp as u32) * (percent as u32) / (50 + effective_defense as u32);
    (raw as u16).max(1)
}
