use crate::nutrition::{NutritionalType, StatType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

/// A passive ability attached to a species or a boss phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PassiveAbility {
    /// Recurring end-of-turn self stat shift while the holder is active
    /// (e.g. a phase that grows angrier every turn).
    EndOfTurnStatGain { stat: StatType, stages: i8 },
    /// The holder cannot receive the named status.
    StatusImmunity { status: StatusType },
}

/// An environmental hazard scoped to a boss phase: a flat percent-of-max-HP
/// chip on the player's active combatant at the end of every turn, until
/// silenced by a purify effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub name: String,
    pub chip_percent: u8,
}

/// Static definition of a player-side species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: String,
    pub name: String,
    pub types: Vec<NutritionalType>,
    pub base_stats: BaseStats,
    /// Skill ids, resolved against the content tables.
    pub skills: Vec<String>,
    #[serde(default)]
    pub passive: Option<PassiveAbility>,
}

/// One combat configuration a boss cycles through. A phase transition fully
/// replaces the opponent's types, stats, skills, passive, and hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDef {
    pub name: String,
    pub types: Vec<NutritionalType>,
    pub base_stats: BaseStats,
    pub skills: Vec<String>,
    #[serde(default)]
    pub passive: Option<PassiveAbility>,
    #[serde(default)]
    pub hazard: Option<Hazard>,
    /// Presentation keys, passed through untouched for a renderer.
    #[serde(default)]
    pub sprite_key: String,
    #[serde(default)]
    pub background_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDef {
    pub id: String,
    pub name: String,
    pub phases: Vec<PhaseDef>,
}
