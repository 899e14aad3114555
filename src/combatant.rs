use crate::battle::conditions::{ActiveStatus, StatusKind};
use schema::{NutritionalType, PassiveAbility, PhaseDef, SpeciesDef, StatType, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mutable runtime record of one creature's live battle state. Created from a
/// static species or boss-phase definition at battle start (or on a phase
/// transition, which fully replaces the opponent's record) and mutated only
/// through the turn resolver's command executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub types: Vec<NutritionalType>,
    pub current_hp: u16,
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    /// Skill ids, resolved against the injected content tables.
    pub skills: Vec<String>,
    /// Active status conditions, keyed by kind so each is present at most once.
    pub statuses: HashMap<StatusKind, ActiveStatus>,
    /// Stat stage modifications, value is the stage (-6 to +6).
    pub stat_stages: HashMap<StatType, i8>,
    pub is_player: bool,
    pub passive: Option<PassiveAbility>,
}

impl Combatant {
    /// Build a fresh player-side combatant from a species definition.
    pub fn from_species(species: &SpeciesDef) -> Self {
        Combatant {
            name: species.name.clone(),
            types: species.types.clone(),
            current_hp: species.base_stats.max_hp,
            max_hp: species.base_stats.max_hp,
            attack: species.base_stats.attack,
            defense: species.base_stats.defense,
            speed: species.base_stats.speed,
            skills: species.skills.clone(),
            statuses: HashMap::new(),
            stat_stages: HashMap::new(),
            is_player: true,
            passive: species.passive.clone(),
        }
    }

    /// Build the opponent combatant for a boss phase. HP starts at the phase's
    /// max; statuses and stages start empty (a transition clears both).
    pub fn from_phase(phase: &PhaseDef) -> Self {
        Combatant {
            name: phase.name.clone(),
            types: phase.types.clone(),
            current_hp: phase.base_stats.max_hp,
            max_hp: phase.base_stats.max_hp,
            attack: phase.base_stats.attack,
            defense: phase.base_stats.defense,
            speed: phase.base_stats.speed,
            skills: phase.skills.clone(),
            statuses: HashMap::new(),
            stat_stages: HashMap::new(),
            is_player: false,
            passive: phase.passive.clone(),
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    /// Apply damage, clamping HP at zero. Returns true if this faints the
    /// combatant.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.current_hp == 0
    }

    /// Heal up to max HP, returning the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    // === Status Management ===

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.contains_key(&kind)
    }

    /// Whether this combatant's passive blocks the given status.
    pub fn is_immune_to_status(&self, status: StatusType) -> bool {
        matches!(
            &self.passive,
            Some(PassiveAbility::StatusImmunity { status: blocked }) if *blocked == status
        )
    }

    /// Insert a status if not already present. Re-applying an existing status
    /// is a no-op; returns whether the status was newly added.
    pub fn add_status(&mut self, status: ActiveStatus) -> bool {
        let kind = status.kind();
        if self.statuses.contains_key(&kind) {
            return false;
        }
        self.statuses.insert(kind, status);
        true
    }

    pub fn remove_status(&mut self, kind: StatusKind) -> Option<ActiveStatus> {
        self.statuses.remove(&kind)
    }

    pub fn status_mut(&mut self, kind: StatusKind) -> Option<&mut ActiveStatus> {
        self.statuses.get_mut(&kind)
    }

    pub fn clear_statuses(&mut self) {
        self.statuses.clear();
    }

    // === Stat Stage Management ===

    /// Get the current stage for a stat type (0 if not set)
    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Set the stage for a stat type (clamped to -6 to +6)
    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped_stage = stage.clamp(-6, 6);
        if clamped_stage == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped_stage);
        }
    }

    /// Modify the stage for a stat type by a delta (clamped to -6 to +6)
    pub fn modify_stat_stage(&mut self, stat: StatType, delta: i8) {
        let current = self.get_stat_stage(stat);
        self.set_stat_stage(stat, current + delta);
    }

    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }
}
