use crate::combatant::Combatant;
use crate::errors::{ContentError, ContentResult};
use crate::content::ContentTables;
use schema::{BossDef, Hazard, PhaseDef};

/// Tracks where a boss sits in its phase sequence, plus the per-phase hazard
/// silence counter. Advancing a phase resets the counter; the boss combatant
/// itself is rebuilt by the engine from the new phase definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseProgress {
    boss_id: String,
    phase_index: usize,
    pub hazard_silence_turns: u8,
}

impl PhaseProgress {
    pub fn new(boss_id: &str) -> Self {
        PhaseProgress {
            boss_id: boss_id.to_string(),
            phase_index: 0,
            hazard_silence_turns: 0,
        }
    }

    pub fn boss_id(&self) -> &str {
        &self.boss_id
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn boss<'a>(&self, content: &'a ContentTables) -> ContentResult<&'a BossDef> {
        content.boss(&self.boss_id)
    }

    pub fn current_phase<'a>(&self, content: &'a ContentTables) -> ContentResult<&'a PhaseDef> {
        let boss = self.boss(content)?;
        boss.phases
            .get(self.phase_index)
            .ok_or_else(|| ContentError::EmptyBoss(self.boss_id.clone()))
    }

    pub fn hazard<'a>(&self, content: &'a ContentTables) -> Option<&'a Hazard> {
        self.current_phase(content)
            .ok()
            .and_then(|phase| phase.hazard.as_ref())
    }

    pub fn has_next_phase(&self, content: &ContentTables) -> bool {
        self.boss(content)
            .map(|boss| self.phase_index + 1 < boss.phases.len())
            .unwrap_or(false)
    }

    /// Step to the next phase and build its fresh combatant: full HP, clean
    /// statuses and stages, new types, skills, passive, and hazard. The
    /// silence counter does not carry across phases.
    pub fn advance(&mut self, content: &ContentTables) -> ContentResult<Combatant> {
        self.phase_index += 1;
        self.hazard_silence_turns = 0;
        let phase = self.current_phase(content)?;
        Ok(Combatant::from_phase(phase))
    }
}
