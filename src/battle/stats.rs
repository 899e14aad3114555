use crate::battle::state::TurnRng;
use crate::battle::typechart::type_accuracy_modifier;
use crate::combatant::Combatant;
use schema::{SkillDef, StatType};

/// Stage multiplier shared by every staged stat, accuracy and evasion
/// included: +s gives (2+s)/2, -s gives 2/(2+s).
pub fn stat_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-6, 6);
    if stage >= 0 {
        (2 + stage as i32) as f64 / 2.0
    } else {
        2.0 / (2 - stage as i32) as f64
    }
}

/// A base stat after its stage multiplier, rounded to the nearest point.
pub fn effective_stat(base: u16, stage: i8) -> u16 {
    (base as f64 * stat_stage_multiplier(stage)).round() as u16
}

pub fn effective_attack(combatant: &Combatant) -> u16 {
    effective_stat(combatant.attack, combatant.get_stat_stage(StatType::Attack))
}

pub fn effective_defense(combatant: &Combatant) -> u16 {
    effective_stat(
        combatant.defense,
        combatant.get_stat_stage(StatType::Defense),
    )
}

pub fn effective_speed(combatant: &Combatant) -> u16 {
    effective_stat(combatant.speed, combatant.get_stat_stage(StatType::Speed))
}

/// The roll-under threshold for a skill to land, in [1, 100]. Folds together
/// the skill's nominal accuracy, the attacker-vs-defender accuracy/evasion
/// stage gap, and the soft-immunity matchup penalty.
pub fn hit_threshold(attacker: &Combatant, defender: &Combatant, skill: &SkillDef) -> u8 {
    let net_stage = (attacker.get_stat_stage(StatType::Accuracy)
        - defender.get_stat_stage(StatType::Evasion))
    .clamp(-6, 6);

    let matchup = match skill.element {
        Some(element) => type_accuracy_modifier(element, &defender.types),
        None => 1.0,
    };

    let threshold = skill.accuracy as f64 * stat_stage_multiplier(net_stage) * matchup;
    (threshold.round() as i64).clamp(1, 100) as u8
}

/// Roll the accuracy check. Skills flagged never_misses consume no roll.
pub fn skill_hits(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &SkillDef,
    rng: &mut TurnRng,
) -> bool {
    if skill.never_misses {
        return true;
    }
    let threshold = hit_threshold(attacker, defender, skill);
    rng.next_outcome(&format!("Accuracy check for {}", skill.name)) <= threshold
}
