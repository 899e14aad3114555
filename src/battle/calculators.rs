use crate::battle::commands::{BattleCommand, Side};
use crate::battle::conditions::StatusKind;
use crate::battle::state::{BattleEvent, TurnRng};
use crate::battle::stats::{effective_attack, effective_defense, skill_hits};
use crate::battle::typechart::type_multiplier;
use crate::combatant::Combatant;
use schema::{EffectTarget, SkillDef, SkillEffect};

/// All combatants fight at a flat level; the formula keeps the slot so the
/// scaling constant reads like the classic one.
pub const LEVEL_MULTIPLIER: f64 = 1.0;

/// Base critical-hit chance in percent. On a 1..=100 roll this quantizes to
/// rolls 1 through 6.
pub const BASE_CRIT_PERCENT: f64 = 6.25;

pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const BONUS_VS_TYPE_MULTIPLIER: f64 = 1.5;

/// Map a 1..=100 roll onto the damage variance band [0.85, 1.0].
pub fn damage_variance(roll: u8) -> f64 {
    0.85 + (roll.clamp(1, 100) as f64 - 1.0) / 99.0 * 0.15
}

fn crit_lands(skill: &SkillDef, roll: u8) -> bool {
    match skill.crit_override() {
        Some(chance) => roll <= chance,
        None => (roll as f64) <= BASE_CRIT_PERCENT,
    }
}

/// Effective power of a skill for this use, folding in desperation scaling.
fn effective_power(attacker: &Combatant, skill: &SkillDef) -> Option<u16> {
    let base_power = skill.power?;
    let bonus = match skill.desperation_bonus() {
        Some(max_bonus) => {
            let missing = 1.0 - attacker.hp_fraction();
            (max_bonus as f64 * missing).floor() as u16
        }
        None => 0,
    };
    Some(base_power + bonus)
}

/// One strike's damage. Pure arithmetic: variance and the crit flag come in
/// pre-rolled. Returns the damage and the type multiplier that shaped it.
/// Flooring happens once at the end; a connecting strike deals at least 1
/// unless the defender is hard-immune.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &SkillDef,
    crit: bool,
    variance: f64,
) -> (u16, f64) {
    let power = match effective_power(attacker, skill) {
        Some(power) => power,
        None => return (0, 1.0),
    };

    let type_mult = match skill.element {
        Some(element) => type_multiplier(element, &defender.types),
        None => 1.0,
    };
    if type_mult == 0.0 {
        return (0, 0.0);
    }

    let attack = effective_attack(attacker) as f64;
    let defense = effective_defense(defender).max(1) as f64;
    let base = ((2.0 * LEVEL_MULTIPLIER + 10.0) / 250.0) * (attack / defense) * power as f64 + 2.0;

    let mut multiplier = type_mult;
    if let Some(flagged) = skill.bonus_vs_type() {
        if defender.types.contains(&flagged) {
            multiplier *= BONUS_VS_TYPE_MULTIPLIER;
        }
    }
    if crit {
        multiplier *= CRIT_MULTIPLIER;
    }

    let damage = (base * multiplier * variance).floor() as u16;
    (damage.max(1), type_mult)
}

/// Resolve one use of a skill into a command list. Pure: projects defender HP
/// instead of mutating, so multi-hit strikes stop at the projected knockout
/// and HealOnKnockout can see it.
///
/// Oracle draw order: accuracy (skipped for never-miss skills, and nothing
/// further is drawn on a miss) -> multi-hit count -> per strike a crit roll
/// then a variance roll -> per secondary effect a chance roll, skipped when
/// the chance is 100 or more.
pub fn calculate_skill_outcome(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &SkillDef,
    attacker_side: Side,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::SkillUsed {
        actor: attacker.name.clone(),
        skill: skill.name.clone(),
    })];

    if !skill_hits(attacker, defender, skill, rng) {
        commands.push(BattleCommand::EmitEvent(BattleEvent::SkillMissed {
            actor: attacker.name.clone(),
            target: defender.name.clone(),
            skill: skill.name.clone(),
        }));
        return commands;
    }

    let mut total_damage: u16 = 0;
    let mut projected_hp = defender.current_hp;

    if skill.is_damaging() {
        let hit_count = match skill.multi_hit_range() {
            Some((min_hits, max_hits)) => {
                let span = max_hits.saturating_sub(min_hits) + 1;
                let roll = rng.next_outcome(&format!("Hit count for {}", skill.name));
                min_hits + (roll - 1) % span
            }
            None => 1,
        };

        let mut effectiveness_reported = false;
        for _ in 0..hit_count {
            let crit_roll = rng.next_outcome(&format!("Critical check for {}", skill.name));
            let crit = crit_lands(skill, crit_roll);
            let variance_roll = rng.next_outcome(&format!("Damage variance for {}", skill.name));
            let (damage, type_mult) =
                calculate_damage(attacker, defender, skill, crit, damage_variance(variance_roll));

            if !effectiveness_reported && type_mult != 1.0 {
                commands.push(BattleCommand::EmitEvent(BattleEvent::TypeEffectiveness {
                    multiplier: type_mult,
                }));
                effectiveness_reported = true;
            }
            if type_mult == 0.0 {
                // Hard immunity blanks the strike and everything after it.
                return commands;
            }
            if crit {
                commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit {
                    actor: attacker.name.clone(),
                }));
            }
            commands.push(BattleCommand::DealDamage {
                target: attacker_side.other(),
                amount: damage,
            });
            total_damage += damage;
            projected_hp = projected_hp.saturating_sub(damage);
            if projected_hp == 0 {
                break;
            }
        }
    }

    let knocked_out = skill.is_damaging() && projected_hp == 0;
    for effect in &skill.effects {
        resolve_effect(
            effect,
            attacker,
            attacker_side,
            total_damage,
            knocked_out,
            skill,
            rng,
            &mut commands,
        );
    }

    commands
}

#[allow(clippy::too_many_arguments)]
fn resolve_effect(
    effect: &SkillEffect,
    attacker: &Combatant,
    attacker_side: Side,
    total_damage: u16,
    knocked_out: bool,
    skill: &SkillDef,
    rng: &mut TurnRng,
    commands: &mut Vec<BattleCommand>,
) {
    match effect {
        SkillEffect::ApplyStatus { status, chance } => {
            if effect_triggers(*chance, &skill.name, rng) {
                commands.push(BattleCommand::ApplyStatus {
                    target: attacker_side.other(),
                    status: *status,
                });
            }
        }
        SkillEffect::StatChange {
            target,
            stat,
            stages,
            chance,
        } => {
            if effect_triggers(*chance, &skill.name, rng) {
                let side = match target {
                    EffectTarget::User => attacker_side,
                    EffectTarget::Target => attacker_side.other(),
                };
                commands.push(BattleCommand::ChangeStatStage {
                    target: side,
                    stat: *stat,
                    delta: *stages,
                });
            }
        }
        SkillEffect::HealOnKnockout { percent } => {
            if knocked_out {
                commands.push(BattleCommand::HealCombatant {
                    target: attacker_side,
                    amount: percent_of(attacker.max_hp, *percent),
                });
            }
        }
        SkillEffect::Recoil { percent } => {
            if total_damage > 0 {
                commands.push(BattleCommand::DealDamage {
                    target: attacker_side,
                    amount: percent_of(total_damage, *percent).max(1),
                });
            }
        }
        SkillEffect::Heal { percent } => {
            commands.push(BattleCommand::HealCombatant {
                target: attacker_side,
                amount: percent_of(attacker.max_hp, *percent),
            });
        }
        SkillEffect::Purify { turns } => {
            for status in StatusKind::all().into_iter().filter(|kind| kind.is_purifiable()) {
                commands.push(BattleCommand::RemoveStatus {
                    target: attacker_side,
                    status,
                });
            }
            commands.push(BattleCommand::SilenceHazard { turns: *turns });
        }
        // Folded into the damage math above.
        SkillEffect::MultiHit { .. }
        | SkillEffect::BonusVsType(_)
        | SkillEffect::DesperationPower { .. }
        | SkillEffect::HighCrit { .. } => {}
    }
}

fn effect_triggers(chance: u8, skill_name: &str, rng: &mut TurnRng) -> bool {
    if chance >= 100 {
        return true;
    }
    rng.next_outcome(&format!("Effect chance for {}", skill_name)) <= chance
}

fn percent_of(value: u16, percent: u8) -> u16 {
    ((value as u32) * (percent as u32) / 100) as u16
}
