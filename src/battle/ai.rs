use crate::battle::calculators::calculate_damage;
use crate::battle::conditions::StatusKind;
use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use crate::content::ContentTables;
use ordered_float::OrderedFloat;
use schema::SkillDef;

/// Skill selection strategy for the non-player side. The engine queries this
/// exactly once per opposing action; the choice is an index into the actor's
/// skill list.
pub trait Behavior {
    fn select_skill(
        &self,
        actor: &Combatant,
        foe: &Combatant,
        content: &ContentTables,
        rng: &mut TurnRng,
    ) -> usize;
}

/// The boss decision ladder. Rungs are tried top to bottom and the first that
/// commits wins:
///   1. Finisher: foe at 40% HP or less and some ultimate's damage estimate
///      covers 80% of its remaining HP.
///   2. Afflict: a status the foe does not already carry, preferring the
///      highest apply chance. Sure-thing payloads (70%+) are used outright,
///      shakier ones on a 70-or-under roll.
///   3. Desperation: own HP at 30% or less and an ultimate is known.
///   4. Weighted pool of damaging skills, with the ultimate sometimes mixed
///      in twice (more likely the lower the foe's HP).
///   5. Uniform pick over everything known.
#[derive(Debug, Clone, Copy, Default)]
pub struct BossBrain;

const FINISHER_HP_FRACTION: f64 = 0.4;
const FINISHER_COVERAGE: f64 = 0.8;
const AFFLICT_SURE_CHANCE: u8 = 70;
const DESPERATION_HP_FRACTION: f64 = 0.3;

impl Behavior for BossBrain {
    fn select_skill(
        &self,
        actor: &Combatant,
        foe: &Combatant,
        content: &ContentTables,
        rng: &mut TurnRng,
    ) -> usize {
        if actor.skills.len() <= 1 {
            return 0;
        }

        let known: Vec<(usize, &SkillDef)> = actor
            .skills
            .iter()
            .enumerate()
            .filter_map(|(index, id)| content.skill(id).ok().map(|skill| (index, skill)))
            .collect();
        if known.len() <= 1 {
            return known.first().map(|(index, _)| *index).unwrap_or(0);
        }

        if let Some(index) = self.pick_finisher(actor, foe, &known) {
            return index;
        }
        if let Some(index) = self.pick_affliction(foe, &known, rng) {
            return index;
        }
        if let Some(index) = self.pick_desperation(actor, &known) {
            return index;
        }
        if let Some(index) = self.pick_weighted_damage(foe, &known, rng) {
            return index;
        }

        // Nothing damaging, nothing to inflict: pick uniformly.
        let roll = rng.next_outcome("AI uniform skill pick");
        known[(roll as usize - 1) % known.len()].0
    }
}

impl BossBrain {
    fn estimate(&self, actor: &Combatant, foe: &Combatant, skill: &SkillDef) -> u16 {
        // Expected-case estimate: full variance, no crit.
        calculate_damage(actor, foe, skill, false, 1.0).0
    }

    fn pick_finisher(
        &self,
        actor: &Combatant,
        foe: &Combatant,
        known: &[(usize, &SkillDef)],
    ) -> Option<usize> {
        if foe.hp_fraction() > FINISHER_HP_FRACTION {
            return None;
        }
        let (index, best_estimate) = known
            .iter()
            .filter(|(_, skill)| skill.is_ultimate() && skill.is_damaging())
            .map(|&(index, skill)| (index, self.estimate(actor, foe, skill)))
            .max_by_key(|&(_, estimate)| OrderedFloat(estimate as f64))?;
        if best_estimate as f64 >= FINISHER_COVERAGE * foe.current_hp as f64 {
            Some(index)
        } else {
            None
        }
    }

    fn pick_affliction(
        &self,
        foe: &Combatant,
        known: &[(usize, &SkillDef)],
        rng: &mut TurnRng,
    ) -> Option<usize> {
        let (index, chance) = known
            .iter()
            .filter_map(|&(index, skill)| {
                let (status, chance) = skill.status_payload()?;
                if foe.has_status(StatusKind::from_status_type(status))
                    || foe.is_immune_to_status(status)
                {
                    return None;
                }
                Some((index, chance))
            })
            .max_by_key(|&(_, chance)| chance)?;

        if chance >= AFFLICT_SURE_CHANCE {
            return Some(index);
        }
        if rng.next_outcome("AI affliction commitment") <= AFFLICT_SURE_CHANCE {
            return Some(index);
        }
        None
    }

    fn pick_desperation(&self, actor: &Combatant, known: &[(usize, &SkillDef)]) -> Option<usize> {
        if actor.hp_fraction() > DESPERATION_HP_FRACTION {
            return None;
        }
        known
            .iter()
            .find(|(_, skill)| skill.is_ultimate())
            .map(|(index, _)| *index)
    }

    fn pick_weighted_damage(
        &self,
        foe: &Combatant,
        known: &[(usize, &SkillDef)],
        rng: &mut TurnRng,
    ) -> Option<usize> {
        let mut pool: Vec<usize> = known
            .iter()
            .filter(|(_, skill)| skill.is_damaging() && !skill.is_ultimate())
            .map(|(index, _)| *index)
            .collect();

        if let Some((index, _)) = known
            .iter()
            .find(|(_, skill)| skill.is_damaging() && skill.is_ultimate())
        {
            // The ultimate muscles in as the foe weakens, and counts double
            // when it does.
            let weight = ((1.0 - foe.hp_fraction()) * 50.0).floor() as u8;
            if weight > 0 && rng.next_outcome("AI ultimate inclusion") <= weight {
                pool.push(*index);
                pool.push(*index);
            }
        }

        match pool.len() {
            0 => None,
            1 => Some(pool[0]),
            len => {
                let roll = rng.next_outcome("AI damaging skill pick");
                Some(pool[(roll as usize - 1) % len])
            }
        }
    }
}
