use crate::nutrition::{NutritionalType, StatType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Physical,
    Special,
    Ranged,
    Buff,
    Debuff,
    Heal,
    Utility,
    Ultimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    User,
    Target,
}

/// One effect a skill carries, modeled as a tagged union so the turn resolver
/// can exhaustively pattern-match (the original stored these as untyped
/// payloads on the move record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Apply a status condition to the defender, chance %. Evaluated only
    /// after a successful, non-missed strike.
    ApplyStatus { status: StatusType, chance: u8 },
    /// Shift a stat stage on the user or the target, chance %.
    StatChange {
        target: EffectTarget,
        stat: StatType,
        stages: i8,
        chance: u8,
    },
    /// Strike between min and max times; accuracy is rolled once.
    MultiHit { min_hits: u8, max_hits: u8 },
    /// Heal the attacker by % of its max HP when the strike faints the target.
    HealOnKnockout { percent: u8 },
    /// x1.5 damage when the defender carries the flagged type.
    BonusVsType(NutritionalType),
    /// The attacker takes % of the damage it dealt.
    Recoil { percent: u8 },
    /// Restore % of the user's max HP.
    Heal { percent: u8 },
    /// Bonus power scaling with the user's missing HP fraction.
    DesperationPower { max_bonus: u16 },
    /// Cleanse Sour/Greased from the user and silence the environmental
    /// hazard for the given number of turns.
    Purify { turns: u8 },
    /// Overrides the base critical-hit chance, whole percent.
    HighCrit { chance: u8 },
}

/// Immutable skill definition, shared by every combatant that knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub name: String,
    pub category: SkillCategory,
    pub element: Option<NutritionalType>,
    /// None marks a non-damaging skill.
    pub power: Option<u16>,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(default)]
    pub never_misses: bool,
    #[serde(default)]
    pub effects: Vec<SkillEffect>,
}

fn default_accuracy() -> u8 {
    100
}

impl SkillDef {
    pub fn is_damaging(&self) -> bool {
        self.power.is_some()
    }

    pub fn is_ultimate(&self) -> bool {
        self.category == SkillCategory::Ultimate
    }

    /// Find a specific effect kind, if the skill carries one.
    pub fn find_effect<'a, T>(&'a self, pick: impl Fn(&'a SkillEffect) -> Option<T>) -> Option<T> {
        self.effects.iter().find_map(pick)
    }

    pub fn multi_hit_range(&self) -> Option<(u8, u8)> {
        self.find_effect(|effect| match effect {
            SkillEffect::MultiHit { min_hits, max_hits } => Some((*min_hits, *max_hits)),
            _ => None,
        })
    }

    pub fn crit_override(&self) -> Option<u8> {
        self.find_effect(|effect| match effect {
            SkillEffect::HighCrit { chance } => Some(*chance),
            _ => None,
        })
    }

    pub fn bonus_vs_type(&self) -> Option<NutritionalType> {
        self.find_effect(|effect| match effect {
            SkillEffect::BonusVsType(flagged) => Some(*flagged),
            _ => None,
        })
    }

    pub fn desperation_bonus(&self) -> Option<u16> {
        self.find_effect(|effect| match effect {
            SkillEffect::DesperationPower { max_bonus } => Some(*max_bonus),
            _ => None,
        })
    }

    /// The status this skill can inflict, with its apply chance.
    pub fn status_payload(&self) -> Option<(StatusType, u8)> {
        self.find_effect(|effect| match effect {
            SkillEffect::ApplyStatus { status, chance } => Some((*status, *chance)),
            _ => None,
        })
    }
}
