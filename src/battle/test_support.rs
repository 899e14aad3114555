//! Shared fixtures for the battle scenario tests. Every fixture skill never
//! misses and every fixture boss phase knows exactly one skill, so the only
//! oracle draws a scenario consumes are the crit and variance rolls of its
//! damaging strikes.

use crate::battle::engine::BattleSession;
use crate::content::ContentTables;
use schema::{
    BaseStats, BossDef, Hazard, NutritionalType, PassiveAbility, PhaseDef, SkillCategory,
    SkillDef, SkillEffect, SpeciesDef, StatusType,
};
use std::collections::HashMap;

pub const PLAYER_ID: &str = "crunch_crab";
pub const BENCH_ID: &str = "wafer_wisp";
pub const BOSS_ID: &str = "training_dummy";

fn flat_stats(max_hp: u16, speed: u16) -> BaseStats {
    BaseStats {
        max_hp,
        attack: 50,
        defense: 50,
        speed,
    }
}

fn skill(name: &str, power: Option<u16>, effects: Vec<SkillEffect>) -> SkillDef {
    SkillDef {
        name: name.to_string(),
        category: SkillCategory::Physical,
        // Carb into Fiber is neutral both ways, so fixture damage has no
        // type multiplier to account for.
        element: Some(NutritionalType::Carb),
        power,
        accuracy: 100,
        never_misses: true,
        effects,
    }
}

/// With 50 attack into 50 defense, "tap" deals floor(3.92 * variance):
/// 3 at full variance. "overkill" deals 102 and flattens any fixture HP bar.
pub fn fixture_skills() -> HashMap<String, SkillDef> {
    let mut skills = HashMap::new();
    skills.insert("tap".to_string(), skill("Tap", Some(40), vec![]));
    skills.insert("overkill".to_string(), skill("Overkill", Some(2100), vec![]));
    skills.insert(
        "brine_mist".to_string(),
        skill(
            "Brine Mist",
            None,
            vec![SkillEffect::ApplyStatus {
                status: StatusType::Dehydrated,
                chance: 100,
            }],
        ),
    );
    skills.insert(
        "nap_dust".to_string(),
        skill(
            "Nap Dust",
            None,
            vec![SkillEffect::ApplyStatus {
                status: StatusType::Sleep,
                chance: 100,
            }],
        ),
    );
    skills.insert(
        "snare".to_string(),
        skill(
            "Snare",
            None,
            vec![SkillEffect::ApplyStatus {
                status: StatusType::Trapped,
                chance: 100,
            }],
        ),
    );
    skills.insert(
        "sear".to_string(),
        skill(
            "Sear",
            None,
            vec![SkillEffect::ApplyStatus {
                status: StatusType::Burned,
                chance: 100,
            }],
        ),
    );
    skills.insert(
        "slick".to_string(),
        skill(
            "Slick",
            None,
            vec![SkillEffect::ApplyStatus {
                status: StatusType::Greased,
                chance: 100,
            }],
        ),
    );
    skills.insert(
        "cleanse".to_string(),
        skill("Cleanse", None, vec![SkillEffect::Purify { turns: 2 }]),
    );
    skills
}

pub fn phase(name: &str, max_hp: u16, speed: u16, skill_id: &str) -> PhaseDef {
    PhaseDef {
        name: name.to_string(),
        types: vec![NutritionalType::Fiber],
        base_stats: flat_stats(max_hp, speed),
        skills: vec![skill_id.to_string()],
        passive: None,
        hazard: None,
        sprite_key: String::new(),
        background_key: String::new(),
    }
}

pub fn with_hazard(mut phase: PhaseDef, name: &str, chip_percent: u8) -> PhaseDef {
    phase.hazard = Some(Hazard {
        name: name.to_string(),
        chip_percent,
    });
    phase
}

pub fn with_passive(mut phase: PhaseDef, passive: PassiveAbility) -> PhaseDef {
    phase.passive = Some(passive);
    phase
}

fn species(id: &str, name: &str, skills: &[&str]) -> SpeciesDef {
    SpeciesDef {
        id: id.to_string(),
        name: name.to_string(),
        types: vec![NutritionalType::Fiber],
        base_stats: flat_stats(100, 50),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        passive: None,
    }
}

pub fn fixture_content(player_skills: &[&str], phases: Vec<PhaseDef>) -> ContentTables {
    ContentTables::from_parts(
        fixture_skills(),
        vec![
            species(PLAYER_ID, "Crunch Crab", player_skills),
            species(BENCH_ID, "Wafer Wisp", player_skills),
        ],
        vec![BossDef {
            id: BOSS_ID.to_string(),
            name: "Training Dummy".to_string(),
            phases,
        }],
    )
    .expect("fixture content should cross-check")
}

/// A session already past its intro, with one party member.
pub fn solo_session(player_skills: &[&str], phases: Vec<PhaseDef>) -> BattleSession {
    let content = fixture_content(player_skills, phases);
    let mut session =
        BattleSession::new(content, &[PLAYER_ID], BOSS_ID).expect("fixture session");
    session.begin();
    session
}

/// A session already past its intro, with two party members.
pub fn duo_session(player_skills: &[&str], phases: Vec<PhaseDef>) -> BattleSession {
    let content = fixture_content(player_skills, phases);
    let mut session =
        BattleSession::new(content, &[PLAYER_ID, BENCH_ID], BOSS_ID).expect("fixture session");
    session.begin();
    session
}
