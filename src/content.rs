use crate::errors::{ContentError, ContentResult};
use schema::{
    BaseStats, BossDef, EffectTarget, Hazard, NutritionalType, PassiveAbility, PhaseDef,
    SkillCategory, SkillDef, SkillEffect, SpeciesDef, StatType, StatusType,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable content tables injected into a battle session. All id lookups go
/// through here; a session never stores skill or species definitions inline.
#[derive(Debug, Clone, Default)]
pub struct ContentTables {
    skills: HashMap<String, SkillDef>,
    species: HashMap<String, SpeciesDef>,
    bosses: HashMap<String, BossDef>,
}

impl ContentTables {
    /// Load content from a data directory laid out as:
    ///   data/skills.ron        - map of skill id to definition
    ///   data/species/*.ron     - one species definition per file
    ///   data/bosses/*.ron      - one boss definition per file
    pub fn load(data_path: &Path) -> ContentResult<Self> {
        let skills_path = data_path.join("skills.ron");
        let skills_str = fs::read_to_string(&skills_path).map_err(|e| {
            ContentError::MalformedData(format!("reading {}: {}", skills_path.display(), e))
        })?;
        let skills: HashMap<String, SkillDef> = ron::from_str(&skills_str).map_err(|e| {
            ContentError::MalformedData(format!("parsing {}: {}", skills_path.display(), e))
        })?;

        let mut species = HashMap::new();
        for entry in read_ron_dir(&data_path.join("species"))? {
            let def: SpeciesDef = parse_ron_file(&entry)?;
            species.insert(def.id.clone(), def);
        }

        let mut bosses = HashMap::new();
        for entry in read_ron_dir(&data_path.join("bosses"))? {
            let def: BossDef = parse_ron_file(&entry)?;
            bosses.insert(def.id.clone(), def);
        }

        let tables = ContentTables {
            skills,
            species,
            bosses,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Assemble tables from already-built definitions, for embedded content.
    pub fn from_parts(
        skills: HashMap<String, SkillDef>,
        species: Vec<SpeciesDef>,
        bosses: Vec<BossDef>,
    ) -> ContentResult<Self> {
        let tables = ContentTables {
            skills,
            species: species.into_iter().map(|def| (def.id.clone(), def)).collect(),
            bosses: bosses.into_iter().map(|def| (def.id.clone(), def)).collect(),
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Cross-check id references so lookups during battle cannot fail.
    fn validate(&self) -> ContentResult<()> {
        for def in self.species.values() {
            for skill_id in &def.skills {
                self.skill(skill_id)?;
            }
        }
        for def in self.bosses.values() {
            if def.phases.is_empty() {
                return Err(ContentError::EmptyBoss(def.id.clone()));
            }
            for phase in &def.phases {
                for skill_id in &phase.skills {
                    self.skill(skill_id)?;
                }
            }
        }
        Ok(())
    }

    pub fn skill(&self, id: &str) -> ContentResult<&SkillDef> {
        self.skills
            .get(id)
            .ok_or_else(|| ContentError::SkillNotFound(id.to_string()))
    }

    pub fn species(&self, id: &str) -> ContentResult<&SpeciesDef> {
        self.species
            .get(id)
            .ok_or_else(|| ContentError::SpeciesNotFound(id.to_string()))
    }

    pub fn boss(&self, id: &str) -> ContentResult<&BossDef> {
        self.bosses
            .get(id)
            .ok_or_else(|| ContentError::BossNotFound(id.to_string()))
    }

    pub fn species_ids(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn boss_ids(&self) -> impl Iterator<Item = &str> {
        self.bosses.keys().map(String::as_str)
    }

    /// In-code demo content mirroring the data/ directory, for tests and
    /// quick battles without touching the filesystem.
    pub fn demo_content() -> Self {
        let mut skills = HashMap::new();

        skills.insert(
            "fiber_lash".to_string(),
            SkillDef {
                name: "Fiber Lash".to_string(),
                category: SkillCategory::Physical,
                element: Some(NutritionalType::Fiber),
                power: Some(70),
                accuracy: 100,
                never_misses: false,
                effects: vec![],
            },
        );
        skills.insert(
            "crumb_flurry".to_string(),
            SkillDef {
                name: "Crumb Flurry".to_string(),
                category: SkillCategory::Physical,
                element: Some(NutritionalType::Carb),
                power: Some(20),
                accuracy: 90,
                never_misses: false,
                effects: vec![SkillEffect::MultiHit {
                    min_hits: 2,
                    max_hits: 5,
                }],
            },
        );
        skills.insert(
            "detox_rinse".to_string(),
            SkillDef {
                name: "Detox Rinse".to_string(),
                category: SkillCategory::Utility,
                element: Some(NutritionalType::Fiber),
                power: None,
                accuracy: 100,
                never_misses: true,
                effects: vec![SkillEffect::Purify { turns: 3 }],
            },
        );
        skills.insert(
            "food_coma".to_string(),
            SkillDef {
                name: "Food Coma".to_string(),
                category: SkillCategory::Debuff,
                element: Some(NutritionalType::Carb),
                power: None,
                accuracy: 100,
                never_misses: false,
                effects: vec![SkillEffect::ApplyStatus {
                    status: StatusType::Sleep,
                    chance: 75,
                }],
            },
        );
        skills.insert(
            "butter_blast".to_string(),
            SkillDef {
                name: "Butter Blast".to_string(),
                category: SkillCategory::Special,
                element: Some(NutritionalType::Fat),
                power: Some(80),
                accuracy: 95,
                never_misses: false,
                effects: vec![SkillEffect::ApplyStatus {
                    status: StatusType::Greased,
                    chance: 20,
                }],
            },
        );
        skills.insert(
            "glucose_rush".to_string(),
            SkillDef {
                name: "Glucose Rush".to_string(),
                category: SkillCategory::Buff,
                element: Some(NutritionalType::Carb),
                power: None,
                accuracy: 100,
                never_misses: true,
                effects: vec![SkillEffect::StatChange {
                    target: EffectTarget::User,
                    stat: StatType::Speed,
                    stages: 2,
                    chance: 100,
                }],
            },
        );
        skills.insert(
            "salt_spray".to_string(),
            SkillDef {
                name: "Salt Spray".to_string(),
                category: SkillCategory::Special,
                element: Some(NutritionalType::Processed),
                power: Some(50),
                accuracy: 100,
                never_misses: true,
                effects: vec![SkillEffect::ApplyStatus {
                    status: StatusType::Dehydrated,
                    chance: 100,
                }],
            },
        );
        skills.insert(
            "deep_fry".to_string(),
            SkillDef {
                name: "Deep Fry".to_string(),
                category: SkillCategory::Special,
                element: Some(NutritionalType::Oil),
                power: Some(75),
                accuracy: 90,
                never_misses: false,
                effects: vec![SkillEffect::ApplyStatus {
                    status: StatusType::Burned,
                    chance: 30,
                }],
            },
        );
        skills.insert(
            "briny_bind".to_string(),
            SkillDef {
                name: "Briny Bind".to_string(),
                category: SkillCategory::Physical,
                element: Some(NutritionalType::Processed),
                power: Some(40),
                accuracy: 95,
                never_misses: false,
                effects: vec![SkillEffect::ApplyStatus {
                    status: StatusType::Trapped,
                    chance: 60,
                }],
            },
        );
        skills.insert(
            "flavor_overload".to_string(),
            SkillDef {
                name: "Flavor Overload".to_string(),
                category: SkillCategory::Ultimate,
                element: Some(NutritionalType::Processed),
                power: Some(110),
                accuracy: 90,
                never_misses: false,
                effects: vec![SkillEffect::DesperationPower { max_bonus: 40 }],
            },
        );

        let mut species = HashMap::new();
        species.insert(
            "lemon_shark".to_string(),
            SpeciesDef {
                id: "lemon_shark".to_string(),
                name: "Lemon Shark".to_string(),
                types: vec![NutritionalType::Fiber],
                base_stats: BaseStats {
                    max_hp: 120,
                    attack: 90,
                    defense: 70,
                    speed: 85,
                },
                skills: vec![
                    "fiber_lash".to_string(),
                    "crumb_flurry".to_string(),
                    "detox_rinse".to_string(),
                    "food_coma".to_string(),
                ],
                passive: None,
            },
        );
        species.insert(
            "butter_golem".to_string(),
            SpeciesDef {
                id: "butter_golem".to_string(),
                name: "Butter Golem".to_string(),
                types: vec![NutritionalType::Fat],
                base_stats: BaseStats {
                    max_hp: 150,
                    attack: 75,
                    defense: 95,
                    speed: 40,
                },
                skills: vec![
                    "butter_blast".to_string(),
                    "glucose_rush".to_string(),
                    "detox_rinse".to_string(),
                ],
                passive: Some(PassiveAbility::StatusImmunity {
                    status: StatusType::Greased,
                }),
            },
        );
        species.insert(
            "sugar_glider".to_string(),
            SpeciesDef {
                id: "sugar_glider".to_string(),
                name: "Sugar Glider".to_string(),
                types: vec![NutritionalType::Carb],
                base_stats: BaseStats {
                    max_hp: 95,
                    attack: 80,
                    defense: 60,
                    speed: 110,
                },
                skills: vec![
                    "crumb_flurry".to_string(),
                    "glucose_rush".to_string(),
                    "food_coma".to_string(),
                ],
                passive: None,
            },
        );

        let mut bosses = HashMap::new();
        bosses.insert(
            "sodium_serpent".to_string(),
            BossDef {
                id: "sodium_serpent".to_string(),
                name: "Sodium Serpent".to_string(),
                phases: vec![
                    PhaseDef {
                        name: "Sodium Serpent".to_string(),
                        types: vec![NutritionalType::Processed, NutritionalType::Fat],
                        base_stats: BaseStats {
                            max_hp: 150,
                            attack: 85,
                            defense: 80,
                            speed: 70,
                        },
                        skills: vec!["salt_spray".to_string(), "deep_fry".to_string()],
                        passive: None,
                        hazard: Some(Hazard {
                            name: "Sodium Cloud".to_string(),
                            chip_percent: 6,
                        }),
                        sprite_key: "sodium_serpent_p1".to_string(),
                        background_key: "salt_flats".to_string(),
                    },
                    PhaseDef {
                        name: "Molten Sodium Serpent".to_string(),
                        types: vec![NutritionalType::Processed, NutritionalType::Oil],
                        base_stats: BaseStats {
                            max_hp: 180,
                            attack: 95,
                            defense: 70,
                            speed: 80,
                        },
                        skills: vec![
                            "salt_spray".to_string(),
                            "briny_bind".to_string(),
                            "flavor_overload".to_string(),
                        ],
                        passive: Some(PassiveAbility::EndOfTurnStatGain {
                            stat: StatType::Attack,
                            stages: 1,
                        }),
                        hazard: Some(Hazard {
                            name: "Oil Slick".to_string(),
                            chip_percent: 8,
                        }),
                        sprite_key: "sodium_serpent_p2".to_string(),
                        background_key: "fryer_depths".to_string(),
                    },
                ],
            },
        );

        ContentTables {
            skills,
            species,
            bosses,
        }
    }
}

fn read_ron_dir(dir: &Path) -> ContentResult<Vec<std::path::PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ContentError::MalformedData(format!("reading directory {}: {}", dir.display(), e))
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ContentError::MalformedData(format!("reading directory {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ron") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn parse_ron_file<T: serde::de::DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        ContentError::MalformedData(format!("reading {}: {}", path.display(), e))
    })?;
    ron::from_str(&content).map_err(|e| {
        ContentError::MalformedData(format!("parsing {}: {}", path.display(), e))
    })
}
