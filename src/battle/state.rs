use schema::{StatType, StatusType};
use serde::{Deserialize, Serialize};

/// Battle session state, owned exclusively by the turn resolver. The
/// Executing/Applying/TurnEnd values are transient within a resolution call;
/// a caller observes Intro, PlayerTurn, or a terminal state between calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattleState {
    Intro,
    PlayerTurn,
    EnemyTurn,
    ExecutingMove,
    ApplyingEffects,
    TurnEnd,
    Victory,
    Defeat,
    Fled,
}

impl BattleState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattleState::Victory | BattleState::Defeat | BattleState::Fled
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Discrete combat events emitted during turn resolution. Each carries enough
/// data for a presentation layer to render without recomputing anything.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    BattleStarted {
        player: String,
        opponent: String,
    },
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Actions
    SkillUsed {
        actor: String,
        skill: String,
    },
    SkillMissed {
        actor: String,
        target: String,
        skill: String,
    },
    ActionSkipped {
        actor: String,
        status: StatusType,
    },
    Swapped {
        old_active: String,
        new_active: String,
        forced: bool,
    },

    // Damage and Healing
    CriticalHit {
        actor: String,
    },
    TypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        amount: u16,
        remaining_hp: u16,
    },
    Healed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    Fainted {
        target: String,
    },

    // Status Effects
    StatusApplied {
        target: String,
        status: StatusType,
    },
    StatusRemoved {
        target: String,
        status: StatusType,
    },
    StatusDamage {
        target: String,
        status: StatusType,
        damage: u16,
        remaining_hp: u16,
    },

    // Environmental Hazards
    HazardDamage {
        target: String,
        hazard: String,
        damage: u16,
        remaining_hp: u16,
    },
    HazardSilenced {
        hazard: String,
        turns: u8,
    },

    // Stat Changes
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
    },

    // Phases and Battle End
    PhaseTransition {
        boss: String,
        phase_index: usize,
        phase_name: String,
    },
    BattleEnded {
        outcome: EndOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { player, opponent } => {
                Some(format!("{} challenges {}!", player, opponent))
            }
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => {
                None // Silent - turn ending is usually obvious from context
            }

            BattleEvent::SkillUsed { actor, skill } => Some(format!("{} used {}!", actor, skill)),
            BattleEvent::SkillMissed { actor, .. } => Some(format!("{}'s attack missed!", actor)),
            BattleEvent::ActionSkipped { actor, status } => match status {
                StatusType::Sleep => Some(format!("{} is fast asleep.", actor)),
                _ => Some(format!("{} couldn't act because of its {}!", actor, status)),
            },
            BattleEvent::Swapped {
                old_active,
                new_active,
                forced,
            } => {
                if *forced {
                    Some(format!("{} was sent in to replace {}!", new_active, old_active))
                } else {
                    Some(format!("{} was recalled for {}!", old_active, new_active))
                }
            }

            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::TypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                0.0 => Some("It had no effect!".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt { target, amount, .. } => {
                Some(format!("{} took {} damage!", target, amount))
            }
            BattleEvent::Healed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::Fainted { target } => Some(format!("{} was knocked out!", target)),

            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} was afflicted by {}!", target, status))
            }
            BattleEvent::StatusRemoved { target, status } => match status {
                StatusType::Sleep => Some(format!("{} woke up!", target)),
                StatusType::Trapped => Some(format!("{} broke free!", target)),
                _ => Some(format!("{} shook off its {}!", target, status)),
            },
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target, status, damage
            )),

            BattleEvent::HazardDamage {
                target,
                hazard,
                damage,
                ..
            } => Some(format!(
                "{} is worn down by the {}! ({} damage)",
                target, hazard, damage
            )),
            BattleEvent::HazardSilenced { hazard, turns } => {
                Some(format!("The {} was cleansed for {} turns!", hazard, turns))
            }

            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                if new_stage > old_stage {
                    Some(format!("{}'s {} rose!", target, stat))
                } else {
                    Some(format!("{}'s {} fell!", target, stat))
                }
            }
            BattleEvent::StatChangeBlocked { target, stat } => {
                Some(format!("{}'s {} won't go any further!", target, stat))
            }

            BattleEvent::PhaseTransition {
                boss, phase_name, ..
            } => Some(format!("{} transforms... {} appears!", boss, phase_name)),
            BattleEvent::BattleEnded { outcome } => match outcome {
                EndOutcome::Victory => Some("The boss was defeated!".to_string()),
                EndOutcome::Defeat => Some("The party was wiped out...".to_string()),
                EndOutcome::Fled => Some("Got away safely!".to_string()),
            },
        }
    }
}

/// Event bus for collecting and managing battle events over one resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text (when available).
    /// Falls back to debug format for silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn contains(&self, event: &BattleEvent) -> bool {
        self.events.contains(event)
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Injectable randomness oracle: a pre-generated sequence of rolls in 1..=100,
/// consumed in a fixed order so tests can supply deterministic sequences.
/// Effects with a chance of 100 or more consume no roll.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // Pre-generate a reasonable number of random values for a turn
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            // Add the reason to the panic message for better debugging!
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}
