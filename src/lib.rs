//! Snackdown: a deterministic boss-battle engine where nutritional archetypes
//! square off. A party of up to three snacks faces a multi-phase boss; every
//! turn resolves into an ordered event list, with all randomness drawn from
//! an injectable oracle so identical inputs replay identically.

pub mod battle;
pub mod combatant;
pub mod content;
pub mod errors;
pub mod party;

pub use battle::engine::{BattleSession, TurnAction};
pub use battle::state::{BattleEvent, BattleState, EndOutcome, EventBus, TurnRng};
pub use combatant::Combatant;
pub use content::ContentTables;
pub use errors::{ActionError, ContentError, EngineError, EngineResult, StateError};
pub use party::{Party, MAX_PARTY_SIZE};
