use std::fmt;

/// Main error type for the Snackdown battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error related to content data lookup (skills, species, bosses)
    Content(ContentError),
    /// Error related to an invalid player action
    Action(ActionError),
    /// Error related to invalid battle state
    State(StateError),
}

/// Errors related to content data operations. Fatal at session construction:
/// no partial battle starts from missing definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The specified skill was not found in the tables
    SkillNotFound(String),
    /// The specified species was not found in the tables
    SpeciesNotFound(String),
    /// The specified boss was not found in the tables
    BossNotFound(String),
    /// A boss definition declares no phases
    EmptyBoss(String),
    /// Content data is malformed or could not be read
    MalformedData(String),
}

/// Typed rejections for invalid player actions. The session state is left
/// unchanged; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Skill index outside the active combatant's skill list
    InvalidSkillIndex(usize),
    /// Party index out of range
    InvalidPartyIndex(usize),
    /// Manual swap attempted while the active combatant is trapped
    SwapWhileTrapped,
    /// Manual swap to a fainted party member
    SwapToFainted(usize),
    /// Swap to the slot that is already active
    SwapToActive(usize),
    /// The session is not waiting for a player action
    NotWaitingForAction,
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Battle state is inconsistent or corrupted
    InconsistentState(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Content(err) => write!(f, "Content error: {}", err),
            EngineError::Action(err) => write!(f, "Action error: {}", err),
            EngineError::State(err) => write!(f, "State error: {}", err),
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::SkillNotFound(id) => write!(f, "Skill not found: {}", id),
            ContentError::SpeciesNotFound(id) => write!(f, "Species not found: {}", id),
            ContentError::BossNotFound(id) => write!(f, "Boss not found: {}", id),
            ContentError::EmptyBoss(id) => write!(f, "Boss has no phases: {}", id),
            ContentError::MalformedData(details) => write!(f, "Malformed content data: {}", details),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidSkillIndex(index) => write!(f, "Invalid skill index: {}", index),
            ActionError::InvalidPartyIndex(index) => write!(f, "Invalid party index: {}", index),
            ActionError::SwapWhileTrapped => write!(f, "Cannot swap while trapped"),
            ActionError::SwapToFainted(index) => {
                write!(f, "Cannot swap to fainted party member: {}", index)
            }
            ActionError::SwapToActive(index) => {
                write!(f, "Party member {} is already active", index)
            }
            ActionError::NotWaitingForAction => write!(f, "Battle is not waiting for an action"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::InconsistentState(details) => {
                write!(f, "Inconsistent battle state: {}", details)
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for ContentError {}
impl std::error::Error for ActionError {}
impl std::error::Error for StateError {}

impl From<ContentError> for EngineError {
    fn from(err: ContentError) -> Self {
        EngineError::Content(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

impl From<StateError> for EngineError {
    fn from(err: StateError) -> Self {
        EngineError::State(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using ContentError
pub type ContentResult<T> = Result<T, ContentError>;
