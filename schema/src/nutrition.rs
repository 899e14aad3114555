use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum NutritionalType {
    Protein,
    Carb,
    Fat,
    Fiber,
    Processed,
    Oil,
}

impl fmt::Display for NutritionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stat categories that can carry battle stages in [-6, +6].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatType {
    Attack,
    Defense,
    Speed,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::Speed => "Speed",
            StatType::Accuracy => "accuracy",
            StatType::Evasion => "evasiveness",
        };
        write!(f, "{}", display_name)
    }
}

/// Status conditions a combatant can carry. Each is present at most once on a
/// combatant; runtime bookkeeping (counters, guard flags) lives in the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusType {
    Dehydrated,
    Greased,
    Sour,
    Sleep,
    Trapped,
    Burned,
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusType::Dehydrated => "dehydration",
            StatusType::Greased => "grease",
            StatusType::Sour => "sourness",
            StatusType::Sleep => "sleep",
            StatusType::Trapped => "trapping",
            StatusType::Burned => "burn",
        };
        write!(f, "{}", display_name)
    }
}

impl NutritionalType {
    /// Calculate the effectiveness multiplier for one attacking type against
    /// one defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective,
    /// 0.0 = Immune. Immunity is resolved across dual types by the engine.
    pub fn effectiveness(attacking: NutritionalType, defending: NutritionalType) -> f64 {
        use NutritionalType::*;

        match (attacking, defending) {
            // Protein
            (Protein, Carb) => 2.0,
            (Protein, Fiber) | (Protein, Protein) => 0.5,
            (Protein, _) => 1.0,

            // Carb
            (Carb, Protein) => 2.0,
            (Carb, Carb) | (Carb, Fat) => 0.5,
            (Carb, _) => 1.0,

            // Fat
            (Fat, Protein) => 2.0,
            (Fat, Oil) | (Fat, Fat) => 0.5,
            (Fat, _) => 1.0,

            // Fiber
            (Fiber, Processed) | (Fiber, Fat) => 2.0,
            (Fiber, Protein) => 0.5,
            (Fiber, _) => 1.0,

            // Processed
            (Processed, Oil) => 0.0,
            (Processed, Protein) | (Processed, Carb) => 2.0,
            (Processed, Fiber) => 0.5,
            (Processed, _) => 1.0,

            // Oil
            (Oil, Fiber) | (Oil, Carb) => 2.0,
            (Oil, Fat) => 0.5,
            (Oil, _) => 1.0,
        }
    }

    /// A "poor matchup" is a soft immunity: attacks of this type against the
    /// defending type land at 60% of their nominal accuracy. Independent of
    /// the hard-immunity table above.
    pub fn is_poor_matchup(attacking: NutritionalType, defending: NutritionalType) -> bool {
        use NutritionalType::*;

        matches!(
            (attacking, defending),
            (Protein, Oil) | (Fat, Fiber) | (Oil, Protein)
        )
    }

    pub fn all() -> [NutritionalType; 6] {
        use NutritionalType::*;
        [Protein, Carb, Fat, Fiber, Processed, Oil]
    }
}
