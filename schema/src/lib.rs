// Snackdown Schema - Shared type definitions
// This crate contains the content-data definitions shared between the main
// snackdown engine crate and any content tooling: nutritional types and their
// matchups, skill definitions, and species/boss/phase definitions.

// Re-export the main types
pub use combat_data::*;
pub use nutrition::*;
pub use skills::*;

pub mod combat_data;
pub mod nutrition;
pub mod skills;
