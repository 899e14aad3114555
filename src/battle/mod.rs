pub mod ai;
pub mod calculators;
pub mod commands;
pub mod conditions;
pub mod engine;
pub mod phase;
pub mod state;
pub mod stats;
pub mod typechart;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod test_phases;
#[cfg(test)]
mod test_status_effects;
#[cfg(test)]
mod test_turn_flow;
