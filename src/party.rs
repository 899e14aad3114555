use crate::battle::conditions::StatusKind;
use crate::combatant::Combatant;
use crate::errors::ActionError;
use serde::{Deserialize, Serialize};

pub const MAX_PARTY_SIZE: usize = 3;

/// The player's roster of up to three combatants with one active member.
/// Manual swaps are validated here; forced auto-swaps pick the first
/// survivor in original roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    members: Vec<Combatant>,
    active_index: usize,
}

impl Party {
    pub fn new(mut members: Vec<Combatant>) -> Self {
        members.truncate(MAX_PARTY_SIZE);
        Party {
            members,
            active_index: 0,
        }
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &Combatant {
        &self.members[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.members[self.active_index]
    }

    pub fn member(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    #[cfg(test)]
    pub(crate) fn member_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index)
    }

    /// Validate a manual swap without performing it. Trapped combatants
    /// cannot be recalled, fainted members cannot be sent in.
    pub fn validate_swap(&self, target_index: usize) -> Result<(), ActionError> {
        if target_index >= self.members.len() {
            return Err(ActionError::InvalidPartyIndex(target_index));
        }
        if target_index == self.active_index {
            return Err(ActionError::SwapToActive(target_index));
        }
        if self.active().has_status(StatusKind::Trapped) {
            return Err(ActionError::SwapWhileTrapped);
        }
        if self.members[target_index].is_fainted() {
            return Err(ActionError::SwapToFainted(target_index));
        }
        Ok(())
    }

    /// Perform a validated manual swap. Statuses and stat stages live on the
    /// combatant records, so they travel to the bench with their owner.
    pub fn swap(&mut self, target_index: usize) -> Result<(), ActionError> {
        self.validate_swap(target_index)?;
        self.active_index = target_index;
        Ok(())
    }

    /// The first member (in roster order) with HP remaining, for auto-swaps.
    pub fn first_alive_index(&self) -> Option<usize> {
        self.members.iter().position(|member| !member.is_fainted())
    }

    /// Forced swap after a faint: no player choice, no trap check. Returns
    /// the new active index, or None when no member survives.
    pub fn auto_swap(&mut self) -> Option<usize> {
        let index = self.first_alive_index()?;
        self.active_index = index;
        Some(index)
    }

    pub fn has_survivor(&self) -> bool {
        self.first_alive_index().is_some()
    }
}
