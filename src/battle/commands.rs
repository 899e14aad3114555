use crate::battle::conditions::{ActiveStatus, StatusKind};
use crate::battle::state::{BattleEvent, EventBus};
use crate::combatant::Combatant;
use schema::{Hazard, StatType, StatusType};

/// Which combatant a command addresses. The player side always means the
/// party's active member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// An atomic state mutation produced by the calculators. Calculators are pure;
/// only [`execute_commands`] touches combatant state, so every change flows
/// through one place and every change gets its event.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    DealDamage { target: Side, amount: u16 },
    HealCombatant { target: Side, amount: u16 },
    ApplyStatus { target: Side, status: StatusType },
    RemoveStatus { target: Side, status: StatusKind },
    ChangeStatStage { target: Side, stat: StatType, delta: i8 },
    SilenceHazard { turns: u8 },
    EmitEvent(BattleEvent),
}

/// Mutable view of everything a command may touch during execution.
pub struct CommandContext<'a> {
    pub player: &'a mut Combatant,
    pub opponent: &'a mut Combatant,
    pub hazard: Option<&'a Hazard>,
    pub hazard_silence_turns: &'a mut u8,
}

impl<'a> CommandContext<'a> {
    fn target_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

/// Apply a command list in order, pushing the derived events onto the bus.
/// Commands addressing an already-fainted combatant are dropped, except
/// heals targeting the side that just fainted mid-list (a knockout drain
/// resolves after its victim drops, which is fine).
pub fn execute_commands(ctx: &mut CommandContext, commands: Vec<BattleCommand>, bus: &mut EventBus) {
    for command in commands {
        execute_one(ctx, command, bus);
    }
}

fn execute_one(ctx: &mut CommandContext, command: BattleCommand, bus: &mut EventBus) {
    match command {
        BattleCommand::DealDamage { target, amount } => {
            let combatant = ctx.target_mut(target);
            if combatant.is_fainted() {
                return;
            }
            let fainted = combatant.take_damage(amount);
            bus.push(BattleEvent::DamageDealt {
                target: combatant.name.clone(),
                amount,
                remaining_hp: combatant.current_hp,
            });
            if fainted {
                bus.push(BattleEvent::Fainted {
                    target: combatant.name.clone(),
                });
            }
        }
        BattleCommand::HealCombatant { target, amount } => {
            let combatant = ctx.target_mut(target);
            if combatant.is_fainted() {
                return;
            }
            let restored = combatant.heal(amount);
            if restored > 0 {
                bus.push(BattleEvent::Healed {
                    target: combatant.name.clone(),
                    amount: restored,
                    new_hp: combatant.current_hp,
                });
            }
        }
        BattleCommand::ApplyStatus { target, status } => {
            apply_status(ctx, target, status, bus);
        }
        BattleCommand::RemoveStatus { target, status } => {
            let combatant = ctx.target_mut(target);
            if combatant.remove_status(status).is_some() {
                bus.push(BattleEvent::StatusRemoved {
                    target: combatant.name.clone(),
                    status: status.status_type(),
                });
            }
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            change_stat_stage(ctx.target_mut(target), stat, delta, bus);
        }
        BattleCommand::SilenceHazard { turns } => {
            if let Some(hazard) = ctx.hazard {
                *ctx.hazard_silence_turns = turns;
                bus.push(BattleEvent::HazardSilenced {
                    hazard: hazard.name.clone(),
                    turns,
                });
            }
        }
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
        }
    }
}

fn apply_status(ctx: &mut CommandContext, target: Side, status: StatusType, bus: &mut EventBus) {
    let combatant = ctx.target_mut(target);
    if combatant.is_fainted() || combatant.is_immune_to_status(status) {
        return;
    }
    let instance = ActiveStatus::from_status_type(status);
    if !combatant.add_status(instance) {
        // Already afflicted; re-application is a silent no-op.
        return;
    }
    bus.push(BattleEvent::StatusApplied {
        target: combatant.name.clone(),
        status,
    });
    if let Some((stat, delta)) = instance.kind().on_apply_stat_drop() {
        change_stat_stage(combatant, stat, delta, bus);
    }
}

fn change_stat_stage(combatant: &mut Combatant, stat: StatType, delta: i8, bus: &mut EventBus) {
    let old_stage = combatant.get_stat_stage(stat);
    combatant.modify_stat_stage(stat, delta);
    let new_stage = combatant.get_stat_stage(stat);
    if new_stage == old_stage {
        bus.push(BattleEvent::StatChangeBlocked {
            target: combatant.name.clone(),
            stat,
        });
    } else {
        bus.push(BattleEvent::StatStageChanged {
            target: combatant.name.clone(),
            stat,
            old_stage,
            new_stage,
        });
    }
}
