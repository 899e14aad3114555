use crate::battle::ai::{Behavior, BossBrain};
use crate::battle::calculators::calculate_skill_outcome;
use crate::battle::commands::{BattleCommand, CommandContext, Side, execute_commands};
use crate::battle::conditions::{ActiveStatus, StatusKind, status_tick_damage};
use crate::battle::phase::PhaseProgress;
use crate::battle::state::{BattleEvent, BattleState, EndOutcome, EventBus, TurnRng};
use crate::battle::stats::{effective_defense, effective_speed};
use crate::combatant::Combatant;
use crate::content::ContentTables;
use crate::errors::{ActionError, EngineError, EngineResult, StateError};
use crate::party::Party;
use schema::PassiveAbility;

/// What the player asks the engine to do with a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    UseSkill { skill_index: usize },
    Swap { party_index: usize },
    Flee,
}

/// One boss battle from intro to a terminal state. All mutation happens
/// inside [`BattleSession::resolve_turn`]; between calls the session is
/// either waiting for a player action or finished.
pub struct BattleSession {
    content: ContentTables,
    party: Party,
    opponent: Combatant,
    phase: PhaseProgress,
    state: BattleState,
    turn_number: u32,
    brain: Box<dyn Behavior>,
}

impl BattleSession {
    pub fn new(
        content: ContentTables,
        species_ids: &[&str],
        boss_id: &str,
    ) -> EngineResult<Self> {
        let mut members = Vec::new();
        for id in species_ids {
            members.push(Combatant::from_species(content.species(id)?));
        }
        if members.is_empty() {
            return Err(StateError::InconsistentState("empty party".to_string()).into());
        }

        let phase = PhaseProgress::new(boss_id);
        let opponent = Combatant::from_phase(phase.current_phase(&content)?);

        Ok(BattleSession {
            content,
            party: Party::new(members),
            opponent,
            phase,
            state: BattleState::Intro,
            turn_number: 1,
            brain: Box::new(BossBrain),
        })
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn phase_index(&self) -> usize {
        self.phase.phase_index()
    }

    pub fn content(&self) -> &ContentTables {
        &self.content
    }

    /// Leave the intro and start waiting for the first action.
    pub fn begin(&mut self) -> EventBus {
        let mut bus = EventBus::new();
        if self.state == BattleState::Intro {
            bus.push(BattleEvent::BattleStarted {
                player: self.party.active().name.clone(),
                opponent: self.opponent.name.clone(),
            });
            self.state = BattleState::PlayerTurn;
        }
        bus
    }

    /// Resolve one full turn from the given player action. Invalid actions
    /// are rejected before anything mutates, so the caller can re-prompt
    /// against unchanged state.
    pub fn resolve_turn(
        &mut self,
        action: TurnAction,
        rng: &mut TurnRng,
    ) -> EngineResult<EventBus> {
        if self.state != BattleState::PlayerTurn {
            return Err(ActionError::NotWaitingForAction.into());
        }
        match action {
            TurnAction::UseSkill { skill_index } => {
                if skill_index >= self.party.active().skills.len() {
                    return Err(ActionError::InvalidSkillIndex(skill_index).into());
                }
            }
            TurnAction::Swap { party_index } => {
                self.party.validate_swap(party_index)?;
            }
            TurnAction::Flee => {}
        }

        let mut bus = EventBus::new();
        bus.push(BattleEvent::TurnStarted {
            turn_number: self.turn_number,
        });

        if action == TurnAction::Flee {
            self.finish(EndOutcome::Fled, &mut bus);
            return Ok(bus);
        }

        // The boss commits to one skill per turn; forced-swap free hits
        // reuse the same pick rather than re-consulting the brain.
        let boss_skill =
            self.brain
                .select_skill(&self.opponent, self.party.active(), &self.content, rng);

        let mut phase_changed = false;
        let mut player_benched = false;
        match action {
            TurnAction::UseSkill { skill_index } => {
                self.run_exchange(
                    skill_index,
                    boss_skill,
                    &mut phase_changed,
                    &mut player_benched,
                    &mut bus,
                    rng,
                )?;
            }
            TurnAction::Swap { party_index } => {
                let old_active = self.party.active().name.clone();
                self.party.swap(party_index)?;
                bus.push(BattleEvent::Swapped {
                    old_active,
                    new_active: self.party.active().name.clone(),
                    forced: false,
                });
                // Swapping spends the turn; the boss still gets its action.
                self.state = BattleState::EnemyTurn;
                self.perform_action(Side::Opponent, boss_skill, &mut bus, rng)?;
                self.resolve_faints(
                    boss_skill,
                    &mut phase_changed,
                    &mut player_benched,
                    &mut bus,
                    rng,
                )?;
            }
            TurnAction::Flee => {} // returned above
        }

        self.end_of_turn(boss_skill, &mut phase_changed, &mut player_benched, &mut bus, rng)?;

        if !self.state.is_terminal() {
            bus.push(BattleEvent::TurnEnded);
            self.turn_number += 1;
            self.state = BattleState::PlayerTurn;
        }
        Ok(bus)
    }

    /// Both sides attack, faster first. The player wins speed ties.
    fn run_exchange(
        &mut self,
        player_skill: usize,
        boss_skill: usize,
        phase_changed: &mut bool,
        player_benched: &mut bool,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> EngineResult<()> {
        let player_first =
            effective_speed(self.party.active()) >= effective_speed(&self.opponent);
        let order = if player_first {
            [Side::Player, Side::Opponent]
        } else {
            [Side::Opponent, Side::Player]
        };

        for side in order {
            if self.state.is_terminal() {
                break;
            }
            // A mid-turn phase transition swallows the outgoing phase's
            // pending action; the fresh phase does not act until next turn.
            if side == Side::Opponent && *phase_changed {
                continue;
            }
            // Likewise a forced replacement arrives without an action: the
            // fainted member's pick dies with it, and its index may not even
            // be valid for the newcomer's skill list.
            if side == Side::Player && *player_benched {
                continue;
            }
            self.state = match side {
                Side::Player => BattleState::ExecutingMove,
                Side::Opponent => BattleState::EnemyTurn,
            };
            let skill_index = match side {
                Side::Player => player_skill,
                Side::Opponent => boss_skill,
            };
            self.perform_action(side, skill_index, bus, rng)?;
            self.resolve_faints(boss_skill, phase_changed, player_benched, bus, rng)?;
        }
        Ok(())
    }

    fn side(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => self.party.active(),
            Side::Opponent => &self.opponent,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => self.party.active_mut(),
            Side::Opponent => &mut self.opponent,
        }
    }

    fn perform_action(
        &mut self,
        side: Side,
        skill_index: usize,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> EngineResult<()> {
        let actor = self.side(side);
        if actor.is_fainted() {
            return Ok(());
        }
        if let Some(blocking) = actor.statuses.values().find(|status| status.prevents_action()) {
            bus.push(BattleEvent::ActionSkipped {
                actor: actor.name.clone(),
                status: blocking.status_type(),
            });
            return Ok(());
        }

        let skill_id = actor
            .skills
            .get(skill_index)
            .ok_or_else(|| {
                EngineError::State(StateError::InconsistentState(format!(
                    "skill index {} out of range for {}",
                    skill_index, actor.name
                )))
            })?
            .clone();
        let skill = self.content.skill(&skill_id)?;

        let (attacker, defender) = match side {
            Side::Player => (self.party.active(), &self.opponent),
            Side::Opponent => (&self.opponent, self.party.active()),
        };
        let commands = calculate_skill_outcome(attacker, defender, skill, side, rng);
        self.execute(commands, bus);
        Ok(())
    }

    fn execute(&mut self, commands: Vec<BattleCommand>, bus: &mut EventBus) {
        self.state = BattleState::ApplyingEffects;
        let BattleSession {
            content,
            party,
            opponent,
            phase,
            ..
        } = self;
        let hazard = phase
            .current_phase(content)
            .ok()
            .and_then(|p| p.hazard.as_ref());
        let mut ctx = CommandContext {
            player: party.active_mut(),
            opponent,
            hazard,
            hazard_silence_turns: &mut phase.hazard_silence_turns,
        };
        execute_commands(&mut ctx, commands, bus);
    }

    /// Settle every knockout on the field, looping until the field is quiet
    /// or the battle ends. A defeated phase hands over to the next one; a
    /// downed party member is replaced by the first survivor, who eats a
    /// free hit from the boss's committed skill and forfeits the fainted
    /// member's pending action.
    fn resolve_faints(
        &mut self,
        boss_skill: usize,
        phase_changed: &mut bool,
        player_benched: &mut bool,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> EngineResult<()> {
        loop {
            if self.state.is_terminal() {
                return Ok(());
            }

            if self.opponent.is_fainted() {
                if self.phase.has_next_phase(&self.content) {
                    let boss_name = self.phase.boss(&self.content)?.name.clone();
                    self.opponent = self.phase.advance(&self.content)?;
                    *phase_changed = true;
                    bus.push(BattleEvent::PhaseTransition {
                        boss: boss_name,
                        phase_index: self.phase.phase_index(),
                        phase_name: self.opponent.name.clone(),
                    });
                    continue;
                }
                self.finish(EndOutcome::Victory, bus);
                return Ok(());
            }

            if self.party.active().is_fainted() {
                let old_active = self.party.active().name.clone();
                match self.party.auto_swap() {
                    Some(_) => {
                        *player_benched = true;
                        bus.push(BattleEvent::Swapped {
                            old_active,
                            new_active: self.party.active().name.clone(),
                            forced: true,
                        });
                        if !*phase_changed {
                            self.perform_action(Side::Opponent, boss_skill, bus, rng)?;
                            continue;
                        }
                    }
                    None => {
                        self.finish(EndOutcome::Defeat, bus);
                        return Ok(());
                    }
                }
            }

            return Ok(());
        }
    }

    fn end_of_turn(
        &mut self,
        boss_skill: usize,
        phase_changed: &mut bool,
        player_benched: &mut bool,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> EngineResult<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        self.state = BattleState::TurnEnd;

        self.tick_dot(Side::Player, bus);
        self.tick_dot(Side::Opponent, bus);
        self.tick_status_timers(Side::Player, bus);
        self.tick_status_timers(Side::Opponent, bus);
        self.tick_hazard(bus);
        self.apply_end_of_turn_passive(bus);

        self.resolve_faints(boss_skill, phase_changed, player_benched, bus, rng)
    }

    /// Damage-over-time ticks, player side first. The burn's one-time attack
    /// drop lands with its first tick.
    fn tick_dot(&mut self, side: Side, bus: &mut EventBus) {
        for kind in [StatusKind::Dehydrated, StatusKind::Burned] {
            let percent = match kind.dot_percent() {
                Some(percent) => percent,
                None => continue,
            };

            let mut burn_drop_due = false;
            {
                let combatant = self.side_mut(side);
                if combatant.is_fainted() || !combatant.has_status(kind) {
                    continue;
                }
                let damage =
                    status_tick_damage(combatant.max_hp, percent, effective_defense(combatant));
                let fainted = combatant.take_damage(damage);
                bus.push(BattleEvent::StatusDamage {
                    target: combatant.name.clone(),
                    status: kind.status_type(),
                    damage,
                    remaining_hp: combatant.current_hp,
                });
                if fainted {
                    bus.push(BattleEvent::Fainted {
                        target: combatant.name.clone(),
                    });
                } else if kind == StatusKind::Burned {
                    if let Some(ActiveStatus::Burned {
                        attack_drop_applied,
                    }) = combatant.status_mut(StatusKind::Burned)
                    {
                        if !*attack_drop_applied {
                            *attack_drop_applied = true;
                            burn_drop_due = true;
                        }
                    }
                }
            }

            if burn_drop_due {
                self.execute(
                    vec![BattleCommand::ChangeStatStage {
                        target: side,
                        stat: schema::StatType::Attack,
                        delta: -1,
                    }],
                    bus,
                );
            }
        }
    }

    /// Sleep counts down and wears off; a trap survives the turn it was set
    /// and releases at the end of the following one.
    fn tick_status_timers(&mut self, side: Side, bus: &mut EventBus) {
        let combatant = self.side_mut(side);
        if combatant.is_fainted() {
            return;
        }

        let mut expired = Vec::new();
        if let Some(ActiveStatus::Sleep { turns_remaining }) =
            combatant.status_mut(StatusKind::Sleep)
        {
            *turns_remaining -= 1;
            if *turns_remaining == 0 {
                expired.push(StatusKind::Sleep);
            }
        }
        if let Some(ActiveStatus::Trapped { just_applied }) =
            combatant.status_mut(StatusKind::Trapped)
        {
            if *just_applied {
                *just_applied = false;
            } else {
                expired.push(StatusKind::Trapped);
            }
        }

        for kind in expired {
            combatant.remove_status(kind);
            bus.push(BattleEvent::StatusRemoved {
                target: combatant.name.clone(),
                status: kind.status_type(),
            });
        }
    }

    /// The active phase's hazard chips the player's active combatant for a
    /// flat percent of max HP, unless a purify has silenced it.
    fn tick_hazard(&mut self, bus: &mut EventBus) {
        let BattleSession {
            content,
            party,
            phase,
            ..
        } = self;
        let hazard = match phase.current_phase(content).ok().and_then(|p| p.hazard.as_ref()) {
            Some(hazard) => hazard,
            None => return,
        };
        if phase.hazard_silence_turns > 0 {
            phase.hazard_silence_turns -= 1;
            return;
        }
        let active = party.active_mut();
        if active.is_fainted() {
            return;
        }
        let damage =
            (((active.max_hp as u32) * (hazard.chip_percent as u32)) / 100).max(1) as u16;
        let fainted = active.take_damage(damage);
        bus.push(BattleEvent::HazardDamage {
            target: active.name.clone(),
            hazard: hazard.name.clone(),
            damage,
            remaining_hp: active.current_hp,
        });
        if fainted {
            bus.push(BattleEvent::Fainted {
                target: active.name.clone(),
            });
        }
    }

    fn apply_end_of_turn_passive(&mut self, bus: &mut EventBus) {
        if self.opponent.is_fainted() {
            return;
        }
        if let Some(PassiveAbility::EndOfTurnStatGain { stat, stages }) =
            self.opponent.passive.clone()
        {
            self.execute(
                vec![BattleCommand::ChangeStatStage {
                    target: Side::Opponent,
                    stat,
                    delta: stages,
                }],
                bus,
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn party_mut(&mut self) -> &mut Party {
        &mut self.party
    }

    fn finish(&mut self, outcome: EndOutcome, bus: &mut EventBus) {
        self.state = match outcome {
            EndOutcome::Victory => BattleState::Victory,
            EndOutcome::Defeat => BattleState::Defeat,
            EndOutcome::Fled => BattleState::Fled,
        };
        bus.push(BattleEvent::BattleEnded { outcome });
    }
}
