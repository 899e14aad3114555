use crate::battle::state::{BattleEvent, BattleState, EndOutcome, TurnRng};
use crate::battle::test_support::{duo_session, phase, solo_session};
use crate::battle::engine::TurnAction;
use crate::errors::{ActionError, EngineError};
use pretty_assertions::assert_eq;
use schema::StatusType;

fn skill_users(events: &[BattleEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::SkillUsed { actor, .. } => Some(actor.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_player_wins_speed_ties() {
    // Both sides at 50 speed; the player's overkill lands before the boss
    // ever moves, so the only skill use in the log is the player's.
    let mut session = solo_session(&["overkill"], vec![phase("Training Dummy", 100, 50, "tap")]);
    let mut rng = TurnRng::new_for_test(vec![100, 100]);

    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    assert_eq!(skill_users(bus.events()), vec!["Crunch Crab".to_string()]);
    assert_eq!(session.state(), BattleState::Victory);
    assert!(bus.contains(&BattleEvent::BattleEnded {
        outcome: EndOutcome::Victory,
    }));
}

#[test]
fn test_faster_boss_acts_first() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 80, "tap")]);
    let mut rng = TurnRng::new_for_test(vec![100, 100, 100, 100]);

    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    assert_eq!(
        skill_users(bus.events()),
        vec!["Training Dummy".to_string(), "Crunch Crab".to_string()]
    );
    assert_eq!(session.party().active().current_hp, 97);
    assert_eq!(session.opponent().current_hp, 97);
    assert_eq!(session.state(), BattleState::PlayerTurn);
    assert_eq!(session.turn_number(), 2);
}

#[test]
fn test_flee_ends_the_battle_immediately() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "tap")]);
    let mut rng = TurnRng::new_for_test(vec![]);

    let bus = session.resolve_turn(TurnAction::Flee, &mut rng).unwrap();

    assert_eq!(session.state(), BattleState::Fled);
    assert!(bus.contains(&BattleEvent::BattleEnded {
        outcome: EndOutcome::Fled,
    }));
    // The boss never got a move and nobody took damage.
    assert!(skill_users(bus.events()).is_empty());
    assert_eq!(session.party().active().current_hp, 100);

    // Terminal sessions reject further actions.
    assert_eq!(
        session.resolve_turn(TurnAction::Flee, &mut rng),
        Err(EngineError::Action(ActionError::NotWaitingForAction))
    );
}

#[test]
fn test_invalid_skill_index_leaves_state_untouched() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "tap")]);
    let mut rng = TurnRng::new_for_test(vec![]);

    assert_eq!(
        session.resolve_turn(TurnAction::UseSkill { skill_index: 4 }, &mut rng),
        Err(EngineError::Action(ActionError::InvalidSkillIndex(4)))
    );
    assert_eq!(session.state(), BattleState::PlayerTurn);
    assert_eq!(session.turn_number(), 1);
    assert_eq!(session.opponent().current_hp, 100);
}

#[test]
fn test_swap_spends_the_turn() {
    let mut session = duo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "tap")]);
    let mut rng = TurnRng::new_for_test(vec![100, 100]);

    let bus = session
        .resolve_turn(TurnAction::Swap { party_index: 1 }, &mut rng)
        .unwrap();

    assert!(bus.contains(&BattleEvent::Swapped {
        old_active: "Crunch Crab".to_string(),
        new_active: "Wafer Wisp".to_string(),
        forced: false,
    }));
    // Only the boss attacked, and it hit the incoming member.
    assert_eq!(skill_users(bus.events()), vec!["Training Dummy".to_string()]);
    assert_eq!(session.party().active().name, "Wafer Wisp");
    assert_eq!(session.party().active().current_hp, 97);
    assert_eq!(session.party().member(0).unwrap().current_hp, 100);
    assert_eq!(session.opponent().current_hp, 100);
}

#[test]
fn test_sleeping_player_skips_action() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "nap_dust")]);

    // Turn 1: the player taps, the boss puts it to sleep.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    // Turn 2: asleep, no action, no draws; re-applying sleep is a no-op.
    let mut rng = TurnRng::new_for_test(vec![]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();
    assert!(bus.contains(&BattleEvent::ActionSkipped {
        actor: "Crunch Crab".to_string(),
        status: StatusType::Sleep,
    }));
    assert!(bus.contains(&BattleEvent::StatusRemoved {
        target: "Crunch Crab".to_string(),
        status: StatusType::Sleep,
    }));

    // Turn 3: awake and attacking again.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();
    assert!(skill_users(bus.events()).contains(&"Crunch Crab".to_string()));
    assert_eq!(session.opponent().current_hp, 94);
}
