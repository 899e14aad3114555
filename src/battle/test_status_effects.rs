use crate::battle::engine::TurnAction;
use crate::battle::state::{BattleEvent, TurnRng};
use crate::battle::test_support::{duo_session, phase, solo_session, with_hazard};
use crate::errors::{ActionError, EngineError};
use pretty_assertions::assert_eq;
use schema::{StatType, StatusType};

fn use_first_skill(session: &mut crate::battle::engine::BattleSession, rolls: Vec<u8>) -> crate::battle::state::EventBus {
    let mut rng = TurnRng::new_for_test(rolls);
    session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap()
}

#[test]
fn test_dehydration_ticks_each_turn_without_stacking() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "brine_mist")]);

    // 100 max HP at 8% against 50 defense: 100 * 8 / 100 = 8 per tick.
    let bus = use_first_skill(&mut session, vec![100, 100]);
    assert!(bus.contains(&BattleEvent::StatusApplied {
        target: "Crunch Crab".to_string(),
        status: StatusType::Dehydrated,
    }));
    assert!(bus.contains(&BattleEvent::StatusDamage {
        target: "Crunch Crab".to_string(),
        status: StatusType::Dehydrated,
        damage: 8,
        remaining_hp: 92,
    }));

    // Second application is silent and the tick stays at 8.
    let bus = use_first_skill(&mut session, vec![100, 100]);
    let applications = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::StatusApplied { .. }))
        .count();
    assert_eq!(applications, 0);
    assert_eq!(session.party().active().current_hp, 84);
}

#[test]
fn test_burn_drops_attack_once_on_first_tick() {
    let mut session = solo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "sear")]);

    // Turn 1: burn lands, first tick of 6 plus the one-time Attack drop.
    let bus = use_first_skill(&mut session, vec![100, 100]);
    assert!(bus.contains(&BattleEvent::StatusDamage {
        target: "Crunch Crab".to_string(),
        status: StatusType::Burned,
        damage: 6,
        remaining_hp: 94,
    }));
    assert!(bus.contains(&BattleEvent::StatStageChanged {
        target: "Crunch Crab".to_string(),
        stat: StatType::Attack,
        old_stage: 0,
        new_stage: -1,
    }));

    // Turn 2: the tick repeats but the drop does not.
    let bus = use_first_skill(&mut session, vec![100, 100]);
    assert!(!bus.contains(&BattleEvent::StatStageChanged {
        target: "Crunch Crab".to_string(),
        stat: StatType::Attack,
        old_stage: -1,
        new_stage: -2,
    }));
    assert_eq!(session.party().active().get_stat_stage(StatType::Attack), -1);
    assert_eq!(session.party().active().current_hp, 88);
}

#[test]
fn test_trap_blocks_swaps_until_it_wears_off() {
    let mut session = duo_session(&["tap"], vec![phase("Training Dummy", 100, 50, "snare")]);

    // Turn 1: the boss snares the active member.
    use_first_skill(&mut session, vec![100, 100]);
    assert!(session.party().active().has_status(crate::battle::conditions::StatusKind::Trapped));

    // Turn 2: swapping out is rejected; attacking is still allowed, and the
    // trap releases at the end of this turn.
    let mut rng = TurnRng::new_for_test(vec![]);
    assert_eq!(
        session.resolve_turn(TurnAction::Swap { party_index: 1 }, &mut rng),
        Err(EngineError::Action(ActionError::SwapWhileTrapped))
    );
    let bus = use_first_skill(&mut session, vec![100, 100]);
    assert!(bus.contains(&BattleEvent::StatusRemoved {
        target: "Crunch Crab".to_string(),
        status: StatusType::Trapped,
    }));

    // Turn 3: free to swap again.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::Swap { party_index: 1 }, &mut rng)
        .unwrap();
    assert!(bus.contains(&BattleEvent::Swapped {
        old_active: "Crunch Crab".to_string(),
        new_active: "Wafer Wisp".to_string(),
        forced: false,
    }));
}

#[test]
fn test_grease_drops_accuracy_and_purify_cleanses_it() {
    // The boss outspeeds, so its grease is already in place when the player
    // cleanses on the following turn.
    let mut session =
        solo_session(&["cleanse", "tap"], vec![phase("Training Dummy", 100, 80, "slick")]);

    // Turn 1: the boss greases the player (Accuracy -1 on apply).
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    session
        .resolve_turn(TurnAction::UseSkill { skill_index: 1 }, &mut rng)
        .unwrap();
    assert_eq!(
        session.party().active().get_stat_stage(StatType::Accuracy),
        -1
    );

    // Turn 2: cleanse strips the grease. The stage shift it caused stays;
    // only the condition itself is purged.
    let bus = use_first_skill(&mut session, vec![]);
    assert!(bus.contains(&BattleEvent::StatusRemoved {
        target: "Crunch Crab".to_string(),
        status: StatusType::Greased,
    }));
    assert!(!session
        .party()
        .active()
        .has_status(crate::battle::conditions::StatusKind::Greased));
}

#[test]
fn test_purify_silences_the_hazard_for_its_duration() {
    let hazard_phase = with_hazard(
        phase("Training Dummy", 200, 50, "brine_mist"),
        "Crumb Storm",
        10,
    );
    let mut session = solo_session(&["cleanse", "tap"], vec![hazard_phase]);

    // Turn 1: cleanse silences the storm for 2 turns; the boss dehydrates
    // the player, whose tick still lands (8), but no hazard chip.
    let bus = use_first_skill(&mut session, vec![]);
    assert!(bus.contains(&BattleEvent::HazardSilenced {
        hazard: "Crumb Storm".to_string(),
        turns: 2,
    }));
    assert!(!bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::HazardDamage { .. })));
    assert_eq!(session.party().active().current_hp, 92);

    // Turn 2: still silenced.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 1 }, &mut rng)
        .unwrap();
    assert!(!bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::HazardDamage { .. })));

    // Turn 3: the silence has run out; 10% of 100 max HP chips in on top of
    // the dehydration tick.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 1 }, &mut rng)
        .unwrap();
    assert!(bus.contains(&BattleEvent::HazardDamage {
        target: "Crunch Crab".to_string(),
        hazard: "Crumb Storm".to_string(),
        damage: 10,
        remaining_hp: 66,
    }));
}
