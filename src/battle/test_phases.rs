use crate::battle::engine::TurnAction;
use crate::battle::state::{BattleEvent, BattleState, EndOutcome, TurnRng};
use crate::battle::test_support::{duo_session, phase, solo_session, with_hazard, with_passive};
use pretty_assertions::assert_eq;
use schema::{PassiveAbility, StatType};

#[test]
fn test_phase_transition_resets_hazard_silence_and_swallows_the_boss_action() {
    let phases = vec![
        with_hazard(phase("Training Dummy", 50, 50, "tap"), "Salt Mist", 5),
        with_passive(
            with_hazard(phase("Dummy Prime", 80, 50, "tap"), "Pepper Gale", 5),
            PassiveAbility::EndOfTurnStatGain {
                stat: StatType::Attack,
                stages: 1,
            },
        ),
    ];
    let mut session = solo_session(&["overkill", "cleanse"], phases);

    // Turn 1: cleanse silences Salt Mist for 2 turns; the boss taps back.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    session
        .resolve_turn(TurnAction::UseSkill { skill_index: 1 }, &mut rng)
        .unwrap();
    assert_eq!(session.party().active().current_hp, 97);

    // Turn 2: overkill flattens phase one. The next phase arrives at full
    // HP, its own hazard chips immediately (the silence died with the old
    // phase), its passive fires, and it does not act this turn.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    assert!(bus.contains(&BattleEvent::PhaseTransition {
        boss: "Training Dummy".to_string(),
        phase_index: 1,
        phase_name: "Dummy Prime".to_string(),
    }));
    assert!(bus.contains(&BattleEvent::HazardDamage {
        target: "Crunch Crab".to_string(),
        hazard: "Pepper Gale".to_string(),
        damage: 5,
        remaining_hp: 92,
    }));
    assert!(bus.contains(&BattleEvent::StatStageChanged {
        target: "Dummy Prime".to_string(),
        stat: StatType::Attack,
        old_stage: 0,
        new_stage: 1,
    }));
    let boss_moves = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::SkillUsed { actor, .. } if actor == "Dummy Prime"))
        .count();
    assert_eq!(boss_moves, 0);
    assert_eq!(session.phase_index(), 1);
    assert_eq!(session.opponent().current_hp, 80);
    assert_eq!(session.state(), BattleState::PlayerTurn);

    // Turn 3: overkill again for the win.
    let mut rng = TurnRng::new_for_test(vec![100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();
    assert!(bus.contains(&BattleEvent::BattleEnded {
        outcome: EndOutcome::Victory,
    }));
    assert_eq!(session.state(), BattleState::Victory);
}

#[test]
fn test_party_wipe_through_forced_swaps_is_a_defeat() {
    let mut session = duo_session(&["tap"], vec![phase("Training Dummy", 100, 80, "overkill")]);

    // The boss outspeeds and one-shots the active member, the bench member
    // is forced in, eats the free hit, and the party is wiped before the
    // player ever moves.
    let mut rng = TurnRng::new_for_test(vec![100, 100, 100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    assert!(bus.contains(&BattleEvent::Swapped {
        old_active: "Crunch Crab".to_string(),
        new_active: "Wafer Wisp".to_string(),
        forced: true,
    }));
    let faints = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::Fainted { .. }))
        .count();
    assert_eq!(faints, 2);
    assert!(bus.contains(&BattleEvent::BattleEnded {
        outcome: EndOutcome::Defeat,
    }));
    assert_eq!(session.state(), BattleState::Defeat);
    let player_moves = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::SkillUsed { actor, .. } if actor != "Training Dummy"))
        .count();
    assert_eq!(player_moves, 0);
}

#[test]
fn test_forced_replacement_forfeits_the_fainted_members_action() {
    let mut session = duo_session(&["tap"], vec![phase("Training Dummy", 100, 80, "tap")]);
    session.party_mut().active_mut().take_damage(99);

    // Boss tap downs the weakened leader; the replacement takes the free
    // hit and survives, but the leader's queued pick dies with it, so the
    // newcomer does not act until next turn.
    let mut rng = TurnRng::new_for_test(vec![100, 100, 100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 0 }, &mut rng)
        .unwrap();

    assert!(bus.contains(&BattleEvent::Swapped {
        old_active: "Crunch Crab".to_string(),
        new_active: "Wafer Wisp".to_string(),
        forced: true,
    }));
    let replacement_moves = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::SkillUsed { actor, .. } if actor == "Wafer Wisp"))
        .count();
    assert_eq!(replacement_moves, 0);
    assert_eq!(session.party().active().name, "Wafer Wisp");
    assert_eq!(session.party().active().current_hp, 97);
    assert_eq!(session.opponent().current_hp, 100);
    assert_eq!(session.state(), BattleState::PlayerTurn);
    assert_eq!(session.turn_number(), 2);
}

#[test]
fn test_stale_pick_is_dropped_when_the_replacement_knows_fewer_skills() {
    let mut session =
        duo_session(&["tap", "cleanse"], vec![phase("Training Dummy", 100, 80, "tap")]);
    session.party_mut().active_mut().take_damage(99);
    session.party_mut().member_mut(1).unwrap().skills.truncate(1);

    // Skill index 1 is valid for the leader but out of range for the bench
    // member forced in after the knockout; the turn must still resolve
    // cleanly with the pick discarded.
    let mut rng = TurnRng::new_for_test(vec![100, 100, 100, 100]);
    let bus = session
        .resolve_turn(TurnAction::UseSkill { skill_index: 1 }, &mut rng)
        .unwrap();

    let player_moves = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::SkillUsed { actor, .. } if actor != "Training Dummy"))
        .count();
    assert_eq!(player_moves, 0);
    assert_eq!(session.party().active().name, "Wafer Wisp");
    assert_eq!(session.state(), BattleState::PlayerTurn);
}
