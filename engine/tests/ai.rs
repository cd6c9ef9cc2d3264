use engine::{
    ActionChoice, ActionKind, CombatError, Combatant, CombatantSnapshot, DecisionPolicy, Dice,
    OpponentAi, RandomPolicy, ScriptedDice, ScriptedPolicy, StatBlock,
};

fn snap(health: i32, max_health: i32) -> CombatantSnapshot {
    CombatantSnapshot {
        name: "X".to_string(),
        health,
        max_health,
        health_percent: 100.0 * health as f64 / max_health as f64,
        is_defending: false,
        special_cooldown: 0,
    }
}

fn pick(policy: &mut dyn DecisionPolicy, me: &CombatantSnapshot, roll: i32) -> ActionKind {
    let mut dice = ScriptedDice::new(vec![roll], vec![]);
    policy.choose_action(me, &snap(100, 100), &mut dice).unwrap().kind
}

#[test]
fn tier_is_clamped() {
    assert_eq!(OpponentAi::new(0).tier(), 1);
    assert_eq!(OpponentAi::new(2).tier(), 2);
    assert_eq!(OpponentAi::new(9).tier(), 3);
}

#[test]
fn weight_tables_sum_to_one_hundred() {
    for tier in 1..=3 {
        for hp in [100.0, 10.0] {
            let total: u32 = OpponentAi::new(tier).weights(hp).iter().map(|(_, w)| *w).sum();
            assert_eq!(total, 100);
        }
    }
}

#[test]
fn tier_two_draw_boundaries() {
    let mut ai = OpponentAi::new(2);
    let me = snap(80, 80);
    assert_eq!(pick(&mut ai, &me, 0), ActionKind::Attack);
    assert_eq!(pick(&mut ai, &me, 59), ActionKind::Attack);
    assert_eq!(pick(&mut ai, &me, 60), ActionKind::Defend);
    assert_eq!(pick(&mut ai, &me, 84), ActionKind::Defend);
    assert_eq!(pick(&mut ai, &me, 85), ActionKind::Special);
    assert_eq!(pick(&mut ai, &me, 99), ActionKind::Special);
}

#[test]
fn tier_one_never_uses_special() {
    let mut ai = OpponentAi::new(1);
    let me = snap(80, 80);
    let mut dice = Dice::from_seed(11);
    for _ in 0..500 {
        let choice = ai.choose_action(&me, &snap(100, 100), &mut dice).unwrap();
        assert_ne!(choice.kind, ActionKind::Special);
    }
}

#[test]
fn low_own_health_switches_to_even_attack_defend() {
    let mut ai = OpponentAi::new(3);
    let hurt = snap(20, 80);
    assert_eq!(pick(&mut ai, &hurt, 49), ActionKind::Attack);
    assert_eq!(pick(&mut ai, &hurt, 50), ActionKind::Defend);
    assert_eq!(pick(&mut ai, &hurt, 99), ActionKind::Defend);

    // Exactly 30% is not "below 30".
    let edge = snap(24, 80);
    assert_eq!(pick(&mut ai, &edge, 99), ActionKind::Special);
}

#[test]
fn override_ignores_the_targets_health() {
    let mut ai = OpponentAi::new(2);
    let mut dice = ScriptedDice::new(vec![90], vec![]);
    let choice = ai.choose_action(&snap(80, 80), &snap(5, 100), &mut dice).unwrap();
    assert_eq!(choice.kind, ActionKind::Special);
}

#[test]
fn combatant_feeds_its_own_health_to_the_ai() {
    let stats = StatBlock::new(80, 10, 12, 5, 9, 0.15).unwrap();
    let mut goblin = Combatant::opponent("Goblin", stats, 3);
    let mut dice = ScriptedDice::new(vec![99], vec![]);
    let choice = goblin.choose_action(&snap(100, 100), &mut dice).unwrap();
    assert_eq!(choice.kind, ActionKind::Defend);
}

#[test]
fn random_fallback_covers_attack_defend_special() {
    let mut policy = RandomPolicy;
    let me = snap(100, 100);
    assert_eq!(pick(&mut policy, &me, 0), ActionKind::Attack);
    assert_eq!(pick(&mut policy, &me, 1), ActionKind::Defend);
    assert_eq!(pick(&mut policy, &me, 2), ActionKind::Special);
}

#[test]
fn scripted_policy_cycles() {
    let mut policy = ScriptedPolicy::parse(["attack", " Defend "].as_slice()).unwrap();
    let me = snap(100, 100);
    let kinds: Vec<_> = (0..3).map(|_| pick(&mut policy, &me, 0)).collect();
    assert_eq!(kinds, vec![ActionKind::Attack, ActionKind::Defend, ActionKind::Attack]);
}

#[test]
fn unknown_action_names_are_unsupported() {
    let err = ScriptedPolicy::parse(["attack", "dance"].as_slice()).unwrap_err();
    assert_eq!(err, CombatError::UnsupportedAction("dance".to_string()));
    assert!("".parse::<ActionKind>().is_err());
    assert!(ScriptedPolicy::new(Vec::<ActionChoice>::new()).is_err());
}
