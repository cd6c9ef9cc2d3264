use engine::{CombatError, StatBlock};

#[test]
fn damage_is_mitigated_by_a_third_of_defense() {
    let mut s = StatBlock::full(80, 12, 5, 9).unwrap();
    let taken = s.apply_damage(15);
    assert_eq!(taken, 14);
    assert_eq!(s.current_health(), 66);
}

#[test]
fn damage_never_drops_below_one() {
    let mut s = StatBlock::full(50, 0, 300, 0).unwrap();
    assert_eq!(s.apply_damage(10), 1);
    assert_eq!(s.apply_damage(0), 1);
    assert_eq!(s.apply_damage(-7), 1);
    assert_eq!(s.current_health(), 47);
}

#[test]
fn health_floors_at_zero() {
    let mut s = StatBlock::full(10, 0, 0, 0).unwrap();
    assert_eq!(s.apply_damage(25), 25);
    assert_eq!(s.current_health(), 0);
    assert!(!s.is_alive());
}

#[test]
fn heal_stops_at_max_health() {
    let mut s = StatBlock::new(100, 90, 10, 0, 0, 0.15).unwrap();
    assert_eq!(s.heal(25), 10);
    assert_eq!(s.current_health(), 100);
    assert_eq!(s.heal(5), 0);
}

#[test]
fn health_percent_is_relative_to_max() {
    let s = StatBlock::new(80, 20, 0, 0, 0, 0.15).unwrap();
    assert!((s.health_percent() - 25.0).abs() < f64::EPSILON);
}

#[test]
fn cooldown_ticks_down_to_zero_and_stops() {
    let mut s = StatBlock::full(10, 1, 1, 1).unwrap().with_special_cooldown(2).unwrap();
    s.tick_cooldown();
    assert_eq!(s.special_cooldown(), 1);
    s.tick_cooldown();
    s.tick_cooldown();
    assert_eq!(s.special_cooldown(), 0);
    assert!(s.is_special_ready());
}

#[test]
fn malformed_blocks_are_rejected_not_clamped() {
    let cases = [
        StatBlock::new(0, 0, 1, 1, 1, 0.1),
        StatBlock::new(10, 11, 1, 1, 1, 0.1),
        StatBlock::new(10, -1, 1, 1, 1, 0.1),
        StatBlock::new(10, 10, -1, 1, 1, 0.1),
        StatBlock::new(10, 10, 1, -1, 1, 0.1),
        StatBlock::new(10, 10, 1, 1, -1, 0.1),
        StatBlock::new(10, 10, 1, 1, 1, 1.5),
        StatBlock::new(10, 10, 1, 1, 1, -0.1),
        StatBlock::new(10, 10, 1, 1, 1, f64::NAN),
    ];
    for case in cases {
        assert!(matches!(case, Err(CombatError::InvalidConfiguration(_))));
    }
    assert!(StatBlock::full(10, 1, 1, 1).unwrap().with_special_cooldown(-1).is_err());
}

#[test]
fn deserialization_goes_through_validation() {
    let ok: StatBlock = serde_json::from_str(
        r#"{"max_health": 80, "attack_power": 12, "defense": 5, "speed": 9}"#,
    )
    .unwrap();
    assert_eq!(ok.current_health(), 80);
    assert!((ok.critical_chance() - 0.15).abs() < f64::EPSILON);

    let bad = serde_json::from_str::<StatBlock>(
        r#"{"max_health": 80, "current_health": 81, "attack_power": 12, "defense": 5, "speed": 9}"#,
    );
    let msg = bad.unwrap_err().to_string();
    assert!(msg.contains("invalid configuration"), "{msg}");
}
