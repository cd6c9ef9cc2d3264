use engine::api::{
    builtin_battle, builtin_combatant, builtin_matchup, simulate_battle, simulate_battle_many,
    ControllerConfig,
};
use engine::content::builtin_battles;
use engine::Side;

#[test]
fn every_builtin_battle_parses() {
    for id in builtin_battles().keys() {
        builtin_battle(id).unwrap();
    }
}

#[test]
fn canonical_matchup_matches_reference_stats() {
    let cfg = builtin_battle("hero_vs_goblin").unwrap();
    assert_eq!(cfg.side_a.name, "Hero");
    assert_eq!(cfg.side_a.stats.max_health(), 100);
    assert_eq!(cfg.side_b.stats.defense(), 5);
    assert_eq!(cfg.side_b.controller, ControllerConfig::Ai { tier: 2 });
}

#[test]
fn builtin_battle_runs_to_a_winner() {
    let cfg = builtin_battle("hero_vs_goblin").unwrap();
    let out = simulate_battle(cfg).unwrap();
    assert!(out.turns > 0);
    let winner = out.winner.expect("a side should win well inside the turn cap");
    let loser_health = match winner {
        Side::A => out.side_b_health_end,
        Side::B => out.side_a_health_end,
    };
    assert_eq!(loser_health, 0);
    assert!(out.log.last().unwrap().starts_with("BATTLE "));
}

#[test]
fn many_battles_tally_up() {
    let cfg = builtin_matchup("hero", "orc_brute", 1).unwrap();
    let stats = simulate_battle_many(cfg, 40).unwrap();
    assert_eq!(stats.samples, 40);
    assert_eq!(stats.side_a_wins + stats.side_b_wins + stats.unresolved, 40);
    assert!(stats.min_turns <= stats.max_turns);
    assert!(stats.avg_turns >= stats.min_turns as f64);
}

#[test]
fn unknown_builtins_are_errors() {
    assert!(builtin_battle("dragon_lair").is_err());
    assert!(builtin_combatant("dragon").is_err());
    assert!(simulate_battle_many(builtin_battle("hero_vs_goblin").unwrap(), 0).is_err());
}
