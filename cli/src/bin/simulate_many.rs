use std::path::PathBuf;

use clap::Parser;
use cli::{init_tracing, resolve_config};
use engine::api::{builtin_matchup, simulate_battle_many};

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many battles from one config")]
struct Args {
    /// Battle config file (JSON, or YAML by extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Builtin battle id
    #[arg(long)]
    battle: Option<String>,

    /// Builtin combatant for side A (needs --opponent)
    #[arg(long, requires = "opponent")]
    player: Option<String>,

    /// Builtin combatant for side B
    #[arg(long, requires = "player")]
    opponent: Option<String>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Safety cap on turns per trial
    #[arg(long)]
    max_turns: Option<u32>,

    /// Emit the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = match (&args.player, &args.opponent) {
        (Some(a), Some(b)) => builtin_matchup(a, b, args.seed)?,
        _ => resolve_config(args.config.as_deref(), args.battle.as_deref())?,
    };
    cfg.seed = args.seed;
    if let Some(cap) = args.max_turns {
        cfg.max_turns = cap;
    }
    let side_a = cfg.side_a.name.clone();
    let side_b = cfg.side_b.name.clone();

    tracing::info!(trials = args.trials, seed = cfg.seed, "running simulation");
    let stats = simulate_battle_many(cfg, args.trials)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let pct = |n: u32| 100.0 * n as f64 / stats.samples as f64;
    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", stats.samples);
    println!("matchup:            {} vs {}", side_a, side_b);
    println!();
    println!("{:<20}{:.1}%", format!("{} wins:", side_a), pct(stats.side_a_wins));
    println!("{:<20}{:.1}%", format!("{} wins:", side_b), pct(stats.side_b_wins));
    println!("unresolved:         {:.1}%", pct(stats.unresolved));
    println!("avg turns:          {:.2}", stats.avg_turns);
    println!("turn range:         {}..={}", stats.min_turns, stats.max_turns);

    Ok(())
}
