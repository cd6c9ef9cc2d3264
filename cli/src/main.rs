use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::input::PromptPolicy;
use cli::{init_tracing, render, resolve_config};
use engine::BattleStatus;

#[derive(Subcommand)]
enum Cmd {
    /// Fight one battle turn by turn
    Fight {
        /// Battle config file (JSON, or YAML by extension)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Builtin battle id (ignored when --config is given)
        #[arg(long)]
        battle: Option<String>,
        /// Override the config's RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Let side A's configured controller play instead of prompting
        #[arg(long, default_value_t = false)]
        auto: bool,
    },
    /// Print a battle config as JSON
    Dump {
        #[arg(long, default_value = "hero_vs_goblin")]
        battle: String,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// List builtin battles and combatants
    List,
}

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Turn-based duel harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Fight { config, battle, seed, auto } => {
            let mut cfg = resolve_config(config.as_deref(), battle.as_deref())?;
            if let Some(seed) = seed {
                cfg.seed = seed;
            }
            fight(cfg, auto)?;
        }
        Cmd::Dump { battle, pretty } => {
            let cfg = resolve_config(None, Some(&battle))?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", serde_json::to_string(&cfg)?);
            }
        }
        Cmd::List => {
            let mut battles: Vec<_> = engine::content::builtin_battles().into_keys().collect();
            battles.sort_unstable();
            let mut combatants: Vec<_> = engine::content::builtin_combatants().into_keys().collect();
            combatants.sort_unstable();
            println!("battles:    {}", battles.join(", "));
            println!("combatants: {}", combatants.join(", "));
        }
    }
    Ok(())
}

fn fight(cfg: engine::api::BattleConfig, auto: bool) -> anyhow::Result<()> {
    let max_turns = cfg.max_turns;
    tracing::info!(seed = cfg.seed, auto, "starting fight");
    let side_a = cfg.side_a.build()?;
    let side_a = if auto {
        side_a
    } else {
        side_a.with_policy(Box::new(PromptPolicy::new(std::io::stdin().lock())))
    };
    let mut battle =
        engine::Battle::new(side_a, cfg.side_b.build()?, engine::Dice::from_seed(cfg.seed))?;

    println!(
        "{}\n",
        render::banner(&format!("BATTLE START: {} vs {}", cfg.side_a.name, cfg.side_b.name))
    );
    while battle.status() == BattleStatus::InProgress && battle.turn_count() < max_turns {
        let report = battle.execute_turn()?;
        println!("{}", render::turn(&report));
    }

    match battle.result() {
        Ok(result) => {
            println!("{}", render::banner(&format!("{} WINS!", result.winner_name)));
            println!("turns: {}", result.turns);
        }
        Err(_) => println!("{}", render::banner(&format!("NO WINNER AFTER {} TURNS", max_turns))),
    }

    println!("\n--- Combat Log ---");
    for entry in battle.log().entries() {
        println!("• {}", entry);
    }
    Ok(())
}
