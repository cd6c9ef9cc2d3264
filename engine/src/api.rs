use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::battle::{Battle, BattleStatus, Side};
use crate::combatant::{Combatant, DecisionPolicy, OpponentAi, RandomPolicy, ScriptedPolicy};
use crate::content::{builtin_battles, builtin_combatants};
use crate::stats::StatBlock;
use crate::Dice;

pub const DEFAULT_MAX_TURNS: u32 = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerConfig {
    #[default]
    Random,
    Ai { tier: u8 },
    Scripted { actions: Vec<String> },
}

impl ControllerConfig {
    pub fn build(&self) -> crate::error::Result<Box<dyn DecisionPolicy>> {
        let policy: Box<dyn DecisionPolicy> = match self {
            ControllerConfig::Random => Box::new(RandomPolicy),
            ControllerConfig::Ai { tier } => Box::new(OpponentAi::new(*tier)),
            ControllerConfig::Scripted { actions } => {
                Box::new(ScriptedPolicy::parse(actions.as_slice())?)
            }
        };
        Ok(policy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CombatantConfig {
    pub name: String,
    pub stats: StatBlock,
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl CombatantConfig {
    pub fn build(&self) -> crate::error::Result<Combatant> {
        Ok(Combatant::new(self.name.clone(), self.stats.clone(), self.controller.build()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    pub side_a: CombatantConfig,
    pub side_b: CombatantConfig,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl BattleConfig {
    pub fn build(&self) -> Result<Battle<Dice>> {
        let side_a = self.side_a.build().context("side_a")?;
        let side_b = self.side_b.build().context("side_b")?;
        Ok(Battle::new(side_a, side_b, Dice::from_seed(self.seed))?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleOutcome {
    pub winner: Option<Side>,
    pub winner_name: Option<String>,
    pub turns: u32,
    pub side_a_health_end: i32,
    pub side_b_health_end: i32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleStats {
    pub samples: u32,
    pub side_a_wins: u32,
    pub side_b_wins: u32,
    pub unresolved: u32,
    pub avg_turns: f64,
    pub min_turns: u32,
    pub max_turns: u32,
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<BattleOutcome> {
    let mut battle = cfg.build()?;
    let status = battle.run_to_end(cfg.max_turns)?;
    if status == BattleStatus::InProgress {
        warn!(max_turns = cfg.max_turns, "battle hit the turn cap without a winner");
    }

    let winner = status.winner();
    Ok(BattleOutcome {
        winner,
        winner_name: winner.map(|side| battle.combatant(side).name().to_string()),
        turns: battle.turn_count(),
        side_a_health_end: battle.combatant(Side::A).stats().current_health(),
        side_b_health_end: battle.combatant(Side::B).stats().current_health(),
        log: battle.log().entries().to_vec(),
    })
}

/// Run `samples` battles; sample `i` uses `seed + i`.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<BattleStats> {
    if samples == 0 {
        bail!("samples must be > 0");
    }
    let mut stats = BattleStats {
        samples,
        side_a_wins: 0,
        side_b_wins: 0,
        unresolved: 0,
        avg_turns: 0.0,
        min_turns: u32::MAX,
        max_turns: 0,
    };
    let mut total_turns = 0u64;

    for i in 0..samples {
        let mut run = cfg.clone();
        run.seed = cfg.seed.wrapping_add(i as u64);
        let outcome = simulate_battle(run)?;
        match outcome.winner {
            Some(Side::A) => stats.side_a_wins += 1,
            Some(Side::B) => stats.side_b_wins += 1,
            None => stats.unresolved += 1,
        }
        total_turns += outcome.turns as u64;
        stats.min_turns = stats.min_turns.min(outcome.turns);
        stats.max_turns = stats.max_turns.max(outcome.turns);
    }

    stats.avg_turns = total_turns as f64 / samples as f64;
    Ok(stats)
}

/// Load a battle from disk; `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_battle_config(path: impl AsRef<Path>) -> Result<BattleConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read battle config: {}", path.display()))?;
    parse_battle_config(&text, ConfigFormat::from_path(path))
        .with_context(|| format!("failed to load battle config: {}", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

pub fn parse_battle_config(text: &str, format: ConfigFormat) -> Result<BattleConfig> {
    let cfg = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text).context("failed to parse battle YAML")?,
        ConfigFormat::Json => serde_json::from_str(text).context("failed to parse battle JSON")?,
    };
    Ok(cfg)
}

pub fn builtin_battle(id: &str) -> Result<BattleConfig> {
    let text = builtin_battles()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("unknown builtin battle '{}'", id))?;
    parse_battle_config(text, ConfigFormat::Yaml)
        .with_context(|| format!("builtin battle '{}' is malformed", id))
}

pub fn builtin_combatant(id: &str) -> Result<CombatantConfig> {
    let text = builtin_combatants()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("unknown builtin combatant '{}'", id))?;
    serde_json::from_str(text).with_context(|| format!("builtin combatant '{}' is malformed", id))
}

/// Pair two builtin combatants into a battle.
pub fn builtin_matchup(side_a: &str, side_b: &str, seed: u64) -> Result<BattleConfig> {
    Ok(BattleConfig {
        side_a: builtin_combatant(side_a)?,
        side_b: builtin_combatant(side_b)?,
        seed,
        max_turns: DEFAULT_MAX_TURNS,
    })
}
