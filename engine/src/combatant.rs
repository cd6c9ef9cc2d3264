//! Combatants and the policies that pick their actions.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CombatError, Result};
use crate::stats::StatBlock;
use crate::RandomSource;

/// Health percentage below which the opponent AI turns cautious.
pub const LOW_HEALTH_PERCENT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Defend,
    Special,
    Item,
    Flee,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Attack,
        ActionKind::Defend,
        ActionKind::Special,
        ActionKind::Item,
        ActionKind::Flee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Special => "special",
            ActionKind::Item => "item",
            ActionKind::Flee => "flee",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ActionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| CombatError::UnsupportedAction(s.trim().to_string()))
    }
}

/// Extra arguments for an action. Every built-in policy leaves this empty.
pub type ActionParams = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionChoice {
    pub kind: ActionKind,
    #[serde(default)]
    pub params: ActionParams,
}

impl ActionChoice {
    pub fn new(kind: ActionKind) -> Self {
        Self { kind, params: ActionParams::new() }
    }
}

impl From<ActionKind> for ActionChoice {
    fn from(kind: ActionKind) -> Self {
        ActionChoice::new(kind)
    }
}

/// Read-only view of a combatant, as handed to policies and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub health_percent: f64,
    pub is_defending: bool,
    pub special_cooldown: i32,
}

/// Picks one action per turn. `me` is the acting side, `opponent` the other,
/// both as they stand after the turn reset.
pub trait DecisionPolicy: fmt::Debug {
    fn choose_action(
        &mut self,
        me: &CombatantSnapshot,
        opponent: &CombatantSnapshot,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice>;
}

/// Player fallback when no input collaborator is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl DecisionPolicy for RandomPolicy {
    fn choose_action(
        &mut self,
        _me: &CombatantSnapshot,
        _opponent: &CombatantSnapshot,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice> {
        const CHOICES: [ActionKind; 3] = [ActionKind::Attack, ActionKind::Defend, ActionKind::Special];
        let idx = rng.uniform_int(0, CHOICES.len() as i32 - 1) as usize;
        Ok(CHOICES[idx].into())
    }
}

/// Weighted-random opponent keyed by a difficulty tier in `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentAi {
    tier: u8,
}

impl OpponentAi {
    /// Out-of-range tiers are clamped, not rejected.
    pub fn new(tier: u8) -> Self {
        Self { tier: tier.clamp(1, 3) }
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// Relative weights the next draw uses. The low-health override looks at
    /// the AI's own health, not its target's.
    pub fn weights(&self, own_health_percent: f64) -> &'static [(ActionKind, u32)] {
        use ActionKind::*;
        if own_health_percent < LOW_HEALTH_PERCENT {
            return &[(Attack, 50), (Defend, 50)];
        }
        match self.tier {
            1 => &[(Attack, 70), (Defend, 30)],
            2 => &[(Attack, 60), (Defend, 25), (Special, 15)],
            _ => &[(Attack, 50), (Defend, 20), (Special, 30)],
        }
    }
}

impl DecisionPolicy for OpponentAi {
    fn choose_action(
        &mut self,
        me: &CombatantSnapshot,
        _opponent: &CombatantSnapshot,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice> {
        let table = self.weights(me.health_percent);
        Ok(weighted_pick(table, rng).into())
    }
}

fn weighted_pick(table: &[(ActionKind, u32)], rng: &mut dyn RandomSource) -> ActionKind {
    let total: u32 = table.iter().map(|(_, w)| *w).sum();
    let mut roll = rng.uniform_int(0, total as i32 - 1) as u32;
    for (kind, weight) in table {
        if roll < *weight {
            return *kind;
        }
        roll -= *weight;
    }
    table[table.len() - 1].0
}

/// Replays a fixed action list, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    actions: Vec<ActionChoice>,
    cursor: usize,
}

impl ScriptedPolicy {
    pub fn new(actions: Vec<ActionChoice>) -> Result<Self> {
        if actions.is_empty() {
            return Err(CombatError::InvalidConfiguration(
                "scripted policy needs at least one action".to_string(),
            ));
        }
        Ok(Self { actions, cursor: 0 })
    }

    pub fn from_kinds(kinds: &[ActionKind]) -> Result<Self> {
        Self::new(kinds.iter().copied().map(ActionChoice::new).collect())
    }

    /// Parse names such as `"attack"`; anything outside the action set fails.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let kinds = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<ActionKind>>>()?;
        Self::from_kinds(&kinds)
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn choose_action(
        &mut self,
        _me: &CombatantSnapshot,
        _opponent: &CombatantSnapshot,
        _rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice> {
        let choice = self.actions[self.cursor % self.actions.len()].clone();
        self.cursor += 1;
        Ok(choice)
    }
}

/// A named participant. Owns its stat block outright.
#[derive(Debug)]
pub struct Combatant {
    name: String,
    stats: StatBlock,
    is_defending: bool,
    policy: Box<dyn DecisionPolicy>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, stats: StatBlock, policy: Box<dyn DecisionPolicy>) -> Self {
        Self { name: name.into(), stats, is_defending: false, policy }
    }

    /// Player-side combatant using the uniform fallback policy.
    pub fn player(name: impl Into<String>, stats: StatBlock) -> Self {
        Self::new(name, stats, Box::new(RandomPolicy))
    }

    pub fn opponent(name: impl Into<String>, stats: StatBlock, tier: u8) -> Self {
        Self::new(name, stats, Box::new(OpponentAi::new(tier)))
    }

    pub fn with_policy(mut self, policy: Box<dyn DecisionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    pub fn defend(&mut self) {
        self.is_defending = true;
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Start-of-turn housekeeping: drop the stance, count down the cooldown.
    pub fn reset_turn(&mut self) {
        self.is_defending = false;
        self.stats.tick_cooldown();
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            health: self.stats.current_health(),
            max_health: self.stats.max_health(),
            health_percent: self.stats.health_percent(),
            is_defending: self.is_defending,
            special_cooldown: self.stats.special_cooldown(),
        }
    }

    pub fn choose_action(
        &mut self,
        opponent: &CombatantSnapshot,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice> {
        let me = self.snapshot();
        self.policy.choose_action(&me, opponent, rng)
    }
}
