use serde::{Deserialize, Serialize};

use crate::error::{CombatError, Result};

pub const DEFAULT_CRITICAL_CHANCE: f64 = 0.15;

/// Mutable numeric state of one combatant.
///
/// Fields are private so the health and chance invariants can only be broken
/// through [`StatBlock::new`], which rejects bad input instead of clamping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatBlockSpec", into = "StatBlockSpec")]
pub struct StatBlock {
    max_health: i32,
    current_health: i32,
    attack_power: i32,
    defense: i32,
    speed: i32,
    critical_chance: f64,
    special_cooldown: i32,
}

/// Wire shape of a stat block; `current_health` defaults to full.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatBlockSpec {
    pub max_health: i32,
    #[serde(default)]
    pub current_health: Option<i32>,
    pub attack_power: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(default = "default_critical_chance")]
    pub critical_chance: f64,
    #[serde(default)]
    pub special_cooldown: i32,
}

fn default_critical_chance() -> f64 {
    DEFAULT_CRITICAL_CHANCE
}

impl TryFrom<StatBlockSpec> for StatBlock {
    type Error = CombatError;

    fn try_from(spec: StatBlockSpec) -> Result<Self> {
        StatBlock::new(
            spec.max_health,
            spec.current_health.unwrap_or(spec.max_health),
            spec.attack_power,
            spec.defense,
            spec.speed,
            spec.critical_chance,
        )?
        .with_special_cooldown(spec.special_cooldown)
    }
}

impl From<StatBlock> for StatBlockSpec {
    fn from(s: StatBlock) -> Self {
        Self {
            max_health: s.max_health,
            current_health: Some(s.current_health),
            attack_power: s.attack_power,
            defense: s.defense,
            speed: s.speed,
            critical_chance: s.critical_chance,
            special_cooldown: s.special_cooldown,
        }
    }
}

impl StatBlock {
    pub fn new(
        max_health: i32,
        current_health: i32,
        attack_power: i32,
        defense: i32,
        speed: i32,
        critical_chance: f64,
    ) -> Result<Self> {
        if max_health <= 0 {
            return Err(invalid(format!("max_health must be > 0, got {max_health}")));
        }
        if !(0..=max_health).contains(&current_health) {
            return Err(invalid(format!(
                "current_health {current_health} outside [0, {max_health}]"
            )));
        }
        for (label, value) in [("attack_power", attack_power), ("defense", defense), ("speed", speed)] {
            if value < 0 {
                return Err(invalid(format!("{label} must be >= 0, got {value}")));
            }
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&critical_chance) {
            return Err(invalid(format!(
                "critical_chance {critical_chance} outside [0, 1]"
            )));
        }
        Ok(Self {
            max_health,
            current_health,
            attack_power,
            defense,
            speed,
            critical_chance,
            special_cooldown: 0,
        })
    }

    /// Full health, default critical chance.
    pub fn full(max_health: i32, attack_power: i32, defense: i32, speed: i32) -> Result<Self> {
        Self::new(max_health, max_health, attack_power, defense, speed, DEFAULT_CRITICAL_CHANCE)
    }

    pub fn with_special_cooldown(mut self, turns: i32) -> Result<Self> {
        if turns < 0 {
            return Err(invalid(format!("special_cooldown must be >= 0, got {turns}")));
        }
        self.special_cooldown = turns;
        Ok(self)
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn critical_chance(&self) -> f64 {
        self.critical_chance
    }

    pub fn special_cooldown(&self) -> i32 {
        self.special_cooldown
    }

    /// Apply mitigated damage and return what was actually taken.
    /// Always at least 1, even against very high defense.
    pub fn apply_damage(&mut self, raw: i32) -> i32 {
        let actual = raw.saturating_sub(self.defense.div_euclid(3)).max(1);
        self.current_health = (self.current_health - actual).max(0);
        actual
    }

    /// Heal up to `max_health`; returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.min(self.max_health - self.current_health).max(0);
        self.current_health += actual;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn health_percent(&self) -> f64 {
        100.0 * self.current_health as f64 / self.max_health as f64
    }

    pub fn is_special_ready(&self) -> bool {
        self.special_cooldown == 0
    }

    pub(crate) fn start_special_cooldown(&mut self, turns: i32) {
        self.special_cooldown = turns;
    }

    /// Count one turn off the special cooldown; never goes below zero.
    pub fn tick_cooldown(&mut self) {
        if self.special_cooldown > 0 {
            self.special_cooldown -= 1;
        }
    }
}

fn invalid(msg: String) -> CombatError {
    CombatError::InvalidConfiguration(msg)
}
