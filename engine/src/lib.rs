use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod error;
pub mod stats;

pub use battle::{Battle, BattleResult, BattleStatus, CombatLog, Side, TurnReport};
pub use combat::actions::{resolve_action, ActionOutcome};
pub use combat::turn_order::determine_turn_order;
pub use combatant::{
    ActionChoice, ActionKind, ActionParams, Combatant, CombatantSnapshot, DecisionPolicy,
    OpponentAi, RandomPolicy, ScriptedPolicy,
};
pub use error::CombatError;
pub use stats::StatBlock;

/// Source of randomness threaded through every roll the engine makes.
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`.
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;
    /// Uniform real in `[0, 1)`.
    fn uniform_real(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).uniform_int(lo, hi)
    }

    fn uniform_real(&mut self) -> f64 {
        (**self).uniform_real()
    }
}

/// Seeded dice; the same seed always yields the same battle.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for Dice {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn uniform_real(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays queued values. Once a queue runs dry, integers fall back to the
/// midpoint of the requested range and reals to `fallback_real`.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    ints: VecDeque<i32>,
    reals: VecDeque<f64>,
    fallback_real: f64,
}

impl ScriptedDice {
    pub fn new(ints: Vec<i32>, reals: Vec<f64>) -> Self {
        Self { ints: ints.into(), reals: reals.into(), fallback_real: 0.99 }
    }

    /// Always the midpoint, never a critical hit.
    pub fn midpoint() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn with_fallback_real(mut self, real: f64) -> Self {
        self.fallback_real = real;
        self
    }
}

impl RandomSource for ScriptedDice {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        // Scripted values are clamped so callers never see an out-of-range roll.
        match self.ints.pop_front() {
            Some(v) => v.clamp(lo, hi.max(lo)),
            None => lo + (hi - lo) / 2,
        }
    }

    fn uniform_real(&mut self) -> f64 {
        self.reals.pop_front().unwrap_or(self.fallback_real)
    }
}
