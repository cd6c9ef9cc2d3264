//! The battle state machine: reset, choose, order, resolve, check, repeat.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::actions::resolve_action;
use crate::combat::turn_order::determine_turn_order;
use crate::combatant::{ActionChoice, Combatant, CombatantSnapshot};
use crate::error::{CombatError, Result};
use crate::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    InProgress,
    SideAWon,
    SideBWon,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleStatus::InProgress)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattleStatus::InProgress => None,
            BattleStatus::SideAWon => Some(Side::A),
            BattleStatus::SideBWon => Some(Side::B),
        }
    }

    fn won_by(side: Side) -> Self {
        match side {
            Side::A => BattleStatus::SideAWon,
            Side::B => BattleStatus::SideBWon,
        }
    }
}

/// Append-only record of everything that happened in a battle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombatLog {
    entries: Vec<String>,
}

impl CombatLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn since(&self, start: usize) -> &[String] {
        &self.entries[start.min(self.entries.len())..]
    }
}

/// Handed to the presentation layer after every turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub side_a: CombatantSnapshot,
    pub side_b: CombatantSnapshot,
    pub new_entries: Vec<String>,
    pub status: BattleStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleResult {
    pub winner: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub turns: u32,
}

pub struct Battle<R> {
    side_a: Combatant,
    side_b: Combatant,
    rng: R,
    turn_count: u32,
    log: CombatLog,
    status: BattleStatus,
}

impl<R: RandomSource> Battle<R> {
    /// Both sides must be alive; a battle never starts already decided.
    pub fn new(side_a: Combatant, side_b: Combatant, rng: R) -> Result<Self> {
        for c in [&side_a, &side_b] {
            if !c.is_alive() {
                return Err(CombatError::InvalidConfiguration(format!(
                    "{} cannot enter a battle with 0 health",
                    c.name()
                )));
            }
        }
        info!(side_a = side_a.name(), side_b = side_b.name(), "battle start");
        Ok(Self {
            side_a,
            side_b,
            rng,
            turn_count: 0,
            log: CombatLog::default(),
            status: BattleStatus::InProgress,
        })
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn snapshot(&self, side: Side) -> CombatantSnapshot {
        self.combatant(side).snapshot()
    }

    /// Run one turn with both sides choosing through their own policies.
    pub fn execute_turn(&mut self) -> Result<TurnReport> {
        self.execute_turn_with(None)
    }

    /// Run one turn. `side_a_choice`, when given, replaces side A's policy for
    /// this turn only; this is where a UI feeds the player's pick in.
    pub fn execute_turn_with(&mut self, side_a_choice: Option<ActionChoice>) -> Result<TurnReport> {
        if self.status.is_terminal() {
            return Err(CombatError::InvalidState(format!(
                "battle already finished ({:?}) after {} turns",
                self.status, self.turn_count
            )));
        }

        let log_start = self.log.len();
        self.turn_count += 1;
        self.side_a.reset_turn();
        self.side_b.reset_turn();

        let choice_a = match side_a_choice {
            Some(choice) => choice,
            None => {
                let opp = self.side_b.snapshot();
                self.side_a.choose_action(&opp, &mut self.rng)?
            }
        };
        let opp = self.side_a.snapshot();
        let choice_b = self.side_b.choose_action(&opp, &mut self.rng)?;

        let order = determine_turn_order(&self.side_a, &self.side_b, &mut self.rng);
        debug!(turn = self.turn_count, a = %choice_a.kind, b = %choice_b.kind, "actions chosen");

        for side in order {
            let choice = match side {
                Side::A => &choice_a,
                Side::B => &choice_b,
            };
            let (actor, target) = match side {
                Side::A => (&mut self.side_a, &mut self.side_b),
                Side::B => (&mut self.side_b, &mut self.side_a),
            };
            let outcome = resolve_action(actor, target, choice, &mut self.rng);
            self.log.push(outcome.entry);
            if outcome.target_defeated {
                self.finish(side);
                break;
            }
        }

        Ok(TurnReport {
            turn: self.turn_count,
            side_a: self.side_a.snapshot(),
            side_b: self.side_b.snapshot(),
            new_entries: self.log.since(log_start).to_vec(),
            status: self.status,
        })
    }

    /// Drive turns until the battle ends or `max_turns` total turns have run.
    /// Returns the final status, which is still `InProgress` if the cap hit.
    pub fn run_to_end(&mut self, max_turns: u32) -> Result<BattleStatus> {
        while !self.status.is_terminal() && self.turn_count < max_turns {
            self.execute_turn()?;
        }
        Ok(self.status)
    }

    pub fn result(&self) -> Result<BattleResult> {
        let winner = self.status.winner().ok_or_else(|| {
            CombatError::InvalidState("battle is still in progress".to_string())
        })?;
        Ok(BattleResult {
            winner,
            winner_name: self.combatant(winner).name().to_string(),
            loser_name: self.combatant(winner.other()).name().to_string(),
            turns: self.turn_count,
        })
    }

    fn finish(&mut self, winner: Side) {
        self.status = BattleStatus::won_by(winner);
        let entry = match winner {
            Side::A => format!("BATTLE WON: {} defeated {}", self.side_a.name(), self.side_b.name()),
            Side::B => format!("BATTLE LOST: {} defeated {}", self.side_b.name(), self.side_a.name()),
        };
        self.log.push(entry);
        info!(winner = self.combatant(winner).name(), turns = self.turn_count, "battle over");
    }
}
