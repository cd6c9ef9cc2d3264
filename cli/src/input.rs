//! Stdin-backed player controller.

use std::io::{BufRead, Write};

use engine::error::Result;
use engine::{ActionChoice, ActionKind, CombatantSnapshot, DecisionPolicy, RandomSource};

use crate::render;

/// Reads the player's pick from a line-oriented reader. Accepts a menu number
/// or an action name. The cooldown is shown but not enforced here.
pub struct PromptPolicy<R> {
    reader: R,
}

impl<R> std::fmt::Debug for PromptPolicy<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptPolicy").finish_non_exhaustive()
    }
}

impl<R: BufRead> PromptPolicy<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

pub fn parse_choice(line: &str) -> Result<ActionKind> {
    let trimmed = line.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        if (1..=ActionKind::ALL.len()).contains(&n) {
            return Ok(ActionKind::ALL[n - 1]);
        }
    }
    trimmed.parse()
}

impl<R: BufRead> DecisionPolicy for PromptPolicy<R> {
    fn choose_action(
        &mut self,
        me: &CombatantSnapshot,
        _opponent: &CombatantSnapshot,
        _rng: &mut dyn RandomSource,
    ) -> Result<ActionChoice> {
        loop {
            print!("{}> ", render::action_menu(me));
            std::io::stdout().flush().ok();

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                // Input closed: treat as a plain attack so the battle can finish.
                Ok(0) => return Ok(ActionKind::Attack.into()),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable player input; falling back to attack");
                    return Ok(ActionKind::Attack.into());
                }
            }
            match parse_choice(&line) {
                Ok(kind) => return Ok(kind.into()),
                Err(e) => println!("{e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_names_both_parse() {
        assert_eq!(parse_choice("1").unwrap(), ActionKind::Attack);
        assert_eq!(parse_choice(" 3 \n").unwrap(), ActionKind::Special);
        assert_eq!(parse_choice("flee").unwrap(), ActionKind::Flee);
        assert!(parse_choice("9").is_err());
        assert!(parse_choice("dance").is_err());
    }

    #[test]
    fn reads_until_a_valid_choice() {
        let input = std::io::Cursor::new("nope\n2\n");
        let mut policy = PromptPolicy::new(input);
        let me = CombatantSnapshot {
            name: "Hero".into(),
            health: 10,
            max_health: 10,
            health_percent: 100.0,
            is_defending: false,
            special_cooldown: 0,
        };
        let mut dice = engine::ScriptedDice::midpoint();
        let choice = policy.choose_action(&me, &me.clone(), &mut dice).unwrap();
        assert_eq!(choice.kind, ActionKind::Defend);
    }

    #[test]
    fn unreadable_input_falls_back_to_attack() {
        let input = std::io::Cursor::new(vec![0xff, 0xfe, b'\n']);
        let mut policy = PromptPolicy::new(input);
        let me = CombatantSnapshot {
            name: "Hero".into(),
            health: 10,
            max_health: 10,
            health_percent: 100.0,
            is_defending: false,
            special_cooldown: 0,
        };
        let mut dice = engine::ScriptedDice::midpoint();
        let choice = policy.choose_action(&me, &me.clone(), &mut dice).unwrap();
        assert_eq!(choice.kind, ActionKind::Attack);
    }
}
