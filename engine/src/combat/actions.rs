use tracing::debug;

use crate::combatant::{ActionChoice, ActionKind, Combatant};
use crate::RandomSource;

/// Turns a special attack stays locked after use.
pub const SPECIAL_COOLDOWN_TURNS: i32 = 3;
/// Attack roll spread around `attack_power`.
pub const ATTACK_JITTER: i32 = 5;
/// Upper bound of the bonus rolled on a special attack.
pub const SPECIAL_BONUS_MAX: i32 = 10;

/// What one resolved action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub damage: i32,
    pub critical: bool,
    pub target_defeated: bool,
    pub entry: String,
}

impl ActionOutcome {
    fn passive(kind: ActionKind, target: &Combatant, entry: String) -> Self {
        Self { kind, damage: 0, critical: false, target_defeated: !target.is_alive(), entry }
    }
}

/// Apply `choice` from `actor` against `target`. The caller stops the turn
/// when `target_defeated` comes back true.
pub fn resolve_action(
    actor: &mut Combatant,
    target: &mut Combatant,
    choice: &ActionChoice,
    rng: &mut dyn RandomSource,
) -> ActionOutcome {
    let outcome = match choice.kind {
        ActionKind::Attack => attack(actor, target, rng),
        ActionKind::Special => special_attack(actor, target, rng),
        ActionKind::Defend => {
            actor.defend();
            let entry = format!("{} takes a defensive stance!", actor.name());
            ActionOutcome::passive(ActionKind::Defend, target, entry)
        }
        ActionKind::Item => {
            let entry = format!("{} uses an item!", actor.name());
            ActionOutcome::passive(ActionKind::Item, target, entry)
        }
        // Logged only; fleeing has no mechanical effect yet.
        ActionKind::Flee => {
            let entry = format!("{} attempts to flee!", actor.name());
            ActionOutcome::passive(ActionKind::Flee, target, entry)
        }
    };
    debug!(
        actor = actor.name(),
        target = target.name(),
        kind = %outcome.kind,
        damage = outcome.damage,
        critical = outcome.critical,
        "action resolved"
    );
    outcome
}

fn attack(actor: &Combatant, target: &mut Combatant, rng: &mut dyn RandomSource) -> ActionOutcome {
    let stats = actor.stats();
    let mut base = i64::from(stats.attack_power())
        + i64::from(rng.uniform_int(-ATTACK_JITTER, ATTACK_JITTER));
    let critical = rng.uniform_real() < stats.critical_chance();
    if critical {
        base = base * 3 / 2;
    }
    // Stance mitigation lands on the already-rounded crit value.
    if target.is_defending() {
        base = base * 6 / 10;
    }
    let damage = target.stats_mut().apply_damage(saturate(base));
    let entry = format!(
        "{} attacks {} for {} damage{}",
        actor.name(),
        target.name(),
        damage,
        if critical { " (CRITICAL HIT!)" } else { "" }
    );
    ActionOutcome {
        kind: ActionKind::Attack,
        damage,
        critical,
        target_defeated: !target.is_alive(),
        entry,
    }
}

/// Ignores the defensive stance on purpose.
fn special_attack(
    actor: &mut Combatant,
    target: &mut Combatant,
    rng: &mut dyn RandomSource,
) -> ActionOutcome {
    if !actor.stats().is_special_ready() {
        let entry = format!("{}'s special move is still on cooldown!", actor.name());
        return ActionOutcome::passive(ActionKind::Special, target, entry);
    }

    let stats = actor.stats();
    let mut base = i64::from(stats.attack_power()) * 9 / 5
        + i64::from(rng.uniform_int(0, SPECIAL_BONUS_MAX));
    let critical = rng.uniform_real() < stats.critical_chance() * 1.5;
    if critical {
        base = base * 3 / 2;
    }
    let damage = target.stats_mut().apply_damage(saturate(base));
    actor.stats_mut().start_special_cooldown(SPECIAL_COOLDOWN_TURNS);

    let entry = format!(
        "{} uses SPECIAL ATTACK on {} for {} damage{}",
        actor.name(),
        target.name(),
        damage,
        if critical { " (CRITICAL!)" } else { "" }
    );
    ActionOutcome {
        kind: ActionKind::Special,
        damage,
        critical,
        target_defeated: !target.is_alive(),
        entry,
    }
}

/// Rolls are widened to i64 so huge stats cannot overflow mid-formula.
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
