use tracing::debug;

use crate::battle::Side;
use crate::combatant::Combatant;
use crate::RandomSource;

/// Upper bound of the per-turn initiative jitter added to speed.
pub const PRIORITY_JITTER: i32 = 10;

/// Rank both sides for one turn. Rolled fresh every call, A first; ties go to A.
pub fn determine_turn_order(
    side_a: &Combatant,
    side_b: &Combatant,
    rng: &mut dyn RandomSource,
) -> [Side; 2] {
    let prio_a = side_a.stats().speed().saturating_add(rng.uniform_int(0, PRIORITY_JITTER));
    let prio_b = side_b.stats().speed().saturating_add(rng.uniform_int(0, PRIORITY_JITTER));
    let order = if prio_a >= prio_b {
        [Side::A, Side::B]
    } else {
        [Side::B, Side::A]
    };
    debug!(prio_a, prio_b, first = ?order[0], "turn order");
    order
}
