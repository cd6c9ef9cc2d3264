//! Console rendering of battle state; the engine never prints.

use engine::{ActionKind, CombatantSnapshot, TurnReport};

const BAR_WIDTH: usize = 10;

/// `[██████░░░░] 60/100 HP [DEFENDING] [SPECIAL: 2]`
pub fn status_line(c: &CombatantSnapshot) -> String {
    let filled = ((c.health_percent / 10.0) as usize).min(BAR_WIDTH);
    let mut line = format!(
        "[{}{}] {}/{} HP",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        c.health,
        c.max_health
    );
    if c.is_defending {
        line.push_str(" [DEFENDING]");
    }
    if c.special_cooldown > 0 {
        line.push_str(&format!(" [SPECIAL: {}]", c.special_cooldown));
    }
    line
}

pub fn turn(report: &TurnReport) -> String {
    let rule = "=".repeat(50);
    let mut out = format!("{rule}\nTURN {}\n{rule}\n", report.turn);
    for entry in &report.new_entries {
        out.push_str(&format!("  → {}\n", entry));
    }
    out.push_str(&format!("{}: {}\n", report.side_a.name, status_line(&report.side_a)));
    out.push_str(&format!("{}: {}\n", report.side_b.name, status_line(&report.side_b)));
    out
}

/// Numbered menu; a locked special is shown, not hidden.
pub fn action_menu(me: &CombatantSnapshot) -> String {
    let mut out = String::from("--- Available Actions ---\n");
    for (i, kind) in ActionKind::ALL.iter().enumerate() {
        let label = kind.as_str().to_uppercase();
        if *kind == ActionKind::Special && me.special_cooldown > 0 {
            out.push_str(&format!("{}. {} (Cooldown: {})\n", i + 1, label, me.special_cooldown));
        } else {
            out.push_str(&format!("{}. {}\n", i + 1, label));
        }
    }
    out
}

pub fn banner(text: &str) -> String {
    let stars = "*".repeat(50);
    format!("{stars}\n{text}\n{stars}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(health: i32, defending: bool, cooldown: i32) -> CombatantSnapshot {
        CombatantSnapshot {
            name: "Hero".into(),
            health,
            max_health: 100,
            health_percent: health as f64,
            is_defending: defending,
            special_cooldown: cooldown,
        }
    }

    #[test]
    fn status_line_shows_bar_and_flags() {
        assert_eq!(
            status_line(&snap(60, true, 2)),
            "[██████░░░░] 60/100 HP [DEFENDING] [SPECIAL: 2]"
        );
        assert_eq!(status_line(&snap(0, false, 0)), "[░░░░░░░░░░] 0/100 HP");
    }

    #[test]
    fn menu_flags_locked_special() {
        let menu = action_menu(&snap(100, false, 3));
        assert!(menu.contains("3. SPECIAL (Cooldown: 3)"));
        assert!(menu.contains("5. FLEE"));
    }
}
