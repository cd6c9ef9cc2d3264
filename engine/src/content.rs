use std::collections::HashMap;

pub fn builtin_combatants() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("hero", include_str!("../content/combatants/hero.json")),
        ("goblin", include_str!("../content/combatants/goblin.json")),
        ("orc_brute", include_str!("../content/combatants/orc_brute.json")),
    ])
}

pub fn builtin_battles() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("hero_vs_goblin", include_str!("../content/battles/hero_vs_goblin.yaml")),
        ("hero_vs_orc", include_str!("../content/battles/hero_vs_orc.yaml")),
    ])
}
