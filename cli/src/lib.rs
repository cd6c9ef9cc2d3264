pub mod input;
pub mod render;

use std::{fs, path::Path};

use anyhow::Context;
use encoding_rs::Encoding;
use engine::api::{builtin_battle, parse_battle_config, BattleConfig, ConfigFormat};

/// Read a text file, honouring a UTF-8/UTF-16 BOM if present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read battle config: {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// A config file wins over a builtin id; with neither, the canonical matchup.
pub fn resolve_config(config: Option<&Path>, battle: Option<&str>) -> anyhow::Result<BattleConfig> {
    match (config, battle) {
        (Some(path), _) => {
            let text = read_text_auto(path)?;
            parse_battle_config(&text, ConfigFormat::from_path(path))
                .with_context(|| format!("failed to load battle config: {}", path.display()))
        }
        (None, Some(id)) => builtin_battle(id),
        (None, None) => builtin_battle("hero_vs_goblin"),
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
