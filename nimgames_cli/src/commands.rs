use anyhow::{Context, Result};
use clap::ValueEnum;
use nimgames::{config::EngineConfig, game::GameKind, scenario::Difficulty};
use rand::{SeedableRng, rngs::StdRng};
use std::fs;

pub mod generate;
pub mod hint;
pub mod self_play;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameArg {
    /// Nim
    Heap,
    /// Nimble
    Position,
}

impl From<GameArg> for GameKind {
    fn from(value: GameArg) -> Self {
        match value {
            GameArg::Heap => GameKind::Heap,
            GameArg::Position => GameKind::Position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Difficult,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Difficult => Difficulty::Difficult,
        }
    }
}

/// Load engine settings from a JSON file, defaults when no file is given
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let input = fs::read_to_string(path).with_context(|| format!("Could not read {path}"))?;
    let config: EngineConfig =
        serde_json::from_str(&input).with_context(|| format!("Could not parse {path}"))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {path}"))?;
    Ok(config)
}

/// Seeded generator, or one seeded from the OS when no seed is given
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}
