use crate::commands::{DifficultyArg, GameArg, load_config, seeded_rng};
use anyhow::Result;
use clap::{self, Parser};
use nimgames::{
    game::{GameKind, GameState},
    scenario::Difficulty,
};
use serde::Serialize;

/// Generate a starting position and print it as JSON
#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum)]
    game: GameArg,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Seed of the random generator. Seeded from the OS if not given
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Path to JSON engine config
    #[arg(long, default_value = None)]
    config: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    game: GameKind,
    difficulty: Difficulty,
    state: GameState,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut rng = seeded_rng(args.seed);

    let game = GameKind::from(args.game);
    let difficulty = Difficulty::from(args.difficulty);
    let state = config.scenarios.generate(game, difficulty, &mut rng)?;

    let report = Report {
        game,
        difficulty,
        state,
    };
    println!("{}", serde_json::ser::to_string(&report)?);

    Ok(())
}
