use crate::commands::{GameArg, load_config, seeded_rng};
use anyhow::{Result, bail};
use clap::{self, Parser};
use nimgames::{
    config::EngineConfig,
    game::{GameState, Player, Ruleset},
    games::{
        heap::{HeapGame, HeapMove},
        position::{PositionGame, Slide},
    },
};
use rand::Rng;
use serde::Serialize;

/// Show the move the computer would play from a given position
#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum)]
    game: GameArg,

    /// Comma separated heap sizes or coin counts
    #[arg(long, num_args=1.., value_delimiter=',')]
    positions: Vec<u32>,

    /// Seed of the random generator used by random and fallback moves
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Path to JSON engine config
    #[arg(long, default_value = None)]
    config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Hint {
    Heap {
        nim_sum: u32,
        terminal: bool,
        suggestion: Option<HeapMove>,
    },
    Position {
        total_nim_sum: u32,
        canonical_nim_sum: u32,
        leftmost_unsafe_square: Option<usize>,
        terminal: bool,
        suggestion: Option<Slide>,
    },
}

fn suggest<G, R>(ruleset: &G, state: &GameState, rng: &mut R) -> Option<G::Move>
where
    G: Ruleset,
    R: Rng,
{
    // terminal positions have nothing to suggest
    ruleset.choose_computer_move(state, rng).ok().flatten()
}

pub fn hint<R>(game: GameArg, positions: Vec<u32>, config: &EngineConfig, rng: &mut R) -> Hint
where
    R: Rng,
{
    let state = GameState::with_turn(positions, Player::Computer);
    match game {
        GameArg::Heap => {
            let ruleset = config.heap_game();
            Hint::Heap {
                nim_sum: HeapGame::nim_sum(&state).value(),
                terminal: ruleset.is_terminal(&state),
                suggestion: suggest(&ruleset, &state, rng),
            }
        }
        GameArg::Position => {
            let ruleset = config.position_game();
            Hint::Position {
                total_nim_sum: PositionGame::total_nim_sum(&state).value(),
                canonical_nim_sum: PositionGame::canonical_nim_sum(&state).value(),
                leftmost_unsafe_square: PositionGame::find_leftmost_unsafe_square(&state),
                terminal: ruleset.is_terminal(&state),
                suggestion: suggest(&ruleset, &state, rng),
            }
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    if args.positions.is_empty() {
        bail!("Position cannot be empty. Use --positions a,b,... to specify it.");
    }

    let config = load_config(args.config.as_deref())?;
    let mut rng = seeded_rng(args.seed);
    let hint = hint(args.game, args.positions, &config, &mut rng);
    println!("{}", serde_json::ser::to_string(&hint)?);

    Ok(())
}
