use crate::{
    commands::{DifficultyArg, GameArg, load_config},
    io::FileOrStderr,
};
use anyhow::{Context, Result};
use clap::{self, Parser};
use nimgames::{
    config::ConfigError,
    game::{ComputerTurn, GameState, Player, Ruleset},
    scenario::{Difficulty, ScenarioTable},
    session::Session,
};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

/// Play the computer strategy against a random opponent and report the results
#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum)]
    game: GameArg,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Seed of the first game, following games use consecutive seeds
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Report a game as stalled after that many turns
    #[arg(long, default_value_t = 10_000)]
    max_turns: usize,

    /// Path to JSON engine config
    #[arg(long, default_value = None)]
    config: Option<String>,

    /// Path to output logs
    #[arg(long, default_value = "-")]
    out_file: FileOrStderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub seed: u64,
    pub initial: GameState,
    pub winner: Option<Player>,
    pub moves: usize,
    pub computer_passes: usize,
    pub stalled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum Log {
    GameFinished(GameReport),
    Summary {
        games: usize,
        human_wins: usize,
        computer_wins: usize,
        stalled: usize,
    },
}

impl Log {
    pub fn summary(reports: &[GameReport]) -> Self {
        let wins = |player| {
            reports
                .iter()
                .filter(|report| report.winner == Some(player))
                .count()
        };
        Log::Summary {
            games: reports.len(),
            human_wins: wins(Player::Human),
            computer_wins: wins(Player::Computer),
            stalled: reports.iter().filter(|report| report.stalled).count(),
        }
    }
}

/// Play one game, with random moves on the human side
pub fn play_game<G>(
    ruleset: G,
    scenarios: &ScenarioTable,
    difficulty: Difficulty,
    seed: u64,
    max_turns: usize,
) -> Result<GameReport, ConfigError>
where
    G: Ruleset,
{
    let mut opponent = StdRng::seed_from_u64(!seed);
    let mut session = Session::new(
        ruleset,
        scenarios,
        difficulty,
        StdRng::seed_from_u64(seed),
    )?;
    let initial = session.state().clone();
    let mut computer_passes = 0;

    for _ in 0..max_turns {
        if session.is_terminal() {
            break;
        }

        let played = if session.state().is_human_turn() {
            session
                .ruleset()
                .random_move(session.state(), &mut opponent)
                .map(|mv| session.submit_human_move(mv).map(|_| ()))
        } else {
            Some(session.run_computer_turn().map(|turn| {
                if turn == ComputerTurn::Passed {
                    computer_passes += 1;
                }
            }))
        };

        // moves come from the engine itself, so a rejection is a bug in the engine
        if let Some(Err(err)) = played {
            log::error!("seed {seed}: engine rejected its own move: {err}");
            break;
        }
    }

    Ok(GameReport {
        seed,
        initial,
        winner: session.winner(),
        moves: session.moves_played(),
        computer_passes,
        stalled: !session.is_terminal(),
    })
}

fn play_games<G>(
    ruleset: G,
    scenarios: &ScenarioTable,
    difficulty: Difficulty,
    seeds: std::ops::Range<u64>,
    max_turns: usize,
) -> Result<Vec<GameReport>, ConfigError>
where
    G: Ruleset + Copy + Send + Sync,
{
    seeds
        .into_par_iter()
        .map(|seed| play_game(ruleset, scenarios, difficulty, seed, max_turns))
        .collect()
}

pub fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let difficulty = Difficulty::from(args.difficulty);
    let seeds = args.seed..args.seed.saturating_add(args.games);

    let reports = match args.game {
        GameArg::Heap => play_games(
            config.heap_game(),
            &config.scenarios,
            difficulty,
            seeds,
            args.max_turns,
        )?,
        GameArg::Position => play_games(
            config.position_game(),
            &config.scenarios,
            difficulty,
            seeds,
            args.max_turns,
        )?,
    };

    let mut log_writer = args
        .out_file
        .create()
        .with_context(|| format!("Could not create {}", args.out_file))?;

    let summary = Log::summary(&reports);
    for report in reports {
        let log = Log::GameFinished(report);
        writeln!(log_writer, "{}", serde_json::ser::to_string(&log)?)?;
    }
    writeln!(log_writer, "{}", serde_json::ser::to_string(&summary)?)?;
    log_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimgames::{
        config::{EngineConfig, Fallback},
        games::{heap::HeapGame, position::PositionGame},
    };

    #[test]
    fn heap_games_finish() {
        let config = EngineConfig::default();
        let reports = play_games(
            config.heap_game(),
            &config.scenarios,
            Difficulty::Medium,
            0..20,
            10_000,
        )
        .unwrap();
        assert_eq!(reports.len(), 20);
        for report in &reports {
            assert!(!report.stalled);
            assert!(report.winner.is_some());
            assert_eq!(report.computer_passes, 0);
        }
    }

    #[test]
    fn nimble_games_finish() {
        let config = EngineConfig::default();
        for difficulty in Difficulty::ALL {
            let reports = play_games(
                config.position_game(),
                &config.scenarios,
                difficulty,
                0..10,
                100_000,
            )
            .unwrap();
            assert!(reports.iter().all(|report| !report.stalled));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let scenarios = ScenarioTable::default();
        let lhs = play_game(
            PositionGame::new(Fallback::RandomMove),
            &scenarios,
            Difficulty::Medium,
            17,
            10_000,
        )
        .unwrap();
        let rhs = play_game(
            PositionGame::new(Fallback::RandomMove),
            &scenarios,
            Difficulty::Medium,
            17,
            10_000,
        )
        .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn turn_limit_stalls() {
        let report = play_game(
            HeapGame::default(),
            &ScenarioTable::default(),
            Difficulty::Difficult,
            3,
            1,
        )
        .unwrap();
        assert!(report.stalled);
        assert_eq!(report.winner, None);
        assert_eq!(report.moves, 1);
    }

    #[test]
    fn summary_counts() {
        let report = |winner, stalled| GameReport {
            seed: 0,
            initial: GameState::new(vec![1]),
            winner,
            moves: 1,
            computer_passes: 0,
            stalled,
        };
        let summary = Log::summary(&[
            report(Some(Player::Human), false),
            report(Some(Player::Computer), false),
            report(Some(Player::Computer), false),
            report(None, true),
        ]);
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"Summary":{"games":4,"human_wins":1,"computer_wins":2,"stalled":1}}"#
        );
    }
}
