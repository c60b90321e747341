//! Single game between a human and the computer.
//!
//! Session owns the position, the engine and the random source, and is the interface a
//! front end drives: submit a human move, run the computer's turn, check for the end of the
//! game. All mutation goes through `&mut self`, so there is never more than one move in
//! flight for a position.

use crate::{
    config::ConfigError,
    error::MoveError,
    game::{ComputerTurn, GameState, Player, Ruleset},
    games::{heap::HeapGame, position::PositionGame},
    scenario::{Difficulty, ScenarioTable},
};
use rand::Rng;

/// Session of Nim
pub type HeapSession<R> = Session<HeapGame, R>;

/// Session of Nimble
pub type PositionSession<R> = Session<PositionGame, R>;

/// Game in progress
#[derive(Debug, Clone)]
pub struct Session<G, R> {
    ruleset: G,
    state: GameState,
    rng: R,
    moves_played: usize,
}

impl<G, R> Session<G, R>
where
    G: Ruleset,
    R: Rng,
{
    /// Start a new game from a generated position, human moves first. The generated
    /// position always has a move left.
    ///
    /// # Errors
    /// - [`ConfigError`] when the scenario table cannot produce a playable position for this
    ///   game and difficulty
    pub fn new(
        ruleset: G,
        scenarios: &ScenarioTable,
        difficulty: Difficulty,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        let state = scenarios.generate(G::KIND, difficulty, &mut rng)?;
        Ok(Self::from_state(ruleset, state, rng))
    }

    /// Continue a game from a given position. If that position is already finished,
    /// [`Session::winner`] reports the opponent of the side to move.
    #[inline]
    pub const fn from_state(ruleset: G, state: GameState, rng: R) -> Self {
        Self {
            ruleset,
            state,
            rng,
            moves_played: 0,
        }
    }

    /// Current position
    #[inline]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Engine used in this game
    #[inline]
    pub const fn ruleset(&self) -> &G {
        &self.ruleset
    }

    /// Number of moves played so far by either side, passes excluded
    #[inline]
    pub const fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Play a human move. Accepts a move or a tuple: `(heap, amount)` in Nim and
    /// `(from, to)` in Nimble, both 0-based
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when game has finished
    /// - [`MoveError::OutOfTurn`] when it is computer's turn
    /// - Any rule violation reported by the engine
    pub fn submit_human_move<M>(&mut self, mv: M) -> Result<&GameState, MoveError>
    where
        M: Into<G::Move>,
    {
        self.ensure_turn(Player::Human)?;
        self.ruleset.play(&mut self.state, mv.into())?;
        self.moves_played += 1;
        self.report_if_over();
        Ok(&self.state)
    }

    /// Let the computer pick and play its move
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when game has finished
    /// - [`MoveError::OutOfTurn`] when it is human's turn
    pub fn run_computer_turn(&mut self) -> Result<ComputerTurn<G::Move>, MoveError> {
        self.ensure_turn(Player::Computer)?;
        let turn = self
            .ruleset
            .play_computer_turn(&mut self.state, &mut self.rng)?;
        if let ComputerTurn::Moved(_) = turn {
            self.moves_played += 1;
        }
        self.report_if_over();
        Ok(turn)
    }

    /// Check if no moves are left
    pub fn is_terminal(&self) -> bool {
        self.ruleset.is_terminal(&self.state)
    }

    /// Winner of a finished game
    pub fn winner(&self) -> Option<Player> {
        self.ruleset.winner(&self.state)
    }

    fn ensure_turn(&self, player: Player) -> Result<(), MoveError> {
        if self.is_terminal() {
            Err(MoveError::GameAlreadyOver)
        } else if self.state.turn() == player {
            Ok(())
        } else {
            Err(MoveError::OutOfTurn(player))
        }
    }

    fn report_if_over(&self) {
        if let Some(winner) = self.winner() {
            log::info!(
                "{} game over after {} moves, {winner} wins",
                G::KIND,
                self.moves_played
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{EngineConfig, Fallback},
        games::{heap::HeapMove, position::Slide},
        scenario::Bounds,
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn heap_session(positions: Vec<u32>) -> HeapSession<StdRng> {
        Session::from_state(
            HeapGame::default(),
            GameState::new(positions),
            StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn human_then_computer() {
        let mut session = heap_session(vec![3, 4, 5]);
        assert_eq!(
            session.run_computer_turn(),
            Err(MoveError::OutOfTurn(Player::Computer))
        );

        let state = session.submit_human_move((2, 3)).unwrap();
        assert_eq!(state.positions(), &[3, 4, 2]);
        assert_eq!(
            session.submit_human_move((0, 1)),
            Err(MoveError::OutOfTurn(Player::Human))
        );

        // 3 ^ 4 ^ 2 = 5, only heap 1 can be reduced
        let turn = session.run_computer_turn().unwrap();
        assert_eq!(turn, ComputerTurn::Moved(HeapMove { heap: 1, amount: 3 }));
        assert_eq!(session.state().positions(), &[3, 1, 2]);
        assert_eq!(session.moves_played(), 2);
        assert!(session.state().is_human_turn());
    }

    #[test]
    fn rejected_move_keeps_state() {
        let mut session = heap_session(vec![1, 2]);
        assert_eq!(
            session.submit_human_move(HeapMove { heap: 1, amount: 3 }),
            Err(MoveError::InvalidAmount {
                amount: 3,
                available: 2
            })
        );
        assert_eq!(session.state(), &GameState::new(vec![1, 2]));
        assert_eq!(session.moves_played(), 0);
    }

    #[test]
    fn human_wins_with_last_move() {
        let mut session = heap_session(vec![0, 4]);
        session.submit_human_move((1, 4)).unwrap();
        assert!(session.is_terminal());
        assert_eq!(session.winner(), Some(Player::Human));
        assert_eq!(
            session.run_computer_turn(),
            Err(MoveError::GameAlreadyOver)
        );
        assert_eq!(
            session.submit_human_move((1, 1)),
            Err(MoveError::GameAlreadyOver)
        );
    }

    #[test]
    fn computer_wins_with_last_move() {
        let mut session = heap_session(vec![2, 3]);
        session.submit_human_move((0, 2)).unwrap();
        assert_eq!(session.winner(), None);
        session.run_computer_turn().unwrap();
        assert!(session.is_terminal());
        assert_eq!(session.winner(), Some(Player::Computer));
    }

    #[test]
    fn nimble_session() {
        let mut session: PositionSession<_> = Session::from_state(
            PositionGame::default(),
            GameState::new(vec![1, 0, 1]),
            StdRng::seed_from_u64(3),
        );
        session.submit_human_move(Slide { from: 0, to: 2 }).unwrap();
        assert_eq!(session.winner(), Some(Player::Human));
    }

    #[test]
    fn computer_pass_returns_turn() {
        let mut session: PositionSession<_> = Session::from_state(
            PositionGame::new(Fallback::Pass),
            GameState::new(vec![0, 2, 0, 0]),
            StdRng::seed_from_u64(3),
        );
        // [0, 1, 1, 0]: square 0 is the leftmost unsafe one, and it is empty
        session.submit_human_move((1, 2)).unwrap();
        assert_eq!(session.run_computer_turn(), Ok(ComputerTurn::Passed));
        assert_eq!(session.state(), &GameState::new(vec![0, 1, 1, 0]));
        assert_eq!(session.moves_played(), 1);
    }

    #[test]
    fn new_game_uses_scenario_table() {
        let config = EngineConfig::default();
        for difficulty in Difficulty::ALL {
            let session = Session::new(
                config.position_game(),
                &config.scenarios,
                difficulty,
                StdRng::seed_from_u64(11),
            )
            .unwrap();
            assert!(
                config
                    .scenarios
                    .position
                    .get(difficulty)
                    .contains(session.state())
            );
            assert!(session.state().is_human_turn());
        }

        let mut scenarios = ScenarioTable::default();
        scenarios.heap.easy = Bounds::new(2..=2, 7..=7);
        let session = Session::new(
            HeapGame::default(),
            &scenarios,
            Difficulty::Easy,
            StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(session.state(), &GameState::new(vec![7, 7]));
    }

    #[test]
    fn new_game_never_starts_finished() {
        let config = EngineConfig::default();
        for seed in 0..2000 {
            let session = Session::new(
                config.position_game(),
                &config.scenarios,
                Difficulty::Easy,
                StdRng::seed_from_u64(seed),
            )
            .unwrap();
            assert!(!session.is_terminal(), "seed {seed}: {}", session.state());
            assert_eq!(session.winner(), None);
            assert_eq!(session.moves_played(), 0);
        }
    }

    #[test]
    fn new_game_with_unusable_bounds() {
        let mut scenarios = ScenarioTable::default();
        scenarios.position.medium = Bounds::new(1..=1, 0..=9);
        let session = Session::new(
            PositionGame::default(),
            &scenarios,
            Difficulty::Medium,
            StdRng::seed_from_u64(0),
        );
        assert_eq!(
            session.err(),
            Some(ConfigError::NoPlayableStart {
                kind: crate::game::GameKind::Position,
                difficulty: Difficulty::Medium,
            })
        );
    }

    #[test]
    fn optimal_computer_never_loses_a_won_position() {
        // computer to move with nonzero nim-sum wins against any opponent
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut opponent = StdRng::seed_from_u64(seed + 1000);
            let mut state = crate::scenario::generate(
                crate::game::GameKind::Heap,
                Difficulty::Easy,
                &mut rng,
            );
            if state.nim_sum().is_zero() {
                continue;
            }
            state.pass_turn();

            let mut session = Session::from_state(HeapGame::default(), state, rng);
            while !session.is_terminal() {
                session.run_computer_turn().unwrap();
                if session.is_terminal() {
                    break;
                }
                let mv = session
                    .ruleset()
                    .random_move(session.state(), &mut opponent)
                    .unwrap();
                session.submit_human_move(mv).unwrap();
            }
            assert_eq!(session.winner(), Some(Player::Computer));
        }
    }
}
