//! Game model shared by both engines: players, positions and the [`Ruleset`] interface

use crate::{config::Fallback, display, error::MoveError, numeric::nimber::Nimber};
use rand::Rng;
use std::fmt::{self, Debug, Display};

/// Side taking part in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Opposite player
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// Game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameKind {
    /// Nim, see [`HeapGame`](crate::games::heap::HeapGame)
    Heap,

    /// Nimble, see [`PositionGame`](crate::games::position::PositionGame)
    Position,
}

impl Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Heap => write!(f, "heap"),
            GameKind::Position => write!(f, "position"),
        }
    }
}

/// Heap sizes or per-square coin counts, together with the player to move.
///
/// Number of entries is fixed for the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    positions: Vec<u32>,
    turn: Player,
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::brackets(f, |f| display::commas(f, self.positions()))?;
        write!(f, " ({} to move)", self.turn)
    }
}

impl GameState {
    /// Create new state with human to move
    #[inline]
    pub const fn new(positions: Vec<u32>) -> Self {
        Self::with_turn(positions, Player::Human)
    }

    /// Create new state with given player to move
    #[inline]
    pub const fn with_turn(positions: Vec<u32>, turn: Player) -> Self {
        Self { positions, turn }
    }

    /// Heap sizes or coin counts
    #[inline]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Number of heaps or squares
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if there are no heaps or squares at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Player to move
    #[inline]
    pub const fn turn(&self) -> Player {
        self.turn
    }

    #[allow(missing_docs)]
    #[inline]
    pub const fn is_human_turn(&self) -> bool {
        matches!(self.turn, Player::Human)
    }

    /// Nim-sum of all entries, treating each one as a Nim heap
    pub fn nim_sum(&self) -> Nimber {
        self.positions.iter().copied().map(Nimber::new).sum()
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [u32] {
        &mut self.positions
    }

    pub(crate) const fn pass_turn(&mut self) {
        self.turn = self.turn.opposite();
    }
}

/// What the computer did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComputerTurn<M> {
    /// Computer played a move
    Moved(M),

    /// Strategy found no move and the fallback policy is [`Fallback::Pass`]
    Passed,
}

/// Rules of a game played on a [`GameState`] and the computer strategy for it
pub trait Ruleset {
    /// Single move in the game
    type Move: Copy + Debug + Display + PartialEq;

    /// Variant implemented by this ruleset
    const KIND: GameKind;

    /// What to do when [`Ruleset::strategy_move`] finds nothing
    fn fallback(&self) -> Fallback;

    /// Check legality of a move without modifying the state
    ///
    /// # Errors
    /// - [`MoveError::OutOfRange`] when move refers to nonexistent heap or square
    /// - [`MoveError::InvalidAmount`] or [`MoveError::InvalidMove`] when move breaks the rules
    fn validate(&self, state: &GameState, mv: Self::Move) -> Result<(), MoveError>;

    /// Apply an already validated move. Player to move is left unchanged
    fn apply(&self, state: &mut GameState, mv: Self::Move);

    /// Check if no moves are left
    fn is_terminal(&self, state: &GameState) -> bool;

    /// All legal moves from the position
    fn legal_moves(&self, state: &GameState) -> Vec<Self::Move>;

    /// Uniformly random legal move, `None` if position is terminal
    fn random_move<R>(&self, state: &GameState, rng: &mut R) -> Option<Self::Move>
    where
        R: Rng + ?Sized;

    /// Move picked by the nim-sum strategy, `None` if it has nothing to suggest
    fn strategy_move<R>(&self, state: &GameState, rng: &mut R) -> Option<Self::Move>
    where
        R: Rng + ?Sized;

    /// Move played under [`Fallback::RandomMove`]
    fn fallback_move<R>(&self, state: &GameState, rng: &mut R) -> Option<Self::Move>
    where
        R: Rng + ?Sized,
    {
        self.random_move(state, rng)
    }

    /// Validate and apply a move, then pass the turn
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when position is terminal
    /// - Any error reported by [`Ruleset::validate`]
    fn play(&self, state: &mut GameState, mv: Self::Move) -> Result<(), MoveError> {
        if self.is_terminal(state) {
            return Err(MoveError::GameAlreadyOver);
        }
        self.validate(state, mv)?;
        self.apply(state, mv);
        state.pass_turn();
        Ok(())
    }

    /// Pick the computer's move without playing it
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when position is terminal
    fn choose_computer_move<R>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Option<Self::Move>, MoveError>
    where
        R: Rng + ?Sized,
    {
        if self.is_terminal(state) {
            return Err(MoveError::GameAlreadyOver);
        }

        if let Some(mv) = self.strategy_move(state, rng) {
            log::debug!("{} strategy: {mv} from {state}", Self::KIND);
            return Ok(Some(mv));
        }

        match self.fallback() {
            Fallback::Pass => {
                log::debug!("{} strategy: no move from {state}, passing", Self::KIND);
                Ok(None)
            }
            Fallback::RandomMove => {
                let mv = self.fallback_move(state, rng);
                log::debug!("{} strategy: no move from {state}, fallback {mv:?}", Self::KIND);
                Ok(mv)
            }
        }
    }

    /// Play the computer's move and pass the turn, also when the computer passes
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when position is terminal
    fn play_computer_turn<R>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> Result<ComputerTurn<Self::Move>, MoveError>
    where
        R: Rng + ?Sized,
    {
        let turn = match self.choose_computer_move(state, rng)? {
            Some(mv) => {
                self.validate(state, mv)?;
                self.apply(state, mv);
                ComputerTurn::Moved(mv)
            }
            None => ComputerTurn::Passed,
        };
        state.pass_turn();
        Ok(turn)
    }

    /// Player who made the last move, once position is terminal
    fn winner(&self, state: &GameState) -> Option<Player> {
        self.is_terminal(state).then(|| state.turn().opposite())
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Player {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if <bool as quickcheck::Arbitrary>::arbitrary(g) {
            Player::Human
        } else {
            Player::Computer
        }
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for GameState {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = <usize as quickcheck::Arbitrary>::arbitrary(g) % 8 + 1;
        let positions = (0..len)
            .map(|_| <u32 as quickcheck::Arbitrary>::arbitrary(g) % 32)
            .collect();
        GameState::with_turn(positions, <Player as quickcheck::Arbitrary>::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let turn = self.turn;
        Box::new(
            quickcheck::Arbitrary::shrink(&self.positions)
                .filter(|positions| !positions.is_empty())
                .map(move |positions| GameState::with_turn(positions, turn)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_state() {
        let state = GameState::new(vec![3, 4, 5]);
        assert_eq!(state.to_string(), "[3, 4, 5] (human to move)");

        let state = GameState::with_turn(vec![], Player::Computer);
        assert_eq!(state.to_string(), "[] (computer to move)");
    }

    #[test]
    fn turn_alternates() {
        let mut state = GameState::new(vec![1]);
        assert!(state.is_human_turn());
        state.pass_turn();
        assert_eq!(state.turn(), Player::Computer);
        state.pass_turn();
        assert!(state.is_human_turn());
        assert_eq!(Player::Human.opposite().opposite(), Player::Human);
    }

    #[test]
    fn nim_sum_of_entries() {
        assert_eq!(GameState::new(vec![3, 4, 5]).nim_sum(), Nimber::new(2));
        assert_eq!(GameState::new(vec![1, 2, 3]).nim_sum(), Nimber::ZERO);
        assert_eq!(GameState::new(vec![]).nim_sum(), Nimber::ZERO);
    }
}
