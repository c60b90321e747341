//! Nimble is played on a strip of squares holding coins. In their turn a player moves a
//! single coin from its square to any square further to the right. Player who makes the last
//! move wins, which happens once every coin rests on the rightmost square.
//!
//! Each square is worth its distance to the right end of the strip. The computer opponent
//! measures balance by the nim-sum of those values taken once per square. That is coarser
//! than the value of the game itself, which counts the square once per coin, see
//! [`PositionGame::canonical_nim_sum`].

use crate::{
    config::Fallback,
    error::MoveError,
    game::{ComputerTurn, GameKind, GameState, Ruleset},
    numeric::nimber::Nimber,
};
use rand::{Rng, seq::IndexedRandom};
use std::fmt::Display;

/// Move of a single coin from square `from` to square `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Slide {
    pub from: usize,
    pub to: usize,
}

impl Display for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "move coin from square {} to square {}", self.from, self.to)
    }
}

impl From<(usize, usize)> for Slide {
    fn from((from, to): (usize, usize)) -> Self {
        Self { from, to }
    }
}

/// See [position](self) header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionGame {
    fallback: Fallback,
}

impl Default for PositionGame {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FALLBACK)
    }
}

impl PositionGame {
    /// No move is made when the strategy finds no target square
    pub const DEFAULT_FALLBACK: Fallback = Fallback::Pass;

    /// Create new engine with given fallback policy
    #[inline]
    pub const fn new(fallback: Fallback) -> Self {
        Self { fallback }
    }

    /// Check if a coin can be moved from `from` to `to`
    pub fn is_valid_move(state: &GameState, from: usize, to: usize) -> bool {
        from < to && to < state.len() && state.positions()[from] > 0
    }

    /// Move a coin and pass the turn
    ///
    /// # Errors
    /// - [`MoveError::OutOfRange`] when either square does not exist
    /// - [`MoveError::InvalidMove`] when `to` is not right of `from` or `from` is empty
    /// - [`MoveError::GameAlreadyOver`] when no coin can move
    pub fn apply_move(
        &self,
        state: &mut GameState,
        from: usize,
        to: usize,
    ) -> Result<(), MoveError> {
        self.play(state, Slide { from, to })
    }

    /// Play the computer's turn
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when no coin can move
    pub fn computer_move<R>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> Result<ComputerTurn<Slide>, MoveError>
    where
        R: Rng + ?Sized,
    {
        self.play_computer_turn(state, rng)
    }

    /// Value of a square, its distance from the last square. Does not depend on coins.
    ///
    /// `None` when there is no such square.
    #[inline]
    pub fn grundy_value(state: &GameState, index: usize) -> Option<Nimber> {
        (index < state.len()).then(|| square_value(state.len(), index))
    }

    /// Nim-sum of values of all squares, every square counted once
    pub fn total_nim_sum(state: &GameState) -> Nimber {
        (0..state.len())
            .map(|index| square_value(state.len(), index))
            .sum()
    }

    /// Value of the position: nim-sum of square values counted once per coin
    pub fn canonical_nim_sum(state: &GameState) -> Nimber {
        state
            .positions()
            .iter()
            .enumerate()
            .filter(|&(_, coins)| coins % 2 == 1)
            .map(|(index, _)| square_value(state.len(), index))
            .sum()
    }

    /// First square, excluding the last one, whose value does not cancel out the total
    pub fn find_leftmost_unsafe_square(state: &GameState) -> Option<usize> {
        let total = Self::total_nim_sum(state);
        (0..state.len().saturating_sub(1))
            .find(|&index| !(square_value(state.len(), index) + total).is_zero())
    }

    /// First square right of `from` holding fewer coins than its value
    fn balancing_target(state: &GameState, from: usize) -> Option<usize> {
        let len = state.len();
        (from + 1..len).find(|&to| state.positions()[to] < (len - to - 1) as u32)
    }
}

/// Value of square `index` on a strip of `len` squares, `index < len`
#[inline]
fn square_value(len: usize, index: usize) -> Nimber {
    Nimber::new((len - 1 - index) as u32)
}

impl Ruleset for PositionGame {
    type Move = Slide;

    const KIND: GameKind = GameKind::Position;

    fn fallback(&self) -> Fallback {
        self.fallback
    }

    fn validate(&self, state: &GameState, mv: Slide) -> Result<(), MoveError> {
        for index in [mv.from, mv.to] {
            if index >= state.len() {
                return Err(MoveError::OutOfRange {
                    index,
                    len: state.len(),
                });
            }
        }

        if !Self::is_valid_move(state, mv.from, mv.to) {
            return Err(MoveError::InvalidMove {
                from: mv.from,
                to: mv.to,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, mv: Slide) {
        let positions = state.positions_mut();
        positions[mv.from] -= 1;
        positions[mv.to] += 1;
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        state
            .positions()
            .split_last()
            .is_none_or(|(_, movable)| movable.iter().all(|&coins| coins == 0))
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Slide> {
        let len = state.len();
        let mut moves = Vec::new();
        for (from, &coins) in state.positions().iter().enumerate() {
            if coins > 0 {
                moves.extend((from + 1..len).map(|to| Slide { from, to }));
            }
        }
        moves
    }

    fn random_move<R>(&self, state: &GameState, rng: &mut R) -> Option<Slide>
    where
        R: Rng + ?Sized,
    {
        let len = state.len();
        let occupied = (0..len.saturating_sub(1))
            .filter(|&index| state.positions()[index] > 0)
            .collect::<Vec<_>>();
        let from = *occupied.choose(rng)?;
        let to = rng.random_range(from + 1..len);
        Some(Slide { from, to })
    }

    fn strategy_move<R>(&self, state: &GameState, rng: &mut R) -> Option<Slide>
    where
        R: Rng + ?Sized,
    {
        let Some(from) = Self::find_leftmost_unsafe_square(state) else {
            return self.random_move(state, rng);
        };

        if state.positions()[from] == 0 {
            log::debug!("unsafe square {from} of {state} has no coins");
            return None;
        }

        Self::balancing_target(state, from).map(|to| Slide { from, to })
    }
}
