//! Nim is played on a row of heaps. In their turn a player removes any positive number of
//! objects from a single heap, and the player who takes the last object wins.
//!
//! Value of a position is the nim-sum of all heap sizes. A position is lost for the player
//! to move exactly when that sum is zero, so the winning move is the one that brings it back
//! to zero.

use crate::{
    config::Fallback,
    error::MoveError,
    game::{ComputerTurn, GameKind, GameState, Ruleset},
    numeric::nimber::Nimber,
};
use rand::{Rng, seq::IndexedRandom};
use std::fmt::Display;

/// Removal of `amount` objects from heap at index `heap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct HeapMove {
    pub heap: usize,
    pub amount: u32,
}

impl Display for HeapMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from heap {}", self.amount, self.heap)
    }
}

impl From<(usize, u32)> for HeapMove {
    fn from((heap, amount): (usize, u32)) -> Self {
        Self { heap, amount }
    }
}

/// See [heap](self) header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapGame {
    fallback: Fallback,
}

impl Default for HeapGame {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FALLBACK)
    }
}

impl HeapGame {
    /// Computer takes a single object from a random heap when it is already losing,
    /// so the game keeps going and the opponent has a chance to make a mistake
    pub const DEFAULT_FALLBACK: Fallback = Fallback::RandomMove;

    /// Create new engine with given fallback policy
    #[inline]
    pub const fn new(fallback: Fallback) -> Self {
        Self { fallback }
    }

    /// Remove `amount` objects from heap `heap` and pass the turn
    ///
    /// # Errors
    /// - [`MoveError::OutOfRange`] when there is no such heap
    /// - [`MoveError::InvalidAmount`] when `amount` is zero or larger than the heap
    /// - [`MoveError::GameAlreadyOver`] when all heaps are empty
    pub fn apply_human_move(
        &self,
        state: &mut GameState,
        heap: usize,
        amount: u32,
    ) -> Result<(), MoveError> {
        self.play(state, HeapMove { heap, amount })
    }

    /// Play the computer's turn
    ///
    /// # Errors
    /// - [`MoveError::GameAlreadyOver`] when all heaps are empty
    pub fn computer_move<R>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> Result<ComputerTurn<HeapMove>, MoveError>
    where
        R: Rng + ?Sized,
    {
        self.play_computer_turn(state, rng)
    }

    /// Nim-sum of all heaps
    #[inline]
    pub fn nim_sum(state: &GameState) -> Nimber {
        state.nim_sum()
    }

    /// Move to a position with zero nim-sum, taken from the first heap that allows it.
    /// `None` when nim-sum is already zero.
    pub fn winning_move(state: &GameState) -> Option<HeapMove> {
        let nim_sum = Self::nim_sum(state);
        if nim_sum.is_zero() {
            return None;
        }

        state
            .positions()
            .iter()
            .enumerate()
            .find_map(|(heap, &size)| {
                let target = (Nimber::new(size) + nim_sum).value();
                (target < size).then_some(HeapMove {
                    heap,
                    amount: size - target,
                })
            })
    }

    fn non_empty_heaps(state: &GameState) -> Vec<usize> {
        state
            .positions()
            .iter()
            .enumerate()
            .filter_map(|(heap, &size)| (size > 0).then_some(heap))
            .collect()
    }
}

impl Ruleset for HeapGame {
    type Move = HeapMove;

    const KIND: GameKind = GameKind::Heap;

    fn fallback(&self) -> Fallback {
        self.fallback
    }

    fn validate(&self, state: &GameState, mv: HeapMove) -> Result<(), MoveError> {
        let available = *state.positions().get(mv.heap).ok_or(MoveError::OutOfRange {
            index: mv.heap,
            len: state.len(),
        })?;

        if mv.amount == 0 || mv.amount > available {
            return Err(MoveError::InvalidAmount {
                amount: mv.amount,
                available,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, mv: HeapMove) {
        state.positions_mut()[mv.heap] -= mv.amount;
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        state.positions().iter().all(|&size| size == 0)
    }

    fn legal_moves(&self, state: &GameState) -> Vec<HeapMove> {
        let mut moves =
            Vec::with_capacity(state.positions().iter().map(|&size| size as usize).sum());
        for (heap, &size) in state.positions().iter().enumerate() {
            moves.extend((1..=size).map(|amount| HeapMove { heap, amount }));
        }
        moves
    }

    fn random_move<R>(&self, state: &GameState, rng: &mut R) -> Option<HeapMove>
    where
        R: Rng + ?Sized,
    {
        let heap = *Self::non_empty_heaps(state).choose(rng)?;
        let amount = rng.random_range(1..=state.positions()[heap]);
        Some(HeapMove { heap, amount })
    }

    fn strategy_move<R>(&self, state: &GameState, _rng: &mut R) -> Option<HeapMove>
    where
        R: Rng + ?Sized,
    {
        Self::winning_move(state)
    }

    fn fallback_move<R>(&self, state: &GameState, rng: &mut R) -> Option<HeapMove>
    where
        R: Rng + ?Sized,
    {
        let heap = *Self::non_empty_heaps(state).choose(rng)?;
        Some(HeapMove { heap, amount: 1 })
    }
}
