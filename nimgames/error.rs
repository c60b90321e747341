//! Errors reported when a move cannot be played

use crate::game::Player;
use thiserror::Error;

/// Reason a move was rejected. State is never modified when a move is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// Heap or square index is outside of the position
    #[error("index {index} is out of range, position has {len} entries")]
    OutOfRange {
        /// Rejected index
        index: usize,
        /// Number of heaps or squares in the position
        len: usize,
    },

    /// Tried to remove nothing, or more objects than the heap holds
    #[error("cannot remove {amount} from a heap of {available}")]
    InvalidAmount {
        /// Requested number of objects to remove
        amount: u32,
        /// Objects left in the heap
        available: u32,
    },

    /// Coin move that is not to the right of an occupied square
    #[error("cannot move a coin from square {from} to square {to}")]
    InvalidMove {
        /// Source square
        from: usize,
        /// Target square
        to: usize,
    },

    /// The position is terminal, there are no moves left to play
    #[error("game is already over")]
    GameAlreadyOver,

    /// Move submitted by the player who is not to move
    #[error("it is not the {0}'s turn")]
    OutOfTurn(Player),
}
