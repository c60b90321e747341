//! Impartial game - both players have the same moves

use crate::{
    game::{GameState, Ruleset},
    numeric::nimber::Nimber,
};
use std::collections::HashMap;

type ValueTable = HashMap<Vec<u32>, Nimber, ahash::RandomState>;

/// Impartial game, valued by Sprague-Grundy recursion over its options
pub trait ImpartialGame {
    /// Get a list of positions reachable in one move
    fn options(&self, state: &GameState) -> Vec<GameState>;

    /// Calculate the Nim value of the position.
    ///
    /// Searches the whole game tree, so it is only practical for small positions.
    fn nim_value(&self, state: &GameState) -> Nimber {
        let mut table = ValueTable::default();
        nim_value_with(self, state, &mut table)
    }
}

fn nim_value_with<G>(game: &G, state: &GameState, table: &mut ValueTable) -> Nimber
where
    G: ImpartialGame + ?Sized,
{
    if let Some(value) = table.get(state.positions()) {
        return *value;
    }

    let options = game.options(state);
    let mut values = Vec::with_capacity(options.len());
    for option in &options {
        values.push(nim_value_with(game, option, table));
    }
    let value = Nimber::mex(values);
    table.insert(state.positions().to_vec(), value);
    value
}

impl<G> ImpartialGame for G
where
    G: Ruleset,
{
    fn options(&self, state: &GameState) -> Vec<GameState> {
        self.legal_moves(state)
            .into_iter()
            .map(|mv| {
                let mut option = state.clone();
                self.apply(&mut option, mv);
                option
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{heap::HeapGame, position::PositionGame};

    #[test]
    fn single_heap_is_its_size() {
        let game = HeapGame::default();
        for size in 0..8 {
            assert_eq!(
                game.nim_value(&GameState::new(vec![size])),
                Nimber::new(size)
            );
        }
    }

    #[test]
    fn options_follow_rules() {
        let game = PositionGame::default();
        let options = game.options(&GameState::new(vec![1, 0, 2]));
        assert_eq!(
            options
                .iter()
                .map(|o| o.positions().to_vec())
                .collect::<Vec<_>>(),
            vec![vec![0, 1, 2], vec![0, 0, 3]]
        );
        assert!(game.options(&GameState::new(vec![0, 0, 5])).is_empty());
    }

    #[test]
    fn terminal_is_zero() {
        assert_eq!(
            PositionGame::default().nim_value(&GameState::new(vec![0, 3])),
            Nimber::ZERO
        );
        assert_eq!(
            HeapGame::default().nim_value(&GameState::new(vec![0, 0])),
            Nimber::ZERO
        );
    }
}
