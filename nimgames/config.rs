//! Engine configuration: computer fallback policies and the scenario table

use crate::{
    game::GameKind,
    games::{heap::HeapGame, position::PositionGame},
    scenario::{Difficulty, ScenarioTable},
};
use thiserror::Error;

/// What the computer does when its strategy finds no move in a non-terminal position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Fallback {
    /// Make no move and hand the turn back
    Pass,

    /// Play a random legal move
    RandomMove,
}

/// Invalid configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Generator would have nothing to draw from
    #[error("{kind} {difficulty}: {what} range is empty")]
    EmptyRange {
        #[allow(missing_docs)]
        kind: GameKind,
        #[allow(missing_docs)]
        difficulty: Difficulty,
        /// Either `count` or `value`
        what: &'static str,
    },

    /// Every position the bounds allow is already finished
    #[error("{kind} {difficulty}: bounds only allow finished positions")]
    NoPlayableStart {
        #[allow(missing_docs)]
        kind: GameKind,
        #[allow(missing_docs)]
        difficulty: Difficulty,
    },
}

/// Settings of both engines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Used by Nim when the nim-sum is already zero on computer's turn
    pub heap_fallback: Fallback,

    /// Used by Nimble when no square restores the balance
    pub position_fallback: Fallback,

    /// Starting position bounds
    pub scenarios: ScenarioTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            heap_fallback: HeapGame::DEFAULT_FALLBACK,
            position_fallback: PositionGame::DEFAULT_FALLBACK,
            scenarios: ScenarioTable::default(),
        }
    }
}

impl EngineConfig {
    /// Nim engine using configured fallback
    #[inline]
    pub const fn heap_game(&self) -> HeapGame {
        HeapGame::new(self.heap_fallback)
    }

    /// Nimble engine using configured fallback
    #[inline]
    pub const fn position_game(&self) -> PositionGame {
        PositionGame::new(self.position_fallback)
    }

    /// Check that every scenario can be generated
    ///
    /// # Errors
    /// - First error reported by [`Bounds::check`](crate::scenario::Bounds::check)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in [GameKind::Heap, GameKind::Position] {
            for difficulty in Difficulty::ALL {
                self.scenarios
                    .bounds(kind, difficulty)
                    .check(kind, difficulty)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Bounds;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.heap_fallback, Fallback::RandomMove);
        assert_eq!(config.position_fallback, Fallback::Pass);
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_range_rejected() {
        let mut config = EngineConfig::default();
        config.scenarios.position.medium = Bounds::new(5..=7, 9..=0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                kind: GameKind::Position,
                difficulty: Difficulty::Medium,
                what: "value",
            })
        );

        config.scenarios.heap.easy = Bounds::new(5..=3, 1..=10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                kind: GameKind::Heap,
                difficulty: Difficulty::Easy,
                what: "count",
            })
        );
    }

    #[test]
    fn finished_only_bounds_rejected() {
        let mut config = EngineConfig::default();
        config.scenarios.position.easy = Bounds::new(1..=1, 0..=5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoPlayableStart {
                kind: GameKind::Position,
                difficulty: Difficulty::Easy,
            })
        );

        let mut config = EngineConfig::default();
        config.scenarios.heap.difficult = Bounds::new(3..=5, 0..=0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoPlayableStart {
                kind: GameKind::Heap,
                difficulty: Difficulty::Difficult,
            })
        );
    }
}
