//! Random starting positions by difficulty tier

use crate::{
    config::ConfigError,
    game::{GameKind, GameState, Ruleset},
    games::{heap::HeapGame, position::PositionGame},
};
use rand::Rng;
use std::{fmt::Display, ops::RangeInclusive};

/// Difficulty tier of a generated position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    /// All tiers, from the easiest
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Difficult];
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Difficult => write!(f, "difficult"),
        }
    }
}

/// Size and value limits of a generated position. Both ranges are inclusive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Number of heaps or squares
    pub count: RangeInclusive<usize>,

    /// Objects in a single heap or coins on a single square
    pub value: RangeInclusive<u32>,
}

impl Bounds {
    /// Create new bounds
    #[inline]
    pub const fn new(count: RangeInclusive<usize>, value: RangeInclusive<u32>) -> Self {
        Self { count, value }
    }

    /// Check if the position fits in the bounds
    pub fn contains(&self, state: &GameState) -> bool {
        self.count.contains(&state.len())
            && state.positions().iter().all(|v| self.value.contains(v))
    }

    /// Check that positions can be drawn and that some of them are not finished
    ///
    /// # Errors
    /// - [`ConfigError::EmptyRange`] when either range has no values
    /// - [`ConfigError::NoPlayableStart`] when every position within bounds has no moves
    pub fn check(&self, kind: GameKind, difficulty: Difficulty) -> Result<(), ConfigError> {
        let empty = |what: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::EmptyRange {
                kind,
                difficulty,
                what,
            })
        };
        if self.count.is_empty() {
            return empty("count");
        }
        if self.value.is_empty() {
            return empty("value");
        }

        // Nimble coins can only move from squares left of the last one
        let min_count = match kind {
            GameKind::Heap => 1,
            GameKind::Position => 2,
        };
        if *self.count.end() < min_count || *self.value.end() == 0 {
            return Err(ConfigError::NoPlayableStart { kind, difficulty });
        }
        Ok(())
    }

    /// Draw a random position, every entry independently
    ///
    /// # Panics
    /// - If any of the ranges is empty
    pub fn sample<R>(&self, rng: &mut R) -> GameState
    where
        R: Rng + ?Sized,
    {
        let count = rng.random_range(self.count.clone());
        let positions = (0..count)
            .map(|_| rng.random_range(self.value.clone()))
            .collect();
        GameState::new(positions)
    }
}

/// Bounds of each difficulty tier of one game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Tiers {
    pub easy: Bounds,
    pub medium: Bounds,
    pub difficult: Bounds,
}

impl Tiers {
    /// Bounds of given tier
    pub const fn get(&self, difficulty: Difficulty) -> &Bounds {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Difficult => &self.difficult,
        }
    }
}

/// Generator parameters for every game and difficulty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioTable {
    /// Nim heaps
    pub heap: Tiers,

    /// Nimble squares
    pub position: Tiers,
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self {
            heap: Tiers {
                easy: Bounds::new(3..=5, 1..=10),
                medium: Bounds::new(10..=20, 1..=20),
                difficult: Bounds::new(30..=50, 1..=50),
            },
            position: Tiers {
                easy: Bounds::new(3..=5, 0..=5),
                medium: Bounds::new(5..=7, 0..=9),
                difficult: Bounds::new(7..=10, 2..=9),
            },
        }
    }
}

impl ScenarioTable {
    /// Bounds used for given game and tier
    pub const fn bounds(&self, kind: GameKind, difficulty: Difficulty) -> &Bounds {
        match kind {
            GameKind::Heap => self.heap.get(difficulty),
            GameKind::Position => self.position.get(difficulty),
        }
    }

    /// Generate starting position with human to move. Positions with no moves left are
    /// drawn again, so the game never starts finished.
    ///
    /// # Errors
    /// - Any error reported by [`Bounds::check`] for the selected bounds
    pub fn generate<R>(
        &self,
        kind: GameKind,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<GameState, ConfigError>
    where
        R: Rng + ?Sized,
    {
        let bounds = self.bounds(kind, difficulty);
        bounds.check(kind, difficulty)?;
        Ok(draw_playable(kind, difficulty, bounds, rng))
    }
}

fn is_finished(kind: GameKind, state: &GameState) -> bool {
    match kind {
        GameKind::Heap => HeapGame::default().is_terminal(state),
        GameKind::Position => PositionGame::default().is_terminal(state),
    }
}

/// `bounds` must pass [`Bounds::check`], otherwise this may never return
fn draw_playable<R>(
    kind: GameKind,
    difficulty: Difficulty,
    bounds: &Bounds,
    rng: &mut R,
) -> GameState
where
    R: Rng + ?Sized,
{
    loop {
        let state = bounds.sample(rng);
        if is_finished(kind, &state) {
            log::trace!("drawing again, {kind} {difficulty} scenario {state} is finished");
            continue;
        }
        log::debug!("generated {kind} {difficulty} scenario {state}");
        return state;
    }
}

/// Generate starting position from the default table
pub fn generate<R>(kind: GameKind, difficulty: Difficulty, rng: &mut R) -> GameState
where
    R: Rng + ?Sized,
{
    let table = ScenarioTable::default();
    draw_playable(kind, difficulty, table.bounds(kind, difficulty), rng)
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Difficulty {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Difficulty::ALL).unwrap()
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for GameKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[GameKind::Heap, GameKind::Position]).unwrap()
    }
}
