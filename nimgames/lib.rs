//! Engines for two impartial games, Nim and Nimble, with a computer opponent
//! playing from nim-sum theory.
//!
//! Both variants are driven through [`Session`](crate::session::Session), which owns the
//! [`GameState`](crate::game::GameState), the random source and the
//! [ruleset](crate::game::Ruleset) of the game. Starting positions come from the
//! [scenario generator](crate::scenario).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod game;
pub mod games;
pub mod impartial_game;
pub mod numeric;
pub mod scenario;
pub mod session;

mod display;
