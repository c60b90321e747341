//! Rulesets of the supported games

pub mod heap;
pub mod position;
