//! Aggregate roots - domain objects that own their related data
//!
//! Mutations return what changed instead of firing callbacks, so the caller
//! decides how to react.

pub mod board;

pub use board::{BoardStats, GameBoard};
