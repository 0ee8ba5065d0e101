//! Domain entities

mod card;
mod snapshot;

#[cfg(test)]
pub(crate) use snapshot::fixtures;

pub use card::{Card, CardView};
pub use snapshot::{CaptainSeats, GameSnapshot, SnapshotParts, TeamCounts, Viewer, BOARD_SIZE};
