//! Value objects - Immutable objects defined by their attributes

mod role;
mod team;

pub use role::{GameStatus, Role};
pub use team::{CardColor, ParseTeamError, Team};
