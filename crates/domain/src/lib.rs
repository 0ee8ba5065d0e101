//! Codenames domain: board vocabulary, the client-side board reducer and the
//! hold-to-confirm gesture. No I/O and no async in here.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod hold_gesture;
pub mod value_objects;

pub use aggregates::{BoardStats, GameBoard};
pub use entities::{
    CaptainSeats, Card, CardView, GameSnapshot, SnapshotParts, TeamCounts, Viewer, BOARD_SIZE,
};
pub use error::DomainError;
pub use events::{BoardChange, BoardEvent};
pub use hold_gesture::{CancelReason, HoldEvent, HoldGesture, HoldState, HoldTransition};
pub use value_objects::{CardColor, GameStatus, ParseTeamError, Role, Team};
