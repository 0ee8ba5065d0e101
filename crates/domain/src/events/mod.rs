//! Domain events - what happened, returned from aggregate mutations

mod board_events;

pub use board_events::{BoardChange, BoardEvent};
