//! Board events and the changes they produce
//!
//! `BoardEvent` is what the server told us. `BoardChange` is what the
//! renderer has to do about it.

use crate::entities::{GameSnapshot, TeamCounts};
use crate::value_objects::{CardColor, Team};

/// Input to [`crate::GameBoard::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Full state; replaces whatever the board held
    Snapshot(GameSnapshot),
    CardRevealed { index: usize, color: CardColor },
    /// The server handed the turn to `team`
    TurnSwitched { team: Team, turn: Option<u32> },
    PlayersChanged { count: u32 },
    GameOver { winner: Team },
}

impl BoardEvent {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::Snapshot(_) => "snapshot",
            BoardEvent::CardRevealed { .. } => "card_revealed",
            BoardEvent::TurnSwitched { .. } => "turn_switched",
            BoardEvent::PlayersChanged { .. } => "players_changed",
            BoardEvent::GameOver { .. } => "game_over",
        }
    }
}

/// Outcome of applying a [`BoardEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChange {
    /// Redraw everything from the current snapshot
    FullRender,
    CardRevealed { index: usize, color: CardColor },
    ScoreChanged { remaining: TeamCounts },
    /// `changed` is false when the server only re-confirmed the current team
    TurnChanged { team: Team, turn: u32, changed: bool },
    PlayersChanged { count: u32 },
    GameOver { winner: Team },
}
