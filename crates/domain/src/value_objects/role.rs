//! Participant role and game lifecycle status

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a participant is allowed to see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees unrevealed card ownership, never selects cards
    Captain,
    /// Selects cards, sees ownership only after a reveal
    #[default]
    Agent,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Captain => "Captain",
            Role::Agent => "Agent",
        }
    }

    pub fn sees_hidden_colors(&self) -> bool {
        matches!(self, Role::Captain)
    }

    pub fn can_select_cards(&self) -> bool {
        matches!(self, Role::Agent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Captain => write!(f, "captain"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

/// Server-side lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Waiting for both captains
    #[default]
    Waiting,
    Active,
    Finished,
    /// Forward-compatibility fallback for newer variants.
    #[serde(other)]
    Unknown,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Active => write!(f, "active"),
            GameStatus::Finished => write!(f, "finished"),
            GameStatus::Unknown => write!(f, "unknown"),
        }
    }
}
