//! Team and card ownership colors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the two competing teams.
///
/// Turn order alternates between these two values, but only on explicit
/// instruction from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
        }
    }

    /// The other team.
    pub fn opponent(&self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Number of cards a team owns on a fresh board (red always starts).
    pub fn starting_cards(&self) -> u32 {
        match self {
            Team::Red => 9,
            Team::Blue => 8,
        }
    }

    /// The card color that belongs to this team.
    pub fn color(&self) -> CardColor {
        match self {
            Team::Red => CardColor::Red,
            Team::Blue => CardColor::Blue,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown team: {0:?}")]
pub struct ParseTeamError(pub String);

impl std::str::FromStr for Team {
    type Err = ParseTeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Team::Red),
            "blue" => Ok(Team::Blue),
            _ => Err(ParseTeamError(s.trim().to_string())),
        }
    }
}

/// Hidden ownership of a card, shown once revealed (or to captains).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Red,
    Blue,
    /// The assassin card; revealing it ends the game
    Black,
    Neutral,
}

impl CardColor {
    pub fn display_name(&self) -> &'static str {
        match self {
            CardColor::Red => "Red",
            CardColor::Blue => "Blue",
            CardColor::Black => "Assassin",
            CardColor::Neutral => "Neutral",
        }
    }

    /// The team owning this color, if any.
    pub fn team(&self) -> Option<Team> {
        match self {
            CardColor::Red => Some(Team::Red),
            CardColor::Blue => Some(Team::Blue),
            CardColor::Black | CardColor::Neutral => None,
        }
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardColor::Red => write!(f, "red"),
            CardColor::Blue => write!(f, "blue"),
            CardColor::Black => write!(f, "black"),
            CardColor::Neutral => write!(f, "neutral"),
        }
    }
}
