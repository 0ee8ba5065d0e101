//! Client-side copy of the game state
//!
//! The authoritative state lives on the server. A `GameSnapshot` is what the
//! client last heard, patched by incremental events through
//! [`crate::GameBoard`].

use crate::entities::card::Card;
use crate::error::DomainError;
use crate::value_objects::{CardColor, GameStatus, Role, Team};

/// Number of cards on a Codenames board.
pub const BOARD_SIZE: usize = 25;

/// Remaining (not yet revealed) cards per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamCounts {
    pub red: u32,
    pub blue: u32,
}

impl TeamCounts {
    pub fn new(red: u32, blue: u32) -> Self {
        Self { red, blue }
    }

    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    fn decrement(&mut self, team: Team) {
        let slot = match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        };
        *slot = slot.saturating_sub(1);
    }
}

impl Default for TeamCounts {
    fn default() -> Self {
        Self {
            red: Team::Red.starting_cards(),
            blue: Team::Blue.starting_cards(),
        }
    }
}

/// Who is looking at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    pub role: Role,
    pub team: Option<Team>,
}

/// Which teams currently have a captain seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptainSeats {
    pub red: bool,
    pub blue: bool,
}

/// Raw pieces of a snapshot, as parallel sequences.
///
/// Converted into a [`GameSnapshot`] through [`GameSnapshot::from_parts`],
/// which enforces that the sequences line up.
#[derive(Debug, Clone, Default)]
pub struct SnapshotParts {
    pub room_id: Option<String>,
    pub words: Vec<String>,
    pub revealed: Vec<bool>,
    pub colors: Option<Vec<CardColor>>,
    pub current_team: Option<Team>,
    pub current_turn: u32,
    pub remaining: TeamCounts,
    pub status: GameStatus,
    pub winner: Option<Team>,
    pub players_count: u32,
    pub viewer: Viewer,
    pub captains: CaptainSeats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    room_id: Option<String>,
    cards: Vec<Card>,
    current_team: Team,
    current_turn: u32,
    remaining: TeamCounts,
    status: GameStatus,
    winner: Option<Team>,
    players_count: u32,
    viewer: Viewer,
    captains: CaptainSeats,
}

impl GameSnapshot {
    pub fn from_parts(parts: SnapshotParts) -> Result<Self, DomainError> {
        let SnapshotParts {
            room_id,
            words,
            revealed,
            colors,
            current_team,
            current_turn,
            remaining,
            status,
            winner,
            players_count,
            viewer,
            captains,
        } = parts;

        if words.len() != BOARD_SIZE {
            return Err(DomainError::validation(format!(
                "expected {} words, got {}",
                BOARD_SIZE,
                words.len()
            )));
        }
        if revealed.len() != words.len() {
            return Err(DomainError::validation(format!(
                "revealed flags ({}) do not match words ({})",
                revealed.len(),
                words.len()
            )));
        }
        if let Some(colors) = &colors {
            if colors.len() != words.len() {
                return Err(DomainError::validation(format!(
                    "colors ({}) do not match words ({})",
                    colors.len(),
                    words.len()
                )));
            }
        }

        let cards = words
            .into_iter()
            .zip(revealed)
            .enumerate()
            .map(|(i, (word, is_revealed))| {
                let color = colors.as_ref().and_then(|c| c.get(i).copied());
                Card::new(word, is_revealed, color)
            })
            .collect();

        Ok(Self {
            room_id,
            cards,
            // Red moves first on a fresh board
            current_team: current_team.unwrap_or(Team::Red),
            current_turn: current_turn.max(1),
            remaining,
            status,
            winner,
            players_count,
            viewer,
            captains,
        })
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn remaining(&self) -> TeamCounts {
        self.remaining
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn players_count(&self) -> u32 {
        self.players_count
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn captains(&self) -> CaptainSeats {
        self.captains
    }

    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_revealed()).count()
    }

    /// Cards a team has already found (starting count minus remaining).
    pub fn found(&self, team: Team) -> u32 {
        team.starting_cards()
            .saturating_sub(self.remaining.get(team))
    }

    /// Open a card. Returns true when the card changed.
    pub(crate) fn reveal(&mut self, index: usize, color: CardColor) -> Result<bool, DomainError> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(DomainError::CardOutOfRange { index, len })?;

        if !card.reveal(color) {
            return Ok(false);
        }
        if let Some(team) = color.team() {
            self.remaining.decrement(team);
        }
        Ok(true)
    }

    pub(crate) fn set_turn(&mut self, team: Team, turn: Option<u32>) {
        self.current_team = team;
        if let Some(turn) = turn {
            self.current_turn = turn;
        }
    }

    pub(crate) fn set_players_count(&mut self, count: u32) {
        self.players_count = count;
    }

    pub(crate) fn finish(&mut self, winner: Team) {
        self.status = GameStatus::Finished;
        self.winner = Some(winner);
    }
}
