//! Renderer port
//!
//! Everything the client wants drawn goes through [`GameView`]. Styling,
//! layout and animation are the implementor's business.

use codenames_domain::{BoardStats, CardView, Team, TeamCounts};

use crate::infrastructure::messaging::ConnectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Short toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}

/// Header data shown above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub room_id: Option<String>,
    pub current_team: Team,
    pub current_turn: u32,
    pub remaining: TeamCounts,
    pub players_count: u32,
    pub stats: BoardStats,
}

/// What the connection indicator should say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    State(ConnectionState),
    Reconnecting { attempt: u32, delay_ms: u64 },
    /// Retries exhausted; only a reload helps
    ReloadRequired,
}

#[cfg_attr(test, mockall::automock)]
pub trait GameView: Send + Sync {
    fn render_board(&self, cards: Vec<CardView>, info: GameInfo);

    fn update_card(&self, card: CardView);

    fn update_game_info(&self, info: GameInfo);

    fn show_turn(&self, team: Team, changed: bool);

    fn show_game_over(&self, winner: Team);

    /// A hold ended early; point the user at the gesture
    fn show_hold_hint(&self, index: usize);

    fn notify(&self, notification: Notification);

    fn set_connection_status(&self, status: ConnectionStatus);

    /// Terminal error screen; nothing else happens after this
    fn show_fatal_error(&self, message: String);
}
