//! Player events - what listeners registered on the connection manager receive
//!
//! Server frames are passed through as [`ServerMessage`]; connection lifecycle
//! changes are added next to them so one subscription table covers both.

use std::time::Duration;

use codenames_shared::ServerMessage;

/// Subscription key for [`crate::infrastructure::websocket::ConnectionManager::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    StateUpdate,
    CardRevealed,
    TurnSwitch,
    PlayerJoined,
    PlayerLeft,
    GameOver,
    Error,
    Pong,
    /// Catch-all: every server frame, including unknown types
    Message,
    Connected,
    Disconnected,
    Reconnecting,
    ReconnectFailed,
    TransportError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Server(ServerMessage),
    Connected,
    Disconnected { will_retry: bool },
    Reconnecting { attempt: u32, delay: Duration },
    /// Retries exhausted; emitted once per connect
    ReconnectFailed,
    TransportError { message: String },
}

impl PlayerEvent {
    /// The specific kind listeners subscribe to. `None` for unknown server
    /// frames, which only reach the catch-all group.
    pub fn kind(&self) -> Option<EventKind> {
        let kind = match self {
            PlayerEvent::Server(msg) => match msg {
                ServerMessage::Init { .. } => EventKind::Init,
                ServerMessage::StateUpdate { .. } => EventKind::StateUpdate,
                ServerMessage::CardRevealed { .. } => EventKind::CardRevealed,
                ServerMessage::TurnSwitch { .. } => EventKind::TurnSwitch,
                ServerMessage::PlayerJoined { .. } => EventKind::PlayerJoined,
                ServerMessage::PlayerLeft { .. } => EventKind::PlayerLeft,
                ServerMessage::GameOver { .. } => EventKind::GameOver,
                ServerMessage::Error { .. } => EventKind::Error,
                ServerMessage::Pong => EventKind::Pong,
                ServerMessage::Unknown => return None,
            },
            PlayerEvent::Connected => EventKind::Connected,
            PlayerEvent::Disconnected { .. } => EventKind::Disconnected,
            PlayerEvent::Reconnecting { .. } => EventKind::Reconnecting,
            PlayerEvent::ReconnectFailed => EventKind::ReconnectFailed,
            PlayerEvent::TransportError { .. } => EventKind::TransportError,
        };
        Some(kind)
    }

    pub fn is_server_message(&self) -> bool {
        matches!(self, PlayerEvent::Server(_))
    }
}
