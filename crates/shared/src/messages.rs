//! WebSocket message types for client-server communication
//!
//! The client sends [`ClientMessage`] frames tagged by `action` and receives
//! [`ServerMessage`] frames tagged by `type`.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown `type` values deserialize to `Unknown`
//! - Extra fields (e.g. `timestamp`) are ignored

use serde::{Deserialize, Deserializer, Serialize};

use codenames_domain::{CardColor, GameStatus, Role, Team};

// =============================================================================
// Client Messages (Player → Server)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for a full state snapshot
    GetState,
    /// Select (reveal) a card
    ClickCard { index: usize },
    /// Liveness probe; answered with `pong`
    Ping,
}

// =============================================================================
// Server Messages (Server → Player)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent right after the socket is accepted
    Init {
        #[serde(default)]
        room: Option<String>,
        game_state: GameStateData,
    },
    /// Reply to `get_state`
    StateUpdate { game_state: GameStateData },
    CardRevealed {
        index: usize,
        color: CardColor,
        /// Who selected the card
        #[serde(default, deserialize_with = "string_or_number")]
        user_id: Option<String>,
    },
    TurnSwitch {
        current_team: Team,
        #[serde(default)]
        current_turn: Option<u32>,
    },
    PlayerJoined {
        players_count: u32,
        #[serde(default)]
        online_count: Option<u32>,
    },
    PlayerLeft {
        players_count: u32,
        #[serde(default)]
        online_count: Option<u32>,
    },
    GameOver {
        winner: Team,
        #[serde(default)]
        game_state: Option<GameStateData>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
    Pong,
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// The wire `type` tag of this message.
    pub fn type_name(&self) -> &'static str {
        match self {
            ServerMessage::Init { .. } => "init",
            ServerMessage::StateUpdate { .. } => "state_update",
            ServerMessage::CardRevealed { .. } => "card_revealed",
            ServerMessage::TurnSwitch { .. } => "turn_switch",
            ServerMessage::PlayerJoined { .. } => "player_joined",
            ServerMessage::PlayerLeft { .. } => "player_left",
            ServerMessage::GameOver { .. } => "game_over",
            ServerMessage::Error { .. } => "error",
            ServerMessage::Pong => "pong",
            ServerMessage::Unknown => "unknown",
        }
    }
}

/// Full game state as sent by the server.
///
/// `red_score` / `blue_score` count cards still hidden, not points.
/// `colors` is only present for captains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateData {
    #[serde(default)]
    pub room_id: Option<String>,
    pub words: Vec<String>,
    pub revealed: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<CardColor>>,
    #[serde(default)]
    pub current_team: Option<Team>,
    #[serde(default = "default_turn")]
    pub current_turn: u32,
    #[serde(default = "default_red_remaining")]
    pub red_score: u32,
    #[serde(default = "default_blue_remaining")]
    pub blue_score: u32,
    #[serde(default)]
    pub game_status: GameStatus,
    #[serde(default)]
    pub winner: Option<Team>,
    #[serde(default)]
    pub players_count: u32,
    #[serde(default)]
    pub user_role: Role,
    #[serde(default)]
    pub user_team: Option<Team>,
    #[serde(default)]
    pub captains: CaptainsData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptainsData {
    #[serde(default)]
    pub red: bool,
    #[serde(default)]
    pub blue: bool,
}

fn default_turn() -> u32 {
    1
}

fn default_red_remaining() -> u32 {
    Team::Red.starting_cards()
}

fn default_blue_remaining() -> u32 {
    Team::Blue.starting_cards()
}

/// Identities arrive as numbers from some servers and strings from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_json() -> serde_json::Value {
        json!({
            "room_id": "ABCD",
            "words": vec!["w"; 25],
            "revealed": vec![false; 25],
            "current_team": "red",
            "current_turn": 1,
            "red_score": 9,
            "blue_score": 8,
            "game_status": "active",
            "winner": null,
            "players_count": 3,
            "user_role": "agent",
            "user_team": "blue",
            "captains": {"red": true, "blue": false}
        })
    }

    #[test]
    fn client_messages_use_action_tag() {
        let click = serde_json::to_value(ClientMessage::ClickCard { index: 7 }).expect("serialize");
        assert_eq!(click, json!({"action": "click_card", "index": 7}));
        let get = serde_json::to_value(ClientMessage::GetState).expect("serialize");
        assert_eq!(get, json!({"action": "get_state"}));
        let ping = serde_json::to_value(ClientMessage::Ping).expect("serialize");
        assert_eq!(ping, json!({"action": "ping"}));
    }

    #[test]
    fn init_frame_with_timestamp_parses() {
        let frame = json!({
            "type": "init",
            "room": "ABCD",
            "game_state": state_json(),
            "timestamp": "2024-01-01T00:00:00"
        });
        let msg: ServerMessage = serde_json::from_value(frame).expect("parse");
        let ServerMessage::Init { room, game_state } = msg else {
            panic!("expected init");
        };
        assert_eq!(room.as_deref(), Some("ABCD"));
        assert_eq!(game_state.words.len(), 25);
        assert!(game_state.colors.is_none());
        assert_eq!(game_state.user_team, Some(Team::Blue));
        assert!(game_state.captains.red);
    }

    #[test]
    fn card_revealed_accepts_numeric_user_id() {
        let frame = json!({"type": "card_revealed", "index": 4, "color": "black", "user_id": 42});
        let msg: ServerMessage = serde_json::from_value(frame).expect("parse");
        assert_eq!(
            msg,
            ServerMessage::CardRevealed {
                index: 4,
                color: CardColor::Black,
                user_id: Some("42".to_string()),
            }
        );
    }

    #[test]
    fn turn_switch_without_turn_number() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"turn_switch","current_team":"blue"}"#).expect("parse");
        assert_eq!(
            msg,
            ServerMessage::TurnSwitch {
                current_team: Team::Blue,
                current_turn: None
            }
        );
    }

    #[test]
    fn unknown_type_becomes_unknown() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"confetti","amount":3}"#).expect("parse");
        assert_eq!(msg, ServerMessage::Unknown);
        assert_eq!(msg.type_name(), "unknown");
    }

    #[test]
    fn error_message_is_optional() {
        let msg: ServerMessage = serde_json::from_str(r#"{"type":"error"}"#).expect("parse");
        assert_eq!(msg, ServerMessage::Error { message: None });
    }

    #[test]
    fn sparse_state_falls_back_to_defaults() {
        let sparse = json!({"words": [], "revealed": []});
        let state: GameStateData = serde_json::from_value(sparse).expect("parse");
        assert_eq!(state.red_score, 9);
        assert_eq!(state.blue_score, 8);
        assert_eq!(state.current_turn, 1);
        assert_eq!(state.user_role, Role::Agent);
        assert_eq!(state.game_status, GameStatus::Waiting);
    }
}
