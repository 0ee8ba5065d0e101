//! Game-state fixtures shared by the player's unit tests.

use codenames_domain::{BoardEvent, CardColor, GameBoard, GameStatus, Role, Team};
use codenames_shared::{CaptainsData, GameStateData, ServerMessage};

use crate::infrastructure::message_translator::snapshot_from_state;

/// Fresh active game in room `ABCD`; the viewer plays for red.
///
/// Ownership: 0-8 red, 9-16 blue, 17 black, the rest neutral.
pub fn game_state(role: Role) -> GameStateData {
    GameStateData {
        room_id: Some("ABCD".to_string()),
        words: (0..25).map(|i| format!("word{i}")).collect(),
        revealed: vec![false; 25],
        colors: role.sees_hidden_colors().then(colors),
        current_team: Some(Team::Red),
        current_turn: 1,
        red_score: 9,
        blue_score: 8,
        game_status: GameStatus::Active,
        winner: None,
        players_count: 2,
        user_role: role,
        user_team: Some(Team::Red),
        captains: CaptainsData {
            red: true,
            blue: true,
        },
    }
}

pub fn colors() -> Vec<CardColor> {
    (0..25)
        .map(|i| match i {
            0..=8 => CardColor::Red,
            9..=16 => CardColor::Blue,
            17 => CardColor::Black,
            _ => CardColor::Neutral,
        })
        .collect()
}

pub fn board(role: Role) -> GameBoard {
    let mut board = GameBoard::new();
    let snapshot = snapshot_from_state(game_state(role)).expect("fixture state is valid");
    board
        .apply(BoardEvent::Snapshot(snapshot))
        .expect("snapshot always applies");
    board
}

pub fn init_message(role: Role) -> ServerMessage {
    ServerMessage::Init {
        room: Some("ABCD".to_string()),
        game_state: game_state(role),
    }
}

pub fn frame(message: &ServerMessage) -> String {
    serde_json::to_string(message).expect("server message serializes")
}
