//! Translates protocol messages into domain board events
//!
//! Keeps the domain crate free of wire types: the reducer only ever sees
//! [`BoardEvent`]s built here.

use codenames_domain::{
    BoardEvent, CaptainSeats, DomainError, GameSnapshot, SnapshotParts, TeamCounts, Viewer,
};
use codenames_shared::{GameStateData, ServerMessage};

/// Convert a wire snapshot, validating that its sequences line up.
pub fn snapshot_from_state(data: GameStateData) -> Result<GameSnapshot, DomainError> {
    GameSnapshot::from_parts(SnapshotParts {
        room_id: data.room_id,
        words: data.words,
        revealed: data.revealed,
        colors: data.colors,
        current_team: data.current_team,
        current_turn: data.current_turn,
        remaining: TeamCounts::new(data.red_score, data.blue_score),
        status: data.game_status,
        winner: data.winner,
        players_count: data.players_count,
        viewer: Viewer {
            role: data.user_role,
            team: data.user_team,
        },
        captains: CaptainSeats {
            red: data.captains.red,
            blue: data.captains.blue,
        },
    })
}

/// Board events carried by a server message, in application order.
///
/// Messages that do not touch the board translate to an empty list.
pub fn translate(msg: &ServerMessage) -> Result<Vec<BoardEvent>, DomainError> {
    let events = match msg {
        ServerMessage::Init { game_state, .. } | ServerMessage::StateUpdate { game_state } => {
            vec![BoardEvent::Snapshot(snapshot_from_state(game_state.clone())?)]
        }
        ServerMessage::CardRevealed { index, color, .. } => vec![BoardEvent::CardRevealed {
            index: *index,
            color: *color,
        }],
        ServerMessage::TurnSwitch {
            current_team,
            current_turn,
        } => vec![BoardEvent::TurnSwitched {
            team: *current_team,
            turn: *current_turn,
        }],
        ServerMessage::PlayerJoined { players_count, .. }
        | ServerMessage::PlayerLeft { players_count, .. } => vec![BoardEvent::PlayersChanged {
            count: *players_count,
        }],
        // The attached state is the clicking player's view, broadcast to the
        // whole room. Applying it would replace this client's viewer.
        ServerMessage::GameOver { winner, .. } => {
            vec![BoardEvent::GameOver { winner: *winner }]
        }
        ServerMessage::Error { .. } | ServerMessage::Pong | ServerMessage::Unknown => Vec::new(),
    };
    Ok(events)
}
