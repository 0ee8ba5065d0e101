//! Game service: feeds server traffic through the board reducer and drives
//! the renderer with whatever changed.

use std::sync::{Arc, Mutex, MutexGuard};

use codenames_domain::{BoardChange, BoardEvent, CardView, GameBoard, Team};
use codenames_shared::ServerMessage;

use super::card_selection::CardSelectionService;
use crate::infrastructure::message_translator;
use crate::infrastructure::messaging::ConnectionState;
use crate::ports::outbound::{ConnectionStatus, GameInfo, GameView, Notification, PlayerEvent};

/// Board shared between the game service and card selection.
pub type SharedBoard = Arc<Mutex<GameBoard>>;

pub(crate) fn lock_board(board: &SharedBoard) -> MutexGuard<'_, GameBoard> {
    board.lock().unwrap_or_else(|e| e.into_inner())
}

pub const DEFAULT_SERVER_ERROR: &str = "Server error";

/// View work collected under the board lock and run after it is released.
enum Render {
    Board(Vec<CardView>, GameInfo),
    Card(CardView),
    Info(GameInfo),
    Turn(Team, bool),
    GameOver(Team),
}

#[derive(Clone)]
pub struct GameService {
    board: SharedBoard,
    view: Arc<dyn GameView>,
    selection: CardSelectionService,
}

impl GameService {
    pub fn new(board: SharedBoard, view: Arc<dyn GameView>, selection: CardSelectionService) -> Self {
        Self {
            board,
            view,
            selection,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn handle(&self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Server(message) => self.handle_server_message(message),
            PlayerEvent::Connected => {
                self.view
                    .set_connection_status(ConnectionStatus::State(ConnectionState::Connected));
                self.view.notify(Notification::success("Connected"));
            }
            PlayerEvent::Disconnected { will_retry } => {
                tracing::debug!(will_retry, "Connection lost");
                self.selection.clear_all();
                self.view
                    .set_connection_status(ConnectionStatus::State(ConnectionState::Disconnected));
            }
            PlayerEvent::Reconnecting { attempt, delay } => {
                self.view.set_connection_status(ConnectionStatus::Reconnecting {
                    attempt: *attempt,
                    delay_ms: delay.as_millis() as u64,
                });
            }
            PlayerEvent::ReconnectFailed => {
                self.view
                    .set_connection_status(ConnectionStatus::ReloadRequired);
                self.view
                    .notify(Notification::error("Could not connect to the server"));
            }
            PlayerEvent::TransportError { message } => {
                tracing::warn!(error = %message, "Transport error");
            }
        }
    }

    pub fn handle_server_message(&self, message: &ServerMessage) {
        match message {
            ServerMessage::Error { message } => {
                let text = message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(DEFAULT_SERVER_ERROR);
                self.view.notify(Notification::error(text));
                return;
            }
            ServerMessage::Pong => {
                tracing::trace!("Pong");
                return;
            }
            ServerMessage::Unknown => {
                tracing::debug!("Ignoring unknown server message");
                return;
            }
            _ => {}
        }

        let events = match message_translator::translate(message) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(kind = message.type_name(), error = %e, "Discarding invalid game state");
                return;
            }
        };

        for event in events {
            self.apply(event);
        }

        match message {
            ServerMessage::Init { .. } => self.view.notify(Notification::success("Game loaded")),
            ServerMessage::PlayerJoined { players_count, .. } => self.view.notify(
                Notification::info(format!("New player joined. Total: {players_count}")),
            ),
            ServerMessage::PlayerLeft { players_count, .. } => self.view.notify(
                Notification::warning(format!("A player left. Total: {players_count}")),
            ),
            _ => {}
        }
    }

    fn apply(&self, event: BoardEvent) {
        let name = event.name();
        if matches!(event, BoardEvent::Snapshot(_)) {
            self.selection.clear_all();
        }

        let renders = {
            let mut board = lock_board(&self.board);
            match board.apply(event) {
                Ok(changes) => collect_renders(&board, changes),
                Err(e) => {
                    tracing::warn!(event = name, error = %e, "Board rejected event");
                    return;
                }
            }
        };

        for render in renders {
            match render {
                Render::Board(cards, info) => self.view.render_board(cards, info),
                Render::Card(card) => self.view.update_card(card),
                Render::Info(info) => self.view.update_game_info(info),
                Render::Turn(team, changed) => {
                    self.view.show_turn(team, changed);
                    if changed {
                        self.view.notify(Notification::info(format!(
                            "{} team's turn",
                            team.display_name()
                        )));
                    }
                }
                Render::GameOver(winner) => self.view.show_game_over(winner),
            }
        }
    }
}

pub fn game_info(board: &GameBoard) -> Option<GameInfo> {
    let snapshot = board.snapshot()?;
    Some(GameInfo {
        room_id: snapshot.room_id().map(str::to_string),
        current_team: snapshot.current_team(),
        current_turn: snapshot.current_turn(),
        remaining: snapshot.remaining(),
        players_count: snapshot.players_count(),
        stats: board.stats()?,
    })
}

fn collect_renders(board: &GameBoard, changes: Vec<BoardChange>) -> Vec<Render> {
    let mut renders = Vec::with_capacity(changes.len());
    for change in changes {
        match change {
            BoardChange::FullRender => {
                if let Some(info) = game_info(board) {
                    renders.push(Render::Board(board.card_views(), info));
                }
            }
            BoardChange::CardRevealed { index, .. } => {
                if let Some(card) = board.card_view(index) {
                    renders.push(Render::Card(card));
                }
            }
            BoardChange::ScoreChanged { .. } | BoardChange::PlayersChanged { .. } => {
                if let Some(info) = game_info(board) {
                    renders.push(Render::Info(info));
                }
            }
            BoardChange::TurnChanged { team, changed, .. } => {
                if let Some(info) = game_info(board) {
                    renders.push(Render::Info(info));
                }
                renders.push(Render::Turn(team, changed));
            }
            BoardChange::GameOver { winner } => renders.push(Render::GameOver(winner)),
        }
    }
    renders
}
