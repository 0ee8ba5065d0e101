//! Composition root of the player client
//!
//! [`GameClient`] owns one instance of every collaborator and wires the
//! connection manager's events into the game service. Nothing here is
//! global; the binary builds exactly one client.

use std::sync::{Arc, Mutex, MutexGuard};

use codenames_domain::{GameBoard, HoldEvent, HoldTransition};
use thiserror::Error;
use url::Url;

use crate::application::services::{
    game_service::lock_board, CardSelectionService, GameService, Orientation, PreferencesService,
    SharedBoard, ShareService,
};
use crate::infrastructure::client_config::ClientConfig;
use crate::infrastructure::messaging::{ConnectionState, ListenerId};
use crate::infrastructure::url_handler::{LaunchError, LaunchParams};
use crate::infrastructure::websocket::{ConnectError, ConnectionManager};
use crate::ports::outbound::{
    ClipboardError, ClipboardProvider, Connector, EventKind, GameView, Notification,
    StorageProvider,
};

/// Events the game service reacts to. `Message` is left out so server
/// frames are not handled twice.
const WIRED_EVENTS: [EventKind; 13] = [
    EventKind::Init,
    EventKind::StateUpdate,
    EventKind::CardRevealed,
    EventKind::TurnSwitch,
    EventKind::PlayerJoined,
    EventKind::PlayerLeft,
    EventKind::GameOver,
    EventKind::Error,
    EventKind::Connected,
    EventKind::Disconnected,
    EventKind::Reconnecting,
    EventKind::ReconnectFailed,
    EventKind::TransportError,
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("No game session to share")]
    NoSession,
    #[error("The game is not over yet")]
    NotFinished,
    #[error("Invalid invite link: {0}")]
    Link(String),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

pub struct GameClient {
    connection: ConnectionManager,
    board: SharedBoard,
    view: Arc<dyn GameView>,
    game: GameService,
    selection: CardSelectionService,
    share: ShareService,
    preferences: PreferencesService,
    session: Mutex<Option<LaunchParams>>,
    listeners: Mutex<Vec<(EventKind, ListenerId)>>,
}

impl GameClient {
    /// Build the client. Must be called inside a tokio runtime.
    pub fn new(
        config: ClientConfig,
        connector: Arc<dyn Connector>,
        view: Arc<dyn GameView>,
        storage: Arc<dyn StorageProvider>,
        clipboard: Arc<dyn ClipboardProvider>,
    ) -> Self {
        let connection = ConnectionManager::new(config, connector);
        let board: SharedBoard = Arc::new(Mutex::new(GameBoard::new()));
        let selection =
            CardSelectionService::new(Arc::clone(&board), connection.clone(), Arc::clone(&view));
        let game = GameService::new(Arc::clone(&board), Arc::clone(&view), selection.clone());

        Self {
            connection,
            board,
            share: ShareService::new(clipboard, Arc::clone(&view)),
            preferences: PreferencesService::new(storage),
            view,
            game,
            selection,
            session: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Start from the link the client was opened with.
    pub fn start_from_link(&self, link: &str) -> Result<(), StartError> {
        self.start(LaunchParams::from_link(link))
    }

    /// Validate launch parameters and connect. A missing room or identity
    /// shows the fatal error screen; nothing is retried.
    pub fn start(&self, launch: Result<LaunchParams, LaunchError>) -> Result<(), StartError> {
        let params = match launch {
            Ok(params) => params,
            Err(e) => {
                tracing::error!(error = %e, "Cannot start without launch parameters");
                self.view.show_fatal_error(e.to_string());
                return Err(e.into());
            }
        };

        tracing::info!(room = %params.room, identity = %params.identity, "Starting game client");
        self.preferences
            .remember_session(&params.room, &params.identity);
        self.wire_listeners();

        if let Err(e) = self.connection.connect(&params.room, &params.identity) {
            tracing::error!(error = %e, "Connect rejected");
            self.view.show_fatal_error(e.to_string());
            return Err(e.into());
        }
        *self.lock_session() = Some(params);
        Ok(())
    }

    fn wire_listeners(&self) {
        let mut listeners = self.lock_listeners();
        if !listeners.is_empty() {
            return;
        }
        for kind in WIRED_EVENTS {
            let game = self.game.clone();
            let id = self.connection.on(kind, move |event| game.handle(event));
            listeners.push((kind, id));
        }
    }

    /// Window or app came back to the foreground. Reconnects right away when
    /// the link is down, skipping any backoff wait. Returns whether a
    /// reconnect was started.
    pub fn on_focus_regained(&self) -> bool {
        match self.connection.state() {
            ConnectionState::Connected | ConnectionState::Connecting => return false,
            ConnectionState::Disconnected
            | ConnectionState::Reconnecting
            | ConnectionState::Failed => {}
        }

        let target = self
            .lock_session()
            .as_ref()
            .map(|p| (p.room.clone(), p.identity.clone()))
            .or_else(|| self.preferences.last_session());
        let Some((room, identity)) = target else {
            tracing::debug!("Focus regained but no session to resume");
            return false;
        };

        tracing::info!(room = %room, "Focus regained, reconnecting now");
        match self.connection.connect(&room, &identity) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Reconnect on focus failed");
                false
            }
        }
    }

    pub fn press_card(&self, index: usize) -> HoldTransition {
        self.selection.press(index)
    }

    pub fn release_card(&self, index: usize) -> HoldTransition {
        self.selection.release(index)
    }

    pub fn cancel_card(&self, index: usize, event: HoldEvent) -> HoldTransition {
        self.selection.cancel(index, event)
    }

    /// Link other players can open to join this room.
    pub fn invite_link(&self) -> Result<Url, ShareError> {
        let session = self.lock_session();
        let params = session.as_ref().ok_or(ShareError::NoSession)?;
        match &params.link {
            Some(link) => Ok(link.clone()),
            None => self
                .connection
                .config()
                .page_url(&params.room)
                .map_err(|e| ShareError::Link(e.to_string())),
        }
    }

    pub fn copy_link(&self) -> Result<(), ShareError> {
        let link = self.invite_link()?;
        Ok(self.share.copy_link(&link)?)
    }

    /// Copy the result summary once the game has a winner.
    pub fn share_text(&self) -> Result<(), ShareError> {
        let link = self.invite_link()?;
        let winner = lock_board(&self.board)
            .winner()
            .ok_or(ShareError::NotFinished)?;
        let room = self.room().ok_or(ShareError::NoSession)?;
        Ok(self.share.share_results(winner, &room, &link)?)
    }

    /// Copy the `/key` command for the chat bot.
    pub fn request_key(&self) -> Result<(), ShareError> {
        let room = self.room().ok_or(ShareError::NoSession)?;
        Ok(self.share.request_key(&room)?)
    }

    pub fn orientation(&self) -> Orientation {
        self.preferences.orientation()
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.preferences.set_orientation(orientation);
        self.view.notify(Notification::info(orientation.label()));
    }

    /// True only the first time it is ever asked.
    pub fn take_fullscreen_hint(&self) -> bool {
        self.preferences.take_fullscreen_hint()
    }

    pub fn room(&self) -> Option<String> {
        self.lock_session().as_ref().map(|p| p.room.clone())
    }

    pub fn board(&self) -> SharedBoard {
        Arc::clone(&self.board)
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Drop listeners and pending holds, then close the link.
    pub fn shutdown(&self) {
        for (kind, id) in self.lock_listeners().drain(..) {
            self.connection.off(kind, id);
        }
        self.selection.clear_all();
        self.connection.disconnect();
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<LaunchParams>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(EventKind, ListenerId)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}
