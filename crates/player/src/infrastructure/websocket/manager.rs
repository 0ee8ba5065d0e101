//! Connection manager - one logical channel per room, with reconnects.
//!
//! All connection state is owned by a single actor task. The public
//! [`ConnectionManager`] handle only queues commands, registers listeners and
//! reads the published state, so nothing here needs a lock around the
//! connection itself.
//!
//! # Lifecycle
//!
//! `Disconnected -> Connecting -> Connected -> (close) Reconnecting ->
//! Connecting | Failed`
//!
//! Every `connect` bumps an epoch. Open results and reconnect timers carry the
//! epoch they were started under and are ignored once it is stale.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use url::Url;

use codenames_shared::ClientMessage;

use crate::infrastructure::client_config::{ClientConfig, ConfigError};
use crate::infrastructure::messaging::{
    ConnectionState, ConnectionStateCell, ConnectionStateObserver, EventBus, ListenerId,
};
use crate::infrastructure::websocket::core::BackoffState;
use crate::infrastructure::websocket::message_builder::ClientMessageBuilder;
use crate::infrastructure::websocket::shared::{
    encode_client_message, parse_server_message, PING_INTERVAL_MS,
};
use crate::ports::outbound::{
    Connector, EventKind, Link, LinkEvent, PlayerEvent, TransportError,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Room id is required")]
    MissingRoom,
    #[error("User id is required")]
    MissingIdentity,
    #[error(transparent)]
    Address(#[from] ConfigError),
    #[error("Connection manager has shut down")]
    Closed,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Not connected")]
    NotConnected,
    #[error("Outbound buffer full")]
    Backpressure,
    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Timing knobs for the manager, taken from [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub max_reconnect_attempts: u32,
    pub reconnect_base_delay: Duration,
    pub ping_interval: Duration,
}

impl From<&ClientConfig> for ConnectionSettings {
    fn from(config: &ClientConfig) -> Self {
        // tokio intervals panic on a zero period
        let ping_interval = if config.ping_interval.is_zero() {
            tracing::warn!(
                default_ms = PING_INTERVAL_MS,
                "Zero ping interval configured, using default"
            );
            Duration::from_millis(PING_INTERVAL_MS)
        } else {
            config.ping_interval
        };
        Self {
            max_reconnect_attempts: config.max_reconnect_attempts,
            reconnect_base_delay: config.reconnect_base_delay,
            ping_interval,
        }
    }
}

enum Command {
    Connect { url: Url },
    Disconnect,
}

enum Internal {
    Opened {
        epoch: u64,
        result: Result<Link, TransportError>,
    },
    ReconnectDue {
        epoch: u64,
    },
}

type SharedOutbound = Arc<Mutex<Option<mpsc::Sender<String>>>>;

/// Handle to the connection actor. Cheap to clone.
#[derive(Clone)]
pub struct ConnectionManager {
    config: Arc<ClientConfig>,
    commands: mpsc::UnboundedSender<Command>,
    outbound: SharedOutbound,
    observer: ConnectionStateObserver,
    state_rx: watch::Receiver<ConnectionState>,
    bus: EventBus,
}

impl ConnectionManager {
    /// Spawn the actor. Must be called inside a tokio runtime.
    pub fn new(config: ClientConfig, connector: Arc<dyn Connector>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let outbound: SharedOutbound = Arc::new(Mutex::new(None));
        let state = ConnectionStateCell::new();
        let observer = state.observer();
        let state_rx = state.subscribe();
        let bus = EventBus::new();
        let settings = ConnectionSettings::from(&config);

        let actor = ManagerActor {
            connector,
            backoff: BackoffState::new(
                settings.reconnect_base_delay,
                settings.max_reconnect_attempts,
            ),
            settings,
            bus: bus.clone(),
            state,
            outbound: Arc::clone(&outbound),
            internal_tx,
            epoch: 0,
            url: None,
            link: None,
            pending: None,
            ping: None,
        };
        tokio::spawn(actor.run(command_rx, internal_rx));

        Self {
            config: Arc::new(config),
            commands,
            outbound,
            observer,
            state_rx,
            bus,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a channel for `room` as `identity`, replacing any existing one.
    ///
    /// Blank arguments fail immediately and open nothing.
    pub fn connect(&self, room: &str, identity: &str) -> Result<(), ConnectError> {
        let room = room.trim();
        let identity = identity.trim();
        if room.is_empty() {
            return Err(ConnectError::MissingRoom);
        }
        if identity.is_empty() {
            return Err(ConnectError::MissingIdentity);
        }
        let url = self.config.ws_url(room, identity)?;
        tracing::info!(room = %room, url = %url, "Connecting");
        self.commands
            .send(Command::Connect { url })
            .map_err(|_| ConnectError::Closed)
    }

    /// Intentional close. No retry follows.
    pub fn disconnect(&self) {
        if self.commands.send(Command::Disconnect).is_err() {
            tracing::debug!("Disconnect requested after manager shut down");
        }
    }

    /// Serialize and transmit. Nothing is queued while disconnected.
    pub fn send(&self, message: ClientMessage) -> Result<(), SendError> {
        if !self.observer.is_connected() {
            return Err(SendError::NotConnected);
        }
        let text = encode_client_message(&message)?;
        let guard = self
            .outbound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(tx) = guard.as_ref() else {
            return Err(SendError::NotConnected);
        };
        tx.try_send(text).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::Backpressure,
            mpsc::error::TrySendError::Closed(_) => SendError::NotConnected,
        })
    }

    pub fn on(
        &self,
        kind: EventKind,
        listener: impl Fn(&PlayerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.bus.subscribe(kind, listener)
    }

    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        self.bus.unsubscribe(kind, id)
    }

    pub fn state(&self) -> ConnectionState {
        self.observer.state()
    }

    pub fn is_connected(&self) -> bool {
        self.observer.is_connected()
    }

    pub fn observer(&self) -> ConnectionStateObserver {
        self.observer.clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }
}

struct ManagerActor {
    connector: Arc<dyn Connector>,
    settings: ConnectionSettings,
    backoff: BackoffState,
    bus: EventBus,
    state: ConnectionStateCell,
    outbound: SharedOutbound,
    internal_tx: mpsc::UnboundedSender<Internal>,
    epoch: u64,
    url: Option<Url>,
    link: Option<mpsc::Receiver<LinkEvent>>,
    /// Open attempt or reconnect timer in flight
    pending: Option<JoinHandle<()>>,
    ping: Option<Interval>,
}

impl ManagerActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut internal: mpsc::UnboundedReceiver<Internal>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(msg) = internal.recv() => self.handle_internal(msg),
                event = next_link_event(&mut self.link) => self.handle_link_event(event),
                _ = next_ping(&mut self.ping) => self.send_ping(),
            }
        }

        tracing::debug!("Connection manager handle dropped, shutting down");
        self.teardown();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect { url } => {
                self.teardown();
                self.epoch += 1;
                self.backoff.reset();
                self.url = Some(url);
                self.open();
            }
            Command::Disconnect => {
                let was_active = self.link.is_some() || self.pending.is_some();
                self.teardown();
                self.epoch += 1;
                self.state.set(ConnectionState::Disconnected);
                if was_active {
                    self.emit(PlayerEvent::Disconnected { will_retry: false });
                }
                tracing::info!("Disconnected on request");
            }
        }
    }

    fn handle_internal(&mut self, msg: Internal) {
        match msg {
            Internal::Opened { epoch, result } if epoch == self.epoch => {
                self.pending = None;
                match result {
                    Ok(link) => self.on_open(link),
                    Err(e) => {
                        tracing::warn!(attempt = self.backoff.attempts(), error = %e, "Open failed");
                        self.emit(PlayerEvent::TransportError {
                            message: e.to_string(),
                        });
                        self.schedule_reconnect();
                    }
                }
            }
            Internal::ReconnectDue { epoch } if epoch == self.epoch => {
                self.pending = None;
                self.open();
            }
            Internal::Opened { epoch, .. } | Internal::ReconnectDue { epoch } => {
                tracing::trace!(stale = epoch, current = self.epoch, "Ignoring stale work");
            }
        }
    }

    fn handle_link_event(&mut self, event: Option<LinkEvent>) {
        match event {
            Some(LinkEvent::Text(text)) => match parse_server_message(&text) {
                Ok(msg) => {
                    tracing::trace!(kind = msg.type_name(), "Frame received");
                    self.emit(PlayerEvent::Server(msg));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping malformed frame");
                }
            },
            Some(LinkEvent::Closed { reason }) => self.on_close(reason),
            None => self.on_close(None),
        }
    }

    fn open(&mut self) {
        let Some(url) = self.url.clone() else {
            return;
        };
        self.state.set(ConnectionState::Connecting);

        let connector = Arc::clone(&self.connector);
        let tx = self.internal_tx.clone();
        let epoch = self.epoch;
        self.pending = Some(tokio::spawn(async move {
            let result = connector.open(&url).await;
            let _ = tx.send(Internal::Opened { epoch, result });
        }));
    }

    fn on_open(&mut self, link: Link) {
        let Link { outbound, inbound } = link;
        self.backoff.reset();
        self.link = Some(inbound);
        *self.lock_outbound() = Some(outbound);
        self.state.set(ConnectionState::Connected);

        let period = self.settings.ping_interval;
        let mut ping = interval_at(Instant::now() + period, period);
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ping = Some(ping);

        tracing::info!(url = ?self.url.as_ref().map(Url::as_str), "Connected");
        self.emit(PlayerEvent::Connected);
        self.transmit(ClientMessageBuilder::get_state());
    }

    fn on_close(&mut self, reason: Option<String>) {
        self.drop_link();
        let will_retry = !self.backoff.is_exhausted();
        tracing::warn!(reason = ?reason, will_retry, "Connection closed");
        self.emit(PlayerEvent::Disconnected { will_retry });
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&mut self) {
        let Some((attempt, delay)) = self.backoff.next_delay_and_advance() else {
            tracing::error!(
                attempts = self.backoff.max_attempts(),
                "Max reconnection attempts reached, giving up"
            );
            self.state.set(ConnectionState::Failed);
            self.emit(PlayerEvent::ReconnectFailed);
            return;
        };

        tracing::info!(
            attempt,
            max = self.backoff.max_attempts(),
            delay_ms = delay.as_millis() as u64,
            "Scheduling reconnect"
        );
        self.state.set(ConnectionState::Reconnecting);
        self.emit(PlayerEvent::Reconnecting { attempt, delay });

        let tx = self.internal_tx.clone();
        let epoch = self.epoch;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Internal::ReconnectDue { epoch });
        }));
    }

    fn send_ping(&mut self) {
        tracing::trace!("Ping");
        self.transmit(ClientMessageBuilder::ping());
    }

    /// Best-effort send from inside the actor.
    fn transmit(&mut self, message: ClientMessage) {
        let text = match encode_client_message(&message) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize message");
                return;
            }
        };
        if let Some(tx) = self.lock_outbound().as_ref() {
            if let Err(e) = tx.try_send(text) {
                tracing::warn!(error = %e, "Failed to queue outbound frame");
            }
        }
    }

    fn emit(&self, event: PlayerEvent) {
        self.bus.dispatch(&event);
    }

    fn drop_link(&mut self) {
        self.link = None;
        self.ping = None;
        self.lock_outbound().take();
    }

    /// Close the current link and cancel any open attempt or timer.
    fn teardown(&mut self) {
        self.drop_link();
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    fn lock_outbound(&self) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<String>>> {
        self.outbound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn next_link_event(link: &mut Option<mpsc::Receiver<LinkEvent>>) -> Option<LinkEvent> {
    match link {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn next_ping(ping: &mut Option<Interval>) {
    match ping {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
