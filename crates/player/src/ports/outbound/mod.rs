//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with external systems without
//! depending on concrete implementations.

pub mod game_view;
pub mod platform;
pub mod player_events;
pub mod transport;

#[cfg(test)]
pub use game_view::MockGameView;
pub use game_view::{ConnectionStatus, GameInfo, GameView, Notification, NotificationLevel};
#[cfg(test)]
pub use platform::MockClipboardProvider;
pub use platform::{storage_keys, ClipboardError, ClipboardProvider, StorageProvider};
pub use player_events::{EventKind, PlayerEvent};
pub use transport::{Connector, Link, LinkEvent, TransportError};
