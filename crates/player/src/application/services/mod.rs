//! Application services
//!
//! Use cases of the player client. Services talk to the connection manager
//! and to port traits, never to a concrete renderer or platform.

pub mod card_selection;
pub mod game_service;
pub mod preferences_service;
pub mod share_service;

pub use card_selection::CardSelectionService;
pub use game_service::{game_info, GameService, SharedBoard};
pub use preferences_service::{Orientation, ParseOrientationError, PreferencesService};
pub use share_service::ShareService;
