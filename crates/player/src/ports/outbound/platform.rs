//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations

use thiserror::Error;

/// Persistent storage abstraction (file-based on desktop)
pub trait StorageProvider: Send + Sync + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable")]
    Unavailable,
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait ClipboardProvider: Send + Sync + 'static {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application.
pub mod storage_keys {
    pub const LAST_ROOM: &str = "last_room";
    pub const LAST_USER: &str = "last_user";
    pub const ORIENTATION: &str = "codenames_orientation";
    pub const FULLSCREEN_SUGGESTED: &str = "fullscreen_suggested";
}
