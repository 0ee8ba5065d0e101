//! Values that outlive a session: last room and identity, the board
//! orientation, and the one-time fullscreen hint.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::ports::outbound::{storage_keys, StorageProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Auto,
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Auto => "auto",
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Auto => "Auto-rotate",
            Orientation::Portrait => "Portrait mode",
            Orientation::Landscape => "Landscape mode",
        }
    }

    /// Cycling order of the orientation button
    pub fn next(&self) -> Orientation {
        match self {
            Orientation::Auto => Orientation::Portrait,
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Auto,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown orientation: {0:?} (expected auto, portrait or landscape)")]
pub struct ParseOrientationError(pub String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Orientation::Auto),
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(ParseOrientationError(s.trim().to_string())),
        }
    }
}

#[derive(Clone)]
pub struct PreferencesService {
    storage: Arc<dyn StorageProvider>,
}

impl PreferencesService {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    pub fn remember_session(&self, room: &str, identity: &str) {
        self.storage.save(storage_keys::LAST_ROOM, room);
        self.storage.save(storage_keys::LAST_USER, identity);
    }

    /// Last room and identity, only when both were stored.
    pub fn last_session(&self) -> Option<(String, String)> {
        let room = self.storage.load(storage_keys::LAST_ROOM)?;
        let identity = self.storage.load(storage_keys::LAST_USER)?;
        Some((room, identity))
    }

    pub fn orientation(&self) -> Orientation {
        self.storage
            .load(storage_keys::ORIENTATION)
            .and_then(|raw| match raw.parse() {
                Ok(orientation) => Some(orientation),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring stored orientation");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.storage
            .save(storage_keys::ORIENTATION, orientation.as_str());
    }

    /// True exactly once per installation.
    pub fn take_fullscreen_hint(&self) -> bool {
        if self.storage.load(storage_keys::FULLSCREEN_SUGGESTED).is_some() {
            return false;
        }
        self.storage.save(storage_keys::FULLSCREEN_SUGGESTED, "true");
        true
    }
}
