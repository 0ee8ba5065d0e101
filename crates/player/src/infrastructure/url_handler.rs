//! Launch parameters from the link the client was opened with.
//!
//! `https://host/?room=abcd&user_id=42` -> room `ABCD`, identity `42`.

use thiserror::Error;
use url::Url;

use crate::ports::outbound::{storage_keys, StorageProvider};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("Invalid launch link: {0}")]
    InvalidLink(String),
    #[error("No room id in the launch link")]
    MissingRoom,
    #[error("No user id in the launch link")]
    MissingIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    /// Always uppercase
    pub room: String,
    pub identity: String,
    /// The link itself, used for sharing
    pub link: Option<Url>,
}

impl LaunchParams {
    pub fn new(room: &str, identity: &str) -> Result<Self, LaunchError> {
        let room = normalize_room(room).ok_or(LaunchError::MissingRoom)?;
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(LaunchError::MissingIdentity);
        }
        Ok(Self {
            room,
            identity: identity.to_string(),
            link: None,
        })
    }

    pub fn from_link(link: &str) -> Result<Self, LaunchError> {
        let url = Url::parse(link).map_err(|e| LaunchError::InvalidLink(e.to_string()))?;
        let (room, identity) = query_params(&url);
        let mut params = Self::new(
            room.as_deref().unwrap_or_default(),
            identity.as_deref().unwrap_or_default(),
        )?;
        params.link = Some(url);
        Ok(params)
    }

    /// Resume the last session stored on this machine.
    pub fn from_storage(storage: &dyn StorageProvider) -> Result<Self, LaunchError> {
        let room = storage.load(storage_keys::LAST_ROOM).unwrap_or_default();
        let identity = storage.load(storage_keys::LAST_USER).unwrap_or_default();
        Self::new(&room, &identity)
    }
}

/// Raw `room` and `user_id` query values, room already uppercased.
pub fn query_params(url: &Url) -> (Option<String>, Option<String>) {
    let mut room = None;
    let mut identity = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "room" => room = normalize_room(&value),
            "user_id" => identity = Some(value.trim().to_string()).filter(|v| !v.is_empty()),
            _ => {}
        }
    }
    (room, identity)
}

fn normalize_room(raw: &str) -> Option<String> {
    let room = raw.trim().to_uppercase();
    // A literal "null" shows up when the link was built from a missing value
    if room.is_empty() || room == "NULL" {
        None
    } else {
        Some(room)
    }
}
