//! Codenames Protocol - wire types exchanged with the game server
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Forward compatible** - unknown message types never fail to parse

pub mod messages;

pub use messages::{CaptainsData, ClientMessage, GameStateData, ServerMessage};
