//! Codenames player client.
//!
//! Connection management with linear-backoff reconnect, the board reducer
//! wiring, hold-to-confirm card selection and a terminal renderer.

pub mod app;
pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use app::{GameClient, ShareError, StartError};
