//! Renderers implementing the `GameView` port

pub mod terminal;

pub use terminal::TerminalView;
