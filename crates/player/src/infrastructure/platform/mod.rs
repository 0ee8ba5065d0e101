//! Platform implementations of the storage and clipboard ports
//!
//! `desktop` is used by the binary; `mock` keeps everything in memory.

mod desktop;
pub mod mock;

pub use desktop::{DesktopStorageProvider, TerminalClipboard};
pub use mock::{MemoryClipboard, MemoryStorage};
