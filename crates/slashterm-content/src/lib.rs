//! Content commands for slashterm.
//!
//! Everything a visitor can read (help, about, resume, contact) plus the
//! presentation toggles (theme, clear, play). Handlers fetch data through a
//! [`ContentStore`] and report presentation changes as response signals.

mod commands;
pub mod info_commands;
pub mod resume;
pub mod store;
pub mod ui_commands;

/// Register all built-in content commands into a registry.
pub use commands::{ContentContext, register_builtins};
/// Help listing shared with the registry.
pub use info_commands::{ContactDetails, HelpIndex};
/// Content fetch contract and its filesystem implementation.
pub use store::{ContentStore, FsContentStore};
/// Shared theme state.
pub use ui_commands::ThemeState;
