//! Foundation types for slashterm.
//!
//! This crate contains the types shared by every slashterm crate: command
//! responses and signals, the theme preference, configuration, line-level
//! input events, and the error type.

pub mod config;
pub mod error;
pub mod input;
pub mod response;
pub mod theme;

pub use config::{ShellConfig, SpecialConfig};
pub use error::{Result, ShellError};
pub use input::InputEvent;
pub use response::{
    CommandResponse, ContentKind, Game, PromptKind, QuickCommand, QuickCommands, Signal,
};
pub use theme::Theme;
