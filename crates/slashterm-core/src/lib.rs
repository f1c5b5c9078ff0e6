//! Command dispatch engine for slashterm.
//!
//! Commands implement the [`Command`] trait and are registered by name and
//! aliases. The [`Dispatcher`] routes each submitted line to a command, a
//! free-text trigger, or the special-mode controller, and answers
//! autocomplete and history queries.

mod command;
mod dispatcher;
mod history;
pub mod quick;
mod registry;
pub mod special;
mod suggest;
pub mod triggers;

/// A single executable command trait.
pub use command::Command;
/// Autocomplete metadata a command advertises.
pub use command::{CommandSuggestions, SuggestionItem};
/// Line router and session state machine.
pub use dispatcher::{Dispatcher, Mode, SessionEvent};
/// Submitted-line history with a recall cursor.
pub use history::History;
/// Registry of available commands.
pub use registry::CommandRegistry;
/// Special-mode controller and its puzzle types.
pub use special::{DecryptForm, PuzzleStage, SpecialMode};
/// Autocomplete engine.
pub use suggest::{AutocompleteSuggestion, CompletionEntry, CompletionSource, Suggester};
/// Free-text trigger table and session context.
pub use triggers::{ContextTag, MatchKind, Trigger, TriggerAction, TriggerTable};
