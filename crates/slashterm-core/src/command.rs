//! The command trait and its autocomplete metadata.

use async_trait::async_trait;
use slashterm_types::{CommandResponse, Result};

/// A subcommand or argument a command advertises to autocomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub name: String,
    pub description: String,
    /// Placeholder shown after the name, e.g. `<year>`.
    pub params: Option<String>,
}

impl SuggestionItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Text shown in the suggestion list: the name plus its placeholder.
    pub fn display_text(&self) -> String {
        match &self.params {
            Some(p) => format!("{} {p}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Subcommands and arguments a command declares for autocomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSuggestions {
    pub subcommands: Vec<SuggestionItem>,
    pub arguments: Vec<SuggestionItem>,
}

impl CommandSuggestions {
    /// Subcommands first, then arguments.
    pub fn items(&self) -> impl Iterator<Item = &SuggestionItem> {
        self.subcommands.iter().chain(self.arguments.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.subcommands.is_empty() && self.arguments.is_empty()
    }
}

/// A single executable command.
///
/// Handlers run on the UI thread, so the trait is not `Send`. Collaborator
/// state a handler needs (theme, content store) lives in the implementing
/// struct.
#[async_trait(?Send)]
pub trait Command {
    /// Canonical name (what the user types after the marker).
    fn name(&self) -> &str;

    /// One-line description for help and autocomplete.
    fn description(&self) -> &str;

    /// Alternative names resolving to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Autocomplete metadata, if the command takes subcommands or arguments.
    fn suggestions(&self) -> Option<CommandSuggestions> {
        None
    }

    /// Run the command. `args` is the raw single-space split of everything
    /// after the name, so it may contain empty strings.
    async fn execute(&self, args: &[String]) -> Result<CommandResponse>;
}
