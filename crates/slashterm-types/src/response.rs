//! Command responses and the signals attached to them.
//!
//! A response is opaque to the dispatcher: it carries content plus a
//! [`ContentKind`] that only the presentation layer interprets. Side effects
//! the presentation layer must perform (clearing the output pane, launching
//! a game, opening a form) travel as an optional [`Signal`].

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// How the presentation layer should interpret response content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Html,
    Markdown,
}

/// The embedded mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Pong,
    Golf,
}

impl Game {
    pub fn name(self) -> &'static str {
        match self {
            Game::Pong => "pong",
            Game::Golf => "golf",
        }
    }
}

/// Forms the special mode can open in place of the output pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Single masked password field.
    Password,
    /// Five letter code plus three digit decimal for the named file.
    Decrypt { file: String },
}

/// Side effect requested from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Clear the output pane.
    Clear,
    /// The theme changed; apply and persist it.
    ThemeChanged(Theme),
    /// Start a mini-game.
    LaunchGame(Game),
    /// Switch the terminal into special-mode appearance.
    EnterSpecialMode,
    /// Restore the normal terminal appearance.
    ExitSpecialMode,
    /// Render a form; the answer comes back through the dispatcher.
    Prompt(PromptKind),
}

/// A follow-up command offered under a response. Selecting it submits
/// `command` as if typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickCommand {
    pub command: String,
    pub description: String,
}

/// A titled row of follow-up commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickCommands {
    pub title: String,
    pub items: Vec<QuickCommand>,
}

/// Output produced by a command, trigger, or prompt answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub content: String,
    pub kind: ContentKind,
    pub signal: Option<Signal>,
    pub quick: Option<QuickCommands>,
}

impl CommandResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ContentKind::Text,
            signal: None,
            quick: None,
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ContentKind::Html,
            signal: None,
            quick: None,
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ContentKind::Markdown,
            signal: None,
            quick: None,
        }
    }

    /// Empty text response (renders nothing).
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Attach a signal, replacing any previous one.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Offer follow-up commands under the content. An empty list offers none.
    pub fn with_quick_commands(mut self, title: impl Into<String>, items: Vec<QuickCommand>) -> Self {
        self.quick = (!items.is_empty()).then(|| QuickCommands {
            title: title.into(),
            items,
        });
        self
    }

    /// `true` when there is nothing to render.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
