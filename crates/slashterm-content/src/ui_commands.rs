//! Presentation commands: theme, clear, play.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use slashterm_core::quick::{QuickSet, quick_commands};
use slashterm_core::{Command, CommandSuggestions, SuggestionItem};
use slashterm_types::{CommandResponse, Game, Result, Signal, Theme};

/// The active theme, shared between the theme command and its host.
#[derive(Debug, Clone, Default)]
pub struct ThemeState(Rc<Cell<Theme>>);

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self(Rc::new(Cell::new(theme)))
    }

    pub fn get(&self) -> Theme {
        self.0.get()
    }

    pub fn set(&self, theme: Theme) {
        self.0.set(theme);
    }

    /// Flip the theme and return the new one.
    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

pub(crate) struct ThemeCmd {
    state: ThemeState,
}

impl ThemeCmd {
    pub(crate) fn new(state: ThemeState) -> Self {
        Self { state }
    }
}

#[async_trait(?Send)]
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "Toggle between light and dark theme"
    }
    fn aliases(&self) -> &[&str] {
        &["dark", "light"]
    }
    fn suggestions(&self) -> Option<CommandSuggestions> {
        Some(CommandSuggestions {
            subcommands: vec![
                SuggestionItem::new("dark", "Switch to the dark theme"),
                SuggestionItem::new("light", "Switch to the light theme"),
            ],
            arguments: Vec::new(),
        })
    }
    async fn execute(&self, args: &[String]) -> Result<CommandResponse> {
        let theme = match args.iter().map(|a| a.trim()).find(|a| !a.is_empty()) {
            None => self.state.toggle(),
            Some(name) => match name.parse::<Theme>() {
                Ok(theme) => {
                    self.state.set(theme);
                    theme
                },
                Err(_) => {
                    return Ok(CommandResponse::text(format!(
                        "Unknown theme \"{name}\". Use dark or light."
                    )));
                },
            },
        };
        log::info!("theme -> {theme}");
        Ok(
            CommandResponse::text(format!("Theme switched to {theme} mode"))
                .with_signal(Signal::ThemeChanged(theme)),
        )
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

pub(crate) struct ClearCmd;

#[async_trait(?Send)]
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn aliases(&self) -> &[&str] {
        &["cls"]
    }
    async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
        Ok(CommandResponse::empty().with_signal(Signal::Clear))
    }
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

const PONG_BLURB: &str = "Classic Pong! First to 5 points wins. Use the mouse, a controller, \
or W/S/\u{2191}/\u{2193} to move your paddle.";

const PLAY_START: QuickSet = &[("play pong", "Launch Pong game")];

pub(crate) struct PlayCmd {
    marker: char,
}

impl PlayCmd {
    pub(crate) fn new(marker: char) -> Self {
        Self { marker }
    }
}

#[async_trait(?Send)]
impl Command for PlayCmd {
    fn name(&self) -> &str {
        "play"
    }
    fn description(&self) -> &str {
        "Play some fun mini games in your browser"
    }
    fn aliases(&self) -> &[&str] {
        &["games"]
    }
    fn suggestions(&self) -> Option<CommandSuggestions> {
        Some(CommandSuggestions {
            subcommands: vec![SuggestionItem::new("pong", "Classic Pong game")],
            arguments: Vec::new(),
        })
    }
    async fn execute(&self, args: &[String]) -> Result<CommandResponse> {
        let m = self.marker;
        let Some(game) = args.iter().map(|a| a.trim()).find(|a| !a.is_empty()) else {
            return Ok(CommandResponse::text(format!(
                "Games Directory\n\
                 Available games to play:\n  \
                 pong  {PONG_BLURB}\n\n\
                 Type '{m}play pong' to start."
            ))
            .with_quick_commands("Quick Start", quick_commands(m, PLAY_START)));
        };
        match game.to_lowercase().as_str() {
            "pong" => Ok(CommandResponse::text(format!("Pong Game \u{1f3d3}\n{PONG_BLURB}"))
                .with_signal(Signal::LaunchGame(Game::Pong))),
            _ => Ok(CommandResponse::text(format!(
                "Game \"{game}\" not found. Type \"{m}play\" to see available games."
            ))),
        }
    }
}
