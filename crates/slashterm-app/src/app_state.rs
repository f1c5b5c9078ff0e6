use std::path::{Path, PathBuf};

use slashterm_content::{ContentContext, FsContentStore, ThemeState, register_builtins};
use slashterm_core::{CommandRegistry, DecryptForm, Dispatcher, SessionEvent};
use slashterm_types::{CommandResponse, Game, InputEvent, PromptKind, ShellConfig, Signal, Theme};

use crate::render;

/// What the next plain line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMode {
    /// A normal submission.
    Command,
    /// The password prompt.
    Password,
    /// First field of the decrypt form.
    DecryptCode,
    /// Second field; carries the code typed on the previous line.
    DecryptDigits(String),
}

/// All mutable host state.
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub theme: ThemeState,
    pub theme_file: Option<PathBuf>,
    pub line_mode: LineMode,
}

/// Stored theme preference, if the file exists and parses.
pub async fn load_theme(path: &Path) -> Option<Theme> {
    let raw = tokio::fs::read_to_string(path).await.ok()?;
    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            log::warn!("ignoring {}: {e}", path.display());
            None
        },
    }
}

impl AppState {
    pub async fn new(config: &ShellConfig) -> Self {
        let initial = match &config.theme_file {
            Some(path) => load_theme(path).await.unwrap_or(config.theme),
            None => config.theme,
        };
        let theme = ThemeState::new(initial);
        let store = FsContentStore::new(config.content_dir.clone());
        let ctx = ContentContext::new(std::rc::Rc::new(store), theme.clone(), config.marker);

        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg, &ctx);

        Self {
            dispatcher: Dispatcher::new(config, reg),
            theme,
            theme_file: config.theme_file.clone(),
            line_mode: LineMode::Command,
        }
    }

    /// Handle one decoded input event and return what to print.
    pub async fn handle(&mut self, event: InputEvent) -> Vec<String> {
        match event {
            InputEvent::HistoryPrevious => vec![render::recall(self.dispatcher.history_previous())],
            InputEvent::HistoryNext => vec![render::recall(self.dispatcher.history_next())],
            InputEvent::Escape => {
                self.line_mode = LineMode::Command;
                if self.dispatcher.escape() {
                    vec![render::notice("left hacker mode")]
                } else {
                    Vec::new()
                }
            },
            InputEvent::Complete(partial) => match self.dispatcher.tab_complete(&partial) {
                Some(done) => vec![render::recall(Some(done))],
                None => render::suggestions(&self.dispatcher.suggestions(&partial)),
            },
            InputEvent::Suggest(partial) => render::suggestions(&self.dispatcher.suggestions(&partial)),
            InputEvent::Submit(line) => self.submit(line).await,
        }
    }

    async fn submit(&mut self, line: String) -> Vec<String> {
        let response = match std::mem::replace(&mut self.line_mode, LineMode::Command) {
            LineMode::Command => self.dispatcher.submit(&line).await,
            LineMode::Password => self.dispatcher.answer_password(&line),
            LineMode::DecryptCode => {
                self.line_mode = LineMode::DecryptDigits(line);
                return vec![render::notice("digits (d.dd):")];
            },
            LineMode::DecryptDigits(code) => {
                self.dispatcher.answer_decrypt(DecryptForm::new(&code, &line))
            },
        };
        self.apply(response).await
    }

    /// Act on a response's signal, then render it.
    async fn apply(&mut self, response: CommandResponse) -> Vec<String> {
        let mut out = render::response(&response);
        match &response.signal {
            Some(Signal::Prompt(PromptKind::Password)) => {
                self.line_mode = LineMode::Password;
            },
            Some(Signal::Prompt(PromptKind::Decrypt { .. })) => {
                self.line_mode = LineMode::DecryptCode;
                out.push(render::notice("key (5 letters):"));
            },
            Some(Signal::ThemeChanged(theme)) => self.persist_theme(*theme).await,
            Some(Signal::LaunchGame(game)) => out.extend(self.play(*game)),
            Some(Signal::Clear) => out.insert(0, render::CLEAR_SCREEN.to_string()),
            Some(Signal::EnterSpecialMode) | Some(Signal::ExitSpecialMode) | None => {},
        }
        out
    }

    /// Games have no renderer here; report the launch and an immediate end.
    fn play(&mut self, game: Game) -> Vec<String> {
        self.dispatcher.notify(SessionEvent::GameStarted(game));
        let mut out = vec![render::notice(&format!("{} would run here", game.name()))];
        if let Some(offer) = self.dispatcher.notify(SessionEvent::GameEnded(game)) {
            out.extend(render::response(&offer));
        }
        out
    }

    async fn persist_theme(&self, theme: Theme) {
        let Some(path) = &self.theme_file else {
            return;
        };
        if let Err(e) = tokio::fs::write(path, theme.as_str()).await {
            log::warn!("could not save theme to {}: {e}", path.display());
        }
    }
}
