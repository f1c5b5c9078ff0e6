//! The dispatcher: routes every submitted line and owns the session state.
//!
//! Callers must not submit again while a previous `submit` is still pending;
//! the dispatcher takes `&mut self` and has no internal queue.

use slashterm_types::{CommandResponse, Game, ShellConfig, Signal};

use crate::history::History;
use crate::registry::CommandRegistry;
use crate::special::{DecryptForm, SpecialMode};
use crate::suggest::{AutocompleteSuggestion, Suggester};
use crate::triggers::{ContextTag, TriggerAction, TriggerTable};

/// Top-level session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Special,
}

/// Lifecycle events reported by game collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GameStarted(Game),
    GameEnded(Game),
}

/// Split a command body into its name and raw argument tokens.
///
/// The name ends at the first run of whitespace. Arguments are split on
/// single spaces, so doubled spaces leave empty tokens behind.
fn tokenize(body: &str) -> (&str, Vec<String>) {
    match body.split_once(char::is_whitespace) {
        None => (body, Vec::new()),
        Some((name, rest)) => {
            let rest = rest.trim_start();
            let args = if rest.is_empty() {
                Vec::new()
            } else {
                rest.split(' ').map(String::from).collect()
            };
            (name, args)
        },
    }
}

/// Command dispatcher and session state machine.
pub struct Dispatcher {
    marker: char,
    registry: CommandRegistry,
    history: History,
    triggers: TriggerTable,
    context: Option<ContextTag>,
    special: SpecialMode,
}

impl Dispatcher {
    pub fn new(config: &ShellConfig, registry: CommandRegistry) -> Self {
        Self {
            marker: config.marker,
            registry,
            history: History::new(),
            triggers: TriggerTable::builtin(),
            context: None,
            special: SpecialMode::new(config.special.clone(), config.marker),
        }
    }

    /// Replace the free-text trigger table.
    pub fn with_triggers(mut self, triggers: TriggerTable) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn mode(&self) -> Mode {
        if self.special.is_active() {
            Mode::Special
        } else {
            Mode::Normal
        }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn special(&self) -> &SpecialMode {
        &self.special
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Handle one submitted line. Never fails: every error path becomes a
    /// response.
    pub async fn submit(&mut self, raw: &str) -> CommandResponse {
        let input = raw.trim();
        if input.is_empty() {
            return CommandResponse::empty();
        }
        if self.special.is_active() {
            return self.submit_special(input);
        }
        match input.strip_prefix(self.marker) {
            Some(body) => self.submit_command(input, body).await,
            None => self.submit_free_text(input),
        }
    }

    async fn submit_command(&mut self, input: &str, body: &str) -> CommandResponse {
        self.history.push(input);
        // Slash commands drop any pending free-text context before running.
        self.context = None;

        let (name, args) = tokenize(body);
        let Some(cmd) = self.registry.get(name) else {
            log::debug!("dispatch: '{name}' not found");
            return CommandResponse::text(format!(
                "Command not found: {m}{name}. Type '{m}help' for available commands.",
                m = self.marker
            ));
        };

        log::debug!("dispatch: {} {:?}", cmd.name(), args);
        match cmd.execute(&args).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("command '{}' failed: {e}", cmd.name());
                CommandResponse::text(format!("Error executing command: {e}"))
            },
        }
    }

    fn submit_free_text(&mut self, input: &str) -> CommandResponse {
        let Some(trigger) = self.triggers.find(input, self.context).copied() else {
            log::debug!("free text: no trigger for {input:?}");
            self.context = None;
            return CommandResponse::text(format!(
                "Commands must start with {m}. Type '{m}help' for available commands.",
                m = self.marker
            ));
        };

        log::debug!("free text: {:?} (context {:?})", trigger.action, self.context);
        self.context = trigger.next_context;
        match trigger.action {
            TriggerAction::Reply(text) => CommandResponse::text(text),
            TriggerAction::StartGame(game) => start_game(game),
            TriggerAction::EnterSpecialMode => self.special.enter(),
        }
    }

    fn submit_special(&mut self, input: &str) -> CommandResponse {
        let (name, args) = tokenize(input);
        match self.special.execute(name, &args) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("special command '{name}' failed: {e}");
                CommandResponse::text(format!("Error executing command: {e}"))
            },
        }
    }

    // -----------------------------------------------------------------------
    // Autocomplete and history
    // -----------------------------------------------------------------------

    /// Ordered suggestions for the partial input, against whichever command
    /// table the current mode uses.
    pub fn suggestions(&self, partial: &str) -> Vec<AutocompleteSuggestion> {
        if self.special.is_active() {
            Suggester::unmarked().suggest(&self.special, partial)
        } else {
            Suggester::with_marker(self.marker).suggest(&self.registry, partial)
        }
    }

    /// Tab completion for the partial input.
    pub fn tab_complete(&self, partial: &str) -> Option<String> {
        if self.special.is_active() {
            Suggester::unmarked().complete(&self.special, partial)
        } else {
            Suggester::with_marker(self.marker).complete(&self.registry, partial)
        }
    }

    pub fn history_previous(&mut self) -> Option<String> {
        self.history.older().map(String::from)
    }

    pub fn history_next(&mut self) -> Option<String> {
        self.history.newer().map(String::from)
    }

    // -----------------------------------------------------------------------
    // Session context and mode transitions
    // -----------------------------------------------------------------------

    pub fn context(&self) -> Option<ContextTag> {
        self.context
    }

    /// Set or clear the free-text context from outside.
    pub fn set_context(&mut self, tag: Option<ContextTag>) {
        log::debug!("context: {:?} -> {tag:?}", self.context);
        self.context = tag;
    }

    /// Deliver a game lifecycle event. An ended game primes the follow-up
    /// offer and returns the text that makes it.
    pub fn notify(&mut self, event: SessionEvent) -> Option<CommandResponse> {
        log::debug!("session event: {event:?}");
        match event {
            SessionEvent::GameStarted(Game::Pong) => {
                self.context = Some(ContextTag::PongStarted);
                None
            },
            SessionEvent::GameStarted(Game::Golf) => {
                self.context = Some(ContextTag::GolfStarted);
                None
            },
            SessionEvent::GameEnded(Game::Pong) => {
                self.context = Some(ContextTag::PongEnded);
                Some(CommandResponse::text(
                    "Ping pong isn't really my strong suit though. I'm more of a golfer \
                     myself... want to see what I mean? (yes/no)",
                ))
            },
            SessionEvent::GameEnded(Game::Golf) => {
                self.context = Some(ContextTag::GolfEnded);
                Some(CommandResponse::text("Fancy another round? (yes/no)"))
            },
        }
    }

    /// The escape key: leave special mode. Returns whether anything changed.
    pub fn escape(&mut self) -> bool {
        self.special.exit()
    }

    /// Answer an open password prompt.
    pub fn answer_password(&mut self, password: &str) -> CommandResponse {
        self.special
            .submit_password(password)
            .unwrap_or_else(|e| CommandResponse::text(e.to_string()))
    }

    /// Answer an open decrypt prompt.
    pub fn answer_decrypt(&mut self, form: DecryptForm) -> CommandResponse {
        self.special
            .submit_decrypt(&form)
            .unwrap_or_else(|e| CommandResponse::text(e.to_string()))
    }
}

fn start_game(game: Game) -> CommandResponse {
    log::info!("starting {}", game.name());
    CommandResponse::text(format!("Starting {}...", game.name()))
        .with_signal(Signal::LaunchGame(game))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;
    use slashterm_types::{PromptKind, Result, ShellError};

    use super::*;
    use crate::command::{Command, CommandSuggestions, SuggestionItem};
    use crate::special::PuzzleStage;

    struct Spy {
        name: &'static str,
        aliases: &'static [&'static str],
        calls: Rc<Cell<usize>>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    #[async_trait(?Send)]
    impl Command for Spy {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "spy"
        }
        fn aliases(&self) -> &[&str] {
            self.aliases
        }
        async fn execute(&self, args: &[String]) -> Result<CommandResponse> {
            self.calls.set(self.calls.get() + 1);
            *self.seen.borrow_mut() = args.to_vec();
            Ok(CommandResponse::text(format!("{} ran", self.name)))
        }
    }

    struct Failing;

    #[async_trait(?Send)]
    impl Command for Failing {
        fn name(&self) -> &str {
            "boom"
        }
        fn description(&self) -> &str {
            "always fails"
        }
        async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
            Err(ShellError::Handler("kaboom".to_string()))
        }
    }

    struct Resume;

    #[async_trait(?Send)]
    impl Command for Resume {
        fn name(&self) -> &str {
            "resume"
        }
        fn description(&self) -> &str {
            "resume"
        }
        fn suggestions(&self) -> Option<CommandSuggestions> {
            Some(CommandSuggestions {
                subcommands: vec![SuggestionItem::new("skills", "Skills")],
                arguments: vec![
                    SuggestionItem::new("--since-year", "Since").with_params("<year>"),
                ],
            })
        }
        async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
            Ok(CommandResponse::text("resume"))
        }
    }

    struct Fixture {
        dispatcher: Dispatcher,
        calls: Rc<Cell<usize>>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    fn fixture() -> Fixture {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Spy {
            name: "help",
            aliases: &["h", "?"],
            calls: Rc::clone(&calls),
            seen: Rc::clone(&seen),
        }));
        reg.register(Box::new(Spy {
            name: "about",
            aliases: &[],
            calls: Rc::clone(&calls),
            seen: Rc::clone(&seen),
        }));
        reg.register(Box::new(Resume));
        reg.register(Box::new(Failing));
        Fixture {
            dispatcher: Dispatcher::new(&ShellConfig::default(), reg),
            calls,
            seen,
        }
    }

    #[tokio::test]
    async fn empty_input_is_noop() {
        let mut f = fixture();
        for input in ["", "   ", "\t"] {
            let r = f.dispatcher.submit(input).await;
            assert!(r.content.is_empty());
            assert!(r.signal.is_none());
        }
        assert!(f.dispatcher.history().is_empty());
        assert_eq!(f.calls.get(), 0);
    }

    #[tokio::test]
    async fn command_lookup_ignores_case() {
        let mut f = fixture();
        let a = f.dispatcher.submit("/help").await;
        let b = f.dispatcher.submit("/HELP").await;
        let c = f.dispatcher.submit("/H").await;
        assert_eq!(a.content, "help ran");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(f.calls.get(), 3);
    }

    #[tokio::test]
    async fn unknown_command_names_attempt_and_runs_nothing() {
        let mut f = fixture();
        let r = f.dispatcher.submit("/nonexistent").await;
        assert!(r.content.contains("/nonexistent"));
        assert!(r.content.starts_with("Command not found"));
        assert_eq!(f.calls.get(), 0);
        assert_eq!(f.dispatcher.history().len(), 1);
    }

    #[tokio::test]
    async fn args_keep_empty_tokens() {
        let mut f = fixture();
        f.dispatcher.submit("/about  x y").await;
        assert_eq!(*f.seen.borrow(), vec!["x", "y"]);
        f.dispatcher.submit("/about x  y").await;
        assert_eq!(*f.seen.borrow(), vec!["x", "", "y"]);
        f.dispatcher.submit("/about").await;
        assert!(f.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn history_dedups_consecutive() {
        let mut f = fixture();
        f.dispatcher.submit("/help").await;
        f.dispatcher.submit("/help").await;
        assert_eq!(f.dispatcher.history().len(), 1);
        f.dispatcher.submit("/about").await;
        f.dispatcher.submit("/help").await;
        assert_eq!(f.dispatcher.history().len(), 3);
    }

    #[tokio::test]
    async fn history_navigation() {
        let mut f = fixture();
        f.dispatcher.submit("/help").await;
        f.dispatcher.submit("/about").await;
        assert_eq!(f.dispatcher.history_previous().as_deref(), Some("/about"));
        assert_eq!(f.dispatcher.history_previous().as_deref(), Some("/help"));
        assert_eq!(f.dispatcher.history_previous(), None);
        assert_eq!(f.dispatcher.history_next().as_deref(), Some("/about"));
        assert_eq!(f.dispatcher.history_next().as_deref(), Some(""));
        assert_eq!(f.dispatcher.history_next(), None);
    }

    #[tokio::test]
    async fn free_text_is_not_recorded() {
        let mut f = fixture();
        f.dispatcher.submit("hello").await;
        assert!(f.dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn handler_error_is_contained() {
        let mut f = fixture();
        let r = f.dispatcher.submit("/boom").await;
        assert!(r.content.starts_with("Error executing command"));
        assert!(r.content.contains("kaboom"));
        let next = f.dispatcher.submit("/about").await;
        assert_eq!(next.content, "about ran");
    }

    #[test]
    fn suggestions_follow_registration_order() {
        let f = fixture();
        let names: Vec<String> = f
            .dispatcher
            .suggestions("/")
            .into_iter()
            .map(|s| s.command)
            .collect();
        assert_eq!(names, vec!["/help", "/about", "/resume", "/boom"]);
    }

    #[test]
    fn subcommand_suggestions_after_space() {
        let f = fixture();
        let s = f.dispatcher.suggestions("/resume ");
        let cmds: Vec<&str> = s.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(cmds, vec!["/resume skills", "/resume --since-year"]);
        assert_eq!(s[1].display_text, "--since-year <year>");
    }

    #[test]
    fn free_text_gets_no_suggestions() {
        assert!(fixture().dispatcher.suggestions("res").is_empty());
    }

    #[test]
    fn tab_complete_single() {
        let f = fixture();
        assert_eq!(f.dispatcher.tab_complete("/ab").as_deref(), Some("/about"));
    }

    #[tokio::test]
    async fn unmatched_free_text_gives_guidance_and_clears_context() {
        let mut f = fixture();
        f.dispatcher.submit("ping").await;
        assert_eq!(f.dispatcher.context(), Some(ContextTag::PingOffered));
        let r = f.dispatcher.submit("what is this").await;
        assert!(r.content.starts_with("Commands must start with /"));
        assert_eq!(f.dispatcher.context(), None);
    }

    #[tokio::test]
    async fn contextual_affirmation() {
        let mut f = fixture();
        f.dispatcher.submit("ping").await;
        let r = f.dispatcher.submit("yes").await;
        assert_eq!(r.signal, Some(Signal::LaunchGame(Game::Pong)));
        assert_eq!(f.dispatcher.context(), Some(ContextTag::PongStarted));
    }

    #[tokio::test]
    async fn affirmation_without_context_falls_through() {
        let mut f = fixture();
        let r = f.dispatcher.submit("yes").await;
        assert!(r.content.starts_with("Commands must start with"));
        assert!(r.signal.is_none());
    }

    #[tokio::test]
    async fn slash_command_clears_context() {
        let mut f = fixture();
        f.dispatcher.submit("ping").await;
        f.dispatcher.submit("/about").await;
        assert_eq!(f.dispatcher.context(), None);
        let r = f.dispatcher.submit("yes").await;
        assert!(r.signal.is_none());
    }

    #[tokio::test]
    async fn game_end_primes_follow_up() {
        let mut f = fixture();
        f.dispatcher.submit("lets play").await;
        assert_eq!(f.dispatcher.context(), Some(ContextTag::PongStarted));
        let offer = f.dispatcher.notify(SessionEvent::GameEnded(Game::Pong));
        assert!(offer.unwrap().content.contains("golfer"));
        let r = f.dispatcher.submit("sure!").await;
        assert_eq!(r.signal, Some(Signal::LaunchGame(Game::Golf)));

        f.dispatcher.notify(SessionEvent::GameEnded(Game::Golf));
        assert_eq!(f.dispatcher.context(), Some(ContextTag::GolfEnded));
        let r = f.dispatcher.submit("ok").await;
        assert_eq!(r.signal, Some(Signal::LaunchGame(Game::Golf)));
    }

    #[tokio::test]
    async fn external_context_setter() {
        let mut f = fixture();
        f.dispatcher.set_context(Some(ContextTag::PongEnded));
        let r = f.dispatcher.submit("yep").await;
        assert_eq!(r.signal, Some(Signal::LaunchGame(Game::Golf)));
        f.dispatcher.set_context(None);
        assert_eq!(f.dispatcher.context(), None);
    }

    #[tokio::test]
    async fn special_mode_round_trip() {
        let mut f = fixture();
        let r = f.dispatcher.submit("hackerman").await;
        assert_eq!(r.signal, Some(Signal::EnterSpecialMode));
        assert_eq!(f.dispatcher.mode(), Mode::Special);

        // No marker handling in special mode.
        let r = f.dispatcher.submit("/help").await;
        assert!(r.content.starts_with("Unknown command: /help."));
        assert_eq!(f.calls.get(), 0);

        let r = f.dispatcher.submit("sudo").await;
        assert_eq!(r.signal, Some(Signal::Prompt(PromptKind::Password)));
        let r = f.dispatcher.answer_password("nope");
        assert!(r.content.contains("Incorrect"));
        assert_eq!(f.dispatcher.special().stage(), PuzzleStage::Locked);
        f.dispatcher.answer_password("dad626");
        assert_eq!(f.dispatcher.special().stage(), PuzzleStage::Elevated);

        let listing = f.dispatcher.submit("ls").await.content;
        assert!(listing.contains("deep-dark-secrets.encrypted"));
        assert!(listing.contains("decrypt_key_reminder.png"));
        assert!(!listing.contains(".locked"));

        f.dispatcher.submit("decrypt deep-dark-secrets.encrypted").await;
        f.dispatcher.answer_decrypt(DecryptForm::new("pizza", "314"));
        assert_eq!(f.dispatcher.special().stage(), PuzzleStage::Unlocked);
        assert!(f.dispatcher.submit("ls").await.content.contains("deep-dark-secrets.txt"));

        let r = f.dispatcher.submit("exit").await;
        assert_eq!(r.signal, Some(Signal::ExitSpecialMode));
        assert_eq!(f.dispatcher.mode(), Mode::Normal);
        assert!(f.dispatcher.history().is_empty());

        f.dispatcher.submit("hack").await;
        assert_eq!(f.dispatcher.special().stage(), PuzzleStage::Locked);
    }

    #[tokio::test]
    async fn escape_leaves_special_mode() {
        let mut f = fixture();
        assert!(!f.dispatcher.escape());
        f.dispatcher.submit("matrix").await;
        assert!(f.dispatcher.escape());
        assert_eq!(f.dispatcher.mode(), Mode::Normal);
    }

    #[tokio::test]
    async fn special_suggestions_are_unmarked() {
        let mut f = fixture();
        f.dispatcher.submit("root").await;
        let s = f.dispatcher.suggestions("");
        let cmds: Vec<&str> = s.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(cmds, vec!["ls", "open", "cat", "sudo", "su", "help", "exit"]);
        assert_eq!(f.dispatcher.tab_complete("ex").as_deref(), Some("exit"));
    }

    #[test]
    fn prompt_answer_without_prompt() {
        let mut f = fixture();
        let r = f.dispatcher.answer_password("dad626");
        assert!(r.content.contains("no prompt is open"));
    }

    #[test]
    fn tokenize_rules() {
        assert_eq!(tokenize("help"), ("help", vec![]));
        assert_eq!(tokenize("resume   skills"), ("resume", vec!["skills".to_string()]));
        assert_eq!(
            tokenize("resume a  b"),
            ("resume", vec!["a".to_string(), String::new(), "b".to_string()])
        );
        assert_eq!(tokenize("x\ty"), ("x", vec!["y".to_string()]));
    }
}
