//! Free-text easter-egg triggers.
//!
//! Lines typed without the command marker are matched against a declarative
//! table. Matching is deliberately not uniform: some phrases must equal the
//! whole line, some only need to appear in it, and affirmations tolerate
//! trailing punctuation. Each row says which rule it uses so the asymmetry
//! stays visible.

use slashterm_types::Game;

/// Session context: what the previous free-text exchange left pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextTag {
    /// "ping" was answered with an offer to play pong.
    PingOffered,
    /// A pong match is running.
    PongStarted,
    /// A pong match just ended; golf was offered.
    PongEnded,
    /// A golf round is running.
    GolfStarted,
    /// A golf round just ended; another round was offered.
    GolfEnded,
}

/// How a row's phrases are compared with the lower-cased line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The whole line equals a phrase.
    Exact,
    /// The line contains a phrase.
    Substring,
    /// The line, minus trailing `!`, `.` or `?`, equals a phrase.
    OneOf,
}

/// What a matched row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Reply with fixed text.
    Reply(&'static str),
    /// Launch a mini-game.
    StartGame(Game),
    /// Switch into special mode.
    EnterSpecialMode,
}

/// One row of the trigger table.
#[derive(Debug, Clone, Copy)]
pub struct Trigger {
    pub kind: MatchKind,
    pub phrases: &'static [&'static str],
    /// Only eligible while the session context holds this tag.
    pub requires: Option<ContextTag>,
    pub action: TriggerAction,
    /// Context left behind for the next line.
    pub next_context: Option<ContextTag>,
}

impl Trigger {
    /// Whether `line` (already trimmed and lower-cased) matches this row's
    /// phrases. Context is checked separately.
    pub fn matches_phrase(&self, line: &str) -> bool {
        match self.kind {
            MatchKind::Exact => self.phrases.contains(&line),
            MatchKind::Substring => self.phrases.iter().any(|p| line.contains(p)),
            MatchKind::OneOf => {
                let stripped = line.trim_end_matches(['!', '.', '?']).trim_end();
                self.phrases.contains(&stripped)
            },
        }
    }

    fn eligible(&self, context: Option<ContextTag>) -> bool {
        match self.requires {
            None => true,
            Some(tag) => context == Some(tag),
        }
    }
}

const AFFIRM: &[&str] = &["yes", "y", "yeah", "yep", "sure", "ok", "okay"];
const DECLINE: &[&str] = &["no", "n", "nope", "nah"];

/// Ordered trigger table.
#[derive(Debug, Clone)]
pub struct TriggerTable {
    rows: Vec<Trigger>,
}

impl TriggerTable {
    pub fn new(rows: Vec<Trigger>) -> Self {
        Self { rows }
    }

    /// The built-in easter eggs.
    pub fn builtin() -> Self {
        use MatchKind::*;
        use TriggerAction::*;

        let row = |kind, phrases, requires, action, next_context| Trigger {
            kind,
            phrases,
            requires,
            action,
            next_context,
        };

        Self::new(vec![
            // Context-scoped follow-ups.
            row(
                OneOf,
                AFFIRM,
                Some(ContextTag::PingOffered),
                StartGame(Game::Pong),
                Some(ContextTag::PongStarted),
            ),
            row(
                OneOf,
                DECLINE,
                Some(ContextTag::PingOffered),
                Reply("Fair enough. The paddles will be here when you change your mind."),
                None,
            ),
            row(
                OneOf,
                AFFIRM,
                Some(ContextTag::PongEnded),
                StartGame(Game::Golf),
                Some(ContextTag::GolfStarted),
            ),
            row(
                OneOf,
                DECLINE,
                Some(ContextTag::PongEnded),
                Reply("No worries. Type /help to see what else is around."),
                None,
            ),
            row(
                OneOf,
                AFFIRM,
                Some(ContextTag::GolfEnded),
                StartGame(Game::Golf),
                Some(ContextTag::GolfStarted),
            ),
            // Unconditional.
            row(
                Exact,
                &["hack", "hacker", "hackerman", "matrix", "sudo", "root"],
                None,
                EnterSpecialMode,
                None,
            ),
            row(
                Exact,
                &["hello", "hi", "hey"],
                None,
                Reply(
                    "Hey there! Commands start with /, so try /help. \
                     Or say ping if you're feeling sporty.",
                ),
                None,
            ),
            row(
                Exact,
                &["ping"],
                None,
                Reply("pong! Fancy a real match? (yes/no)"),
                Some(ContextTag::PingOffered),
            ),
            row(
                Exact,
                &["pong"],
                None,
                StartGame(Game::Pong),
                Some(ContextTag::PongStarted),
            ),
            row(
                Substring,
                &["lets play", "let's play"],
                None,
                StartGame(Game::Pong),
                Some(ContextTag::PongStarted),
            ),
            row(
                Substring,
                &["golf"],
                None,
                StartGame(Game::Golf),
                Some(ContextTag::GolfStarted),
            ),
        ])
    }

    /// First matching row: context-scoped rows are tried before
    /// unconditional ones.
    pub fn find(&self, line: &str, context: Option<ContextTag>) -> Option<&Trigger> {
        let line = line.trim().to_lowercase();
        let scoped = self.rows.iter().filter(|t| t.requires.is_some());
        let global = self.rows.iter().filter(|t| t.requires.is_none());
        scoped
            .chain(global)
            .find(|t| t.eligible(context) && t.matches_phrase(&line))
    }

    pub fn rows(&self) -> &[Trigger] {
        &self.rows
    }
}

impl Default for TriggerTable {
    fn default() -> Self {
        Self::builtin()
    }
}
