//! Line-level input events.
//!
//! Hosts that only see whole lines (a cooked-mode TTY, a test harness) map
//! them to these events. Arrow keys arrive as their raw ANSI sequences, the
//! escape key as a bare `ESC`, and a trailing tab requests completion.

const ESC: char = '\u{1b}';

/// A platform-agnostic terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Submit the line to the dispatcher.
    Submit(String),
    /// Complete the partial line (Tab).
    Complete(String),
    /// Show the suggestion list for a partial line.
    Suggest(String),
    /// Recall the previous history entry (Up).
    HistoryPrevious,
    /// Recall the next history entry (Down).
    HistoryNext,
    /// Escape key.
    Escape,
}

impl InputEvent {
    /// Decode one line of input (without its trailing newline).
    pub fn from_line(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            "\u{1b}[A" | "\u{1b}OA" => return InputEvent::HistoryPrevious,
            "\u{1b}[B" | "\u{1b}OB" => return InputEvent::HistoryNext,
            _ => {},
        }
        if line.chars().all(|c| c == ESC) && !line.is_empty() {
            return InputEvent::Escape;
        }
        if let Some(partial) = line.strip_suffix('\t') {
            return InputEvent::Complete(partial.to_string());
        }
        if let Some(partial) = line.strip_prefix('?')
            && !partial.is_empty()
        {
            return InputEvent::Suggest(partial.to_string());
        }
        InputEvent::Submit(line.to_string())
    }
}
