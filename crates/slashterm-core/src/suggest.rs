//! Autocomplete: turns a partial line into an ordered suggestion list.
//!
//! The engine is shape-driven. With a marker configured (normal mode):
//!
//! - `/` alone lists every listed command.
//! - `/par` filters command names by prefix; an exact name match also
//!   offers that command's subcommands and arguments.
//! - `/name mid tr` looks the command up and filters its subcommands and
//!   arguments by the trailing token.
//! - anything without the marker gets no suggestions.
//!
//! Without a marker (special mode) the same rules apply to the bare text,
//! and the empty line plays the role of `/`.
//!
//! Order always follows the source's own order, which for the registry is
//! registration order.

use crate::command::CommandSuggestions;

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteSuggestion {
    /// Full text that replaces the input when selected.
    pub command: String,
    pub description: String,
    /// What the list shows, e.g. `--since-year <year>`.
    pub display_text: String,
}

/// What the engine needs to know about one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub name: String,
    pub description: String,
    pub suggestions: Option<CommandSuggestions>,
    /// Whether the command appears when listing everything.
    pub listed: bool,
}

/// A table of commands the engine can complete against.
pub trait CompletionSource {
    /// Distinct commands, in the order suggestions should appear.
    fn entries(&self) -> Vec<CompletionEntry>;

    /// Resolve a typed command name (aliases included, case-insensitive).
    fn lookup(&self, name: &str) -> Option<CompletionEntry>;
}

/// Suggestion generator, parameterised by the command marker.
#[derive(Debug, Clone, Copy)]
pub struct Suggester {
    marker: Option<char>,
}

impl Suggester {
    /// Suggestions for marker-prefixed input.
    pub fn with_marker(marker: char) -> Self {
        Self {
            marker: Some(marker),
        }
    }

    /// Suggestions for bare input (special mode).
    pub fn unmarked() -> Self {
        Self { marker: None }
    }

    fn prefix(&self) -> String {
        self.marker.map(String::from).unwrap_or_default()
    }

    /// Ordered suggestions for `input`.
    pub fn suggest(
        &self,
        source: &dyn CompletionSource,
        input: &str,
    ) -> Vec<AutocompleteSuggestion> {
        let body = match self.marker {
            Some(m) => match input.strip_prefix(m) {
                Some(rest) => rest,
                None => return Vec::new(),
            },
            None => input,
        };

        let out = if body.is_empty() {
            self.list_all(source)
        } else {
            match body.split_once(' ') {
                None => self.match_names(source, body),
                Some((name, rest)) => self.match_items(source, name, rest),
            }
        };
        dedup_by_command(out)
    }

    fn list_all(&self, source: &dyn CompletionSource) -> Vec<AutocompleteSuggestion> {
        let prefix = self.prefix();
        source
            .entries()
            .into_iter()
            .filter(|e| e.listed)
            .map(|e| AutocompleteSuggestion {
                command: format!("{prefix}{}", e.name),
                display_text: format!("{prefix}{}", e.name),
                description: e.description,
            })
            .collect()
    }

    fn match_names(
        &self,
        source: &dyn CompletionSource,
        partial: &str,
    ) -> Vec<AutocompleteSuggestion> {
        let prefix = self.prefix();
        let partial = partial.to_lowercase();
        let mut out = Vec::new();
        let mut exact: Option<CompletionEntry> = None;

        for entry in source.entries() {
            let lower = entry.name.to_lowercase();
            if !lower.starts_with(&partial) {
                continue;
            }
            out.push(AutocompleteSuggestion {
                command: format!("{prefix}{}", entry.name),
                display_text: format!("{prefix}{}", entry.name),
                description: entry.description.clone(),
            });
            if lower == partial {
                exact = Some(entry);
            }
        }

        if let Some(entry) = exact
            && let Some(suggestions) = &entry.suggestions
        {
            for item in suggestions.items() {
                out.push(AutocompleteSuggestion {
                    command: format!("{prefix}{} {}", entry.name, item.name),
                    description: item.description.clone(),
                    display_text: item.display_text(),
                });
            }
        }
        out
    }

    fn match_items(
        &self,
        source: &dyn CompletionSource,
        name: &str,
        rest: &str,
    ) -> Vec<AutocompleteSuggestion> {
        let Some(entry) = source.lookup(name) else {
            return Vec::new();
        };
        let Some(suggestions) = entry.suggestions else {
            return Vec::new();
        };

        let tokens: Vec<&str> = rest.split(' ').collect();
        let (trailing, middle) = match tokens.split_last() {
            Some((last, middle)) => (last.to_lowercase(), middle),
            None => (String::new(), &[][..]),
        };
        let head = format!("{}{name}", self.prefix());

        suggestions
            .items()
            .filter(|item| item.name.to_lowercase().starts_with(&trailing))
            .map(|item| {
                let command = std::iter::once(head.as_str())
                    .chain(middle.iter().copied().filter(|t| !t.is_empty()))
                    .chain(std::iter::once(item.name.as_str()))
                    .collect::<Vec<_>>()
                    .join(" ");
                AutocompleteSuggestion {
                    command,
                    description: item.description.clone(),
                    display_text: item.display_text(),
                }
            })
            .collect()
    }

    /// Tab completion: the single suggestion, or the longest common prefix
    /// of several when it extends the input.
    pub fn complete(&self, source: &dyn CompletionSource, input: &str) -> Option<String> {
        let suggestions = self.suggest(source, input);
        match suggestions.as_slice() {
            [] => None,
            [only] => Some(only.command.clone()),
            many => {
                let prefix = common_prefix(many.iter().map(|s| s.command.as_str()));
                (prefix.len() > input.len()).then_some(prefix)
            },
        }
    }
}

fn dedup_by_command(list: Vec<AutocompleteSuggestion>) -> Vec<AutocompleteSuggestion> {
    let mut seen = std::collections::HashSet::new();
    list.into_iter()
        .filter(|s| seen.insert(s.command.clone()))
        .collect()
}

/// Longest common prefix, respecting char boundaries.
fn common_prefix<'a>(mut items: impl Iterator<Item = &'a str>) -> String {
    let Some(first) = items.next() else {
        return String::new();
    };
    let mut len = first.len();
    for s in items {
        len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0)
            .min(len);
    }
    first[..len].to_string()
}
