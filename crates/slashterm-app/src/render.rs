//! Plain-text rendering of responses for a line terminal.

use slashterm_core::AutocompleteSuggestion;
use slashterm_types::{CommandResponse, ContentKind, QuickCommands};

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Lines to print for a response, follow-ups last. Blank responses print
/// nothing.
pub fn response(r: &CommandResponse) -> Vec<String> {
    if r.is_blank() {
        return Vec::new();
    }
    let mut out = match r.kind {
        ContentKind::Text | ContentKind::Markdown => vec![r.content.clone()],
        ContentKind::Html => vec![strip_tags(&r.content)],
    };
    if let Some(quick) = &r.quick {
        out.extend(quick_commands(quick));
    }
    out
}

fn quick_commands(quick: &QuickCommands) -> Vec<String> {
    let width = quick
        .items
        .iter()
        .map(|q| q.command.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = vec![String::new(), format!("{}:", quick.title)];
    out.extend(
        quick
            .items
            .iter()
            .map(|q| format!("  {:<width$}  {}", q.command, q.description)),
    );
    out
}

/// A recalled or completed input line, or nothing.
pub fn recall(line: Option<String>) -> String {
    format!("> {}", line.unwrap_or_default())
}

pub fn notice(msg: &str) -> String {
    format!("-- {msg}")
}

pub fn suggestions(list: &[AutocompleteSuggestion]) -> Vec<String> {
    let width = list
        .iter()
        .map(|s| s.display_text.chars().count())
        .max()
        .unwrap_or(0);
    list.iter()
        .map(|s| format!("  {:<width$}  {}", s.display_text, s.description))
        .collect()
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {},
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashterm_types::QuickCommand;

    #[test]
    fn blank_renders_nothing() {
        assert!(response(&CommandResponse::empty()).is_empty());
    }

    #[test]
    fn html_is_flattened() {
        let r = CommandResponse::html("<p>Hi <b>there</b></p>");
        assert_eq!(response(&r), vec!["Hi there".to_string()]);
    }

    #[test]
    fn quick_commands_follow_content() {
        let r = CommandResponse::text("Contact me").with_quick_commands(
            "Quick Commands",
            vec![
                QuickCommand {
                    command: "/resume".into(),
                    description: "View my resume".into(),
                },
                QuickCommand {
                    command: "/help".into(),
                    description: "See all available commands".into(),
                },
            ],
        );
        assert_eq!(
            response(&r),
            vec![
                "Contact me",
                "",
                "Quick Commands:",
                "  /resume  View my resume",
                "  /help    See all available commands",
            ]
        );
    }

    #[test]
    fn suggestions_are_aligned() {
        let list = vec![
            AutocompleteSuggestion {
                command: "/help".into(),
                description: "Show help".into(),
                display_text: "/help".into(),
            },
            AutocompleteSuggestion {
                command: "/resume".into(),
                description: "Resume".into(),
                display_text: "/resume".into(),
            },
        ];
        let lines = suggestions(&list);
        assert_eq!(lines[0], "  /help    Show help");
        assert_eq!(lines[1], "  /resume  Resume");
    }

    #[test]
    fn recall_empty() {
        assert_eq!(recall(None), "> ");
    }
}
