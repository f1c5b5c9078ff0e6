//! Preset follow-up command rows offered under responses.
//!
//! Sets are written without the command marker; [`quick_commands`] adds the
//! configured one.

use slashterm_types::QuickCommand;

/// Default title for a follow-up row.
pub const QUICK_COMMANDS: &str = "Quick Commands";

/// `(command line without marker, description)` pairs.
pub type QuickSet = &'static [(&'static str, &'static str)];

pub const MAIN_NAVIGATION: QuickSet = &[
    ("resume", "View my full professional background"),
    ("contact", "Get in touch with me"),
    ("theme", "Customize the look of the website"),
    ("help", "See all available commands"),
];

pub const HELP_RELATED: QuickSet = &[
    ("about", "Learn about me"),
    ("resume", "View my resume"),
    ("theme", "Change theme"),
    ("clear", "Clear the screen"),
];

pub const RESUME_VARIATIONS: QuickSet = &[
    ("resume recent", "Current and recent positions"),
    ("resume skills", "Technical skills only"),
    ("resume projects", "Selected projects"),
    ("resume --full-time-only", "Full-time positions only"),
    ("help", "See all available commands"),
];

/// Expand a preset with the command marker.
pub fn quick_commands(marker: char, set: QuickSet) -> Vec<QuickCommand> {
    set.iter()
        .map(|(line, description)| QuickCommand {
            command: format!("{marker}{line}"),
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_prefixed() {
        let items = quick_commands('!', HELP_RELATED);
        let lines: Vec<&str> = items.iter().map(|q| q.command.as_str()).collect();
        assert_eq!(lines, ["!about", "!resume", "!theme", "!clear"]);
        assert_eq!(items[3].description, "Clear the screen");
    }

    #[test]
    fn presets_end_in_known_commands() {
        for set in [MAIN_NAVIGATION, HELP_RELATED, RESUME_VARIATIONS] {
            assert!(!set.is_empty());
            for (line, _) in set {
                let name = line.split(' ').next().unwrap_or_default();
                assert!(
                    ["about", "clear", "contact", "help", "resume", "theme"].contains(&name),
                    "{line}"
                );
            }
        }
    }
}
