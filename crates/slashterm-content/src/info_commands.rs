//! Informational commands: help, about, contact.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use slashterm_core::quick::{
    HELP_RELATED, MAIN_NAVIGATION, QUICK_COMMANDS, QuickSet, quick_commands,
};
use slashterm_core::{Command, CommandRegistry};
use slashterm_types::{CommandResponse, Result};

/// One row of the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

/// Snapshot of the registry the help command renders.
///
/// The help command lives inside the registry it describes, so the listing
/// is filled in after registration via [`HelpIndex::refresh`].
#[derive(Debug, Clone, Default)]
pub struct HelpIndex(Rc<RefCell<Vec<HelpEntry>>>);

impl HelpIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read every distinct command from `registry`, in registration order.
    pub fn refresh(&self, registry: &CommandRegistry) {
        let entries = registry
            .list_unique()
            .iter()
            .map(|c| HelpEntry {
                name: c.name().to_string(),
                aliases: c.aliases().iter().map(|a| a.to_string()).collect(),
                description: c.description().to_string(),
            })
            .collect();
        *self.0.borrow_mut() = entries;
    }

    pub fn entries(&self) -> Vec<HelpEntry> {
        self.0.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub(crate) struct HelpCmd {
    index: HelpIndex,
    marker: char,
}

impl HelpCmd {
    pub(crate) fn new(index: HelpIndex, marker: char) -> Self {
        Self { index, marker }
    }
}

#[async_trait(?Send)]
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }
    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }
    async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
        let m = self.marker;
        let rows: Vec<(String, String)> = self
            .index
            .entries()
            .into_iter()
            .map(|e| {
                let mut label = format!("{m}{}", e.name);
                if !e.aliases.is_empty() {
                    label.push_str(&format!(" ({})", e.aliases.join(", ")));
                }
                (label, e.description)
            })
            .collect();
        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

        let mut out = String::from("Available commands:\n");
        for (label, desc) in &rows {
            out.push_str(&format!("  {label:<width$}  {desc}\n"));
        }
        out.push_str(&format!(
            "\nTips:\n  \
             Tab completes commands\n  \
             \u{2191}/\u{2193} recall previous commands\n  \
             Commands are case-insensitive\n  \
             Type {m} to see all commands"
        ));
        Ok(CommandResponse::text(out)
            .with_quick_commands(QUICK_COMMANDS, quick_commands(m, HELP_RELATED)))
    }
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

const ABOUT_LINKS: QuickSet = &[
    ("resume", "View my resume"),
    ("resume projects", "Selected projects"),
    ("resume skills", "Technical skills"),
    ("contact", "Get in touch with me"),
];

pub(crate) struct AboutCmd {
    marker: char,
}

impl AboutCmd {
    pub(crate) fn new(marker: char) -> Self {
        Self { marker }
    }
}

#[async_trait(?Send)]
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "Learn about me"
    }
    fn aliases(&self) -> &[&str] {
        &["whoami"]
    }
    async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
        let m = self.marker;
        Ok(CommandResponse::markdown(format!(
            "## About Me\n\n\
             Hi! I'm a software developer who loves building things and poking at \
             new technologies.\n\n\
             This command-line portfolio shows my work in a slightly unusual way. \
             Feel free to explore using the available commands!\n\n\
             I mostly build full-stack applications and try to keep them fast and \
             pleasant to use. Type `{m}help` for everything else."
        ))
        .with_quick_commands(QUICK_COMMANDS, quick_commands(m, ABOUT_LINKS)))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

/// Where the contact command points people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: String,
    pub github: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            email: "hello@example.com".to_string(),
            github: "slashterm".to_string(),
        }
    }
}

pub(crate) struct ContactCmd {
    details: ContactDetails,
    marker: char,
}

impl ContactCmd {
    pub(crate) fn new(details: ContactDetails, marker: char) -> Self {
        Self { details, marker }
    }
}

#[async_trait(?Send)]
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Get in touch with me"
    }
    fn aliases(&self) -> &[&str] {
        &["email", "connect"]
    }
    async fn execute(&self, _args: &[String]) -> Result<CommandResponse> {
        let ContactDetails { email, github } = &self.details;
        Ok(CommandResponse::markdown(format!(
            "## Get in Touch\n\n\
             **Email:** [{email}](mailto:{email})\n\n\
             **Find me online:** [GitHub](https://github.com/{github})\n\n\
             Feel free to reach out for opportunities, collaborations, or just to say hello!"
        ))
        .with_quick_commands(QUICK_COMMANDS, quick_commands(self.marker, MAIN_NAVIGATION)))
    }
}
