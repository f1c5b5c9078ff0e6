//! Command registry: one case-insensitive lookup table for names and aliases.

use std::collections::HashMap;
use std::rc::Rc;

use crate::command::Command;
use crate::suggest::{CompletionEntry, CompletionSource};

/// Registry of available commands.
///
/// Commands are kept in registration order. Every canonical name and alias,
/// lower-cased, maps into the same table; a later registration silently
/// takes over any key it collides with.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Rc<dyn Command>>,
    lookup: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and every alias.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let cmd: Rc<dyn Command> = Rc::from(cmd);
        let index = self.commands.len();
        let keys = std::iter::once(cmd.name()).chain(cmd.aliases().iter().copied());
        for key in keys {
            let key = key.to_lowercase();
            if let Some(prev) = self.lookup.insert(key.clone(), index)
                && prev != index
            {
                log::debug!(
                    "'{key}' re-registered: {} replaces {}",
                    cmd.name(),
                    self.commands[prev].name()
                );
            }
        }
        self.commands.push(cmd);
    }

    /// Look up a command by name or alias, ignoring case.
    pub fn get(&self, name: &str) -> Option<Rc<dyn Command>> {
        self.lookup
            .get(&name.to_lowercase())
            .map(|&i| Rc::clone(&self.commands[i]))
    }

    /// Whether `cmd` (at `index`) still owns its canonical name.
    fn owns_name(&self, index: usize) -> bool {
        let name = self.commands[index].name().to_lowercase();
        self.lookup.get(&name) == Some(&index)
    }

    /// Each distinct command once, in registration order. A command whose
    /// canonical name was taken over by a later registration is omitted.
    pub fn list_unique(&self) -> Vec<Rc<dyn Command>> {
        (0..self.commands.len())
            .filter(|&i| self.owns_name(i))
            .map(|i| Rc::clone(&self.commands[i]))
            .collect()
    }

    /// `(name, description)` pairs in registration order.
    pub fn list_commands(&self) -> Vec<(String, String)> {
        self.list_unique()
            .iter()
            .map(|c| (c.name().to_string(), c.description().to_string()))
            .collect()
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.list_unique().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn entry_for(cmd: &dyn Command) -> CompletionEntry {
    CompletionEntry {
        name: cmd.name().to_string(),
        description: cmd.description().to_string(),
        suggestions: cmd.suggestions(),
        listed: true,
    }
}

impl CompletionSource for CommandRegistry {
    fn entries(&self) -> Vec<CompletionEntry> {
        self.list_unique().iter().map(|c| entry_for(c.as_ref())).collect()
    }

    fn lookup(&self, name: &str) -> Option<CompletionEntry> {
        self.get(name).map(|c| entry_for(c.as_ref()))
    }
}
