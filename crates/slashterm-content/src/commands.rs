//! Built-in content commands for slashterm.

use std::rc::Rc;

use slashterm_core::CommandRegistry;

use crate::info_commands::{AboutCmd, ContactCmd, ContactDetails, HelpCmd, HelpIndex};
use crate::resume::ResumeCmd;
use crate::store::ContentStore;
use crate::ui_commands::{ClearCmd, PlayCmd, ThemeCmd, ThemeState};

/// Collaborators the built-in commands share with their host.
#[derive(Clone)]
pub struct ContentContext {
    pub store: Rc<dyn ContentStore>,
    pub theme: ThemeState,
    pub contact: ContactDetails,
    pub marker: char,
}

impl ContentContext {
    pub fn new(store: Rc<dyn ContentStore>, theme: ThemeState, marker: char) -> Self {
        Self {
            store,
            theme,
            contact: ContactDetails::default(),
            marker,
        }
    }

    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact = contact;
        self
    }
}

/// Register every built-in content command, in listing order, and return
/// the help index.
///
/// The index is refreshed once here; callers that register more commands
/// afterwards should call [`HelpIndex::refresh`] again.
pub fn register_builtins(reg: &mut CommandRegistry, ctx: &ContentContext) -> HelpIndex {
    let index = HelpIndex::new();
    reg.register(Box::new(HelpCmd::new(index.clone(), ctx.marker)));
    reg.register(Box::new(AboutCmd::new(ctx.marker)));
    reg.register(Box::new(ResumeCmd::new(Rc::clone(&ctx.store), ctx.marker)));
    reg.register(Box::new(ContactCmd::new(ctx.contact.clone(), ctx.marker)));
    reg.register(Box::new(PlayCmd::new(ctx.marker)));
    reg.register(Box::new(ThemeCmd::new(ctx.theme.clone())));
    reg.register(Box::new(ClearCmd));
    index.refresh(reg);
    log::debug!("registered {} content commands", reg.len());
    index
}
