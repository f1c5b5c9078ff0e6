//! Special mode: a scripted fake shell with a two-stage puzzle.
//!
//! The controller owns three pieces of state: whether the mode is active, the
//! puzzle stage, and an optional open prompt (password or decrypt form).
//! Everything else, including the file table and the command listing, is
//! derived from that state on demand.

use slashterm_types::{CommandResponse, PromptKind, Result, ShellError, Signal, SpecialConfig};
use slashterm_vfs::{AccessError, FileEntry, FileTable};

use crate::command::{CommandSuggestions, SuggestionItem};
use crate::quick::{MAIN_NAVIGATION, QUICK_COMMANDS, quick_commands};
use crate::suggest::{CompletionEntry, CompletionSource};

const SYSTEM_LOG: &str = "system.log";
const LOCKED_FILE: &str = "deep-dark-secrets.locked";
const ENCRYPTED_FILE: &str = "deep-dark-secrets.encrypted";
const PLAIN_FILE: &str = "deep-dark-secrets.txt";
const HINT_FILE: &str = "decrypt_key_reminder.png";
const OPERATOR: &str = "op3rator";

const LOCKED_TEXT: &str = "\u{1f512} CLASSIFIED INFORMATION \u{1f512}\n\n\
Access denied. Root privileges required.";

const ENCRYPTED_TEXT: &str = "x9#kQ!v2$Lm@7pZ&r4^Tn*8wB%e1(Yc)6uJ+3sH=0dF\n\
Gq5~aK?9lV<2oR>7iN|4tM{8gW}1bX[6hE]3yP;0cU:5\n\n\
[File appears to be encrypted. Use 'decrypt' command to decrypt.]";

const HINT_TEXT: &str = "[image: a slice of pepperoni pizza next to a glowing \u{3c0}]\n\n\
\u{3c0} = 3.14159...\n\n\
[Hint: 5 letters, 3 digits with decimal]";

const SECRETS_TEXT: &str = "=== DEEP DARK SECRETS ===\n\n\
\u{2022} I still use vim with arrow keys sometimes\n\
\u{2022} My first website had a visitor counter AND a guestbook\n\
\u{2022} I've searched \"how to center a div\" this week\n\
\u{2022} I once spent 3 hours debugging a missing semicolon\n\
\u{2022} I think tabs are better than spaces\n\
\u{2022} I have 47 unused domain names\n\
\u{2022} I still look up basic git commands\n\
\u{2022} I've pushed directly to main... today\n\
\u{2022} I name variables things like \"thingy\" and \"stuff\"\n\n\
[More challenges await... come back later! Thanks for playing]";

/// Puzzle progress. Stages only move forward; leaving the mode resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuzzleStage {
    /// No elevated access, nothing decrypted.
    #[default]
    Locked,
    /// Elevated access granted, file still encrypted.
    Elevated,
    /// Elevated access granted and the file decrypted.
    Unlocked,
}

impl PuzzleStage {
    pub fn has_elevated_access(self) -> bool {
        !matches!(self, PuzzleStage::Locked)
    }

    pub fn is_decrypted(self) -> bool {
        matches!(self, PuzzleStage::Unlocked)
    }
}

/// The two fields of the decrypt prompt, sanitised.
///
/// The code keeps at most five ASCII letters (lower-cased); the digits keep
/// at most three ASCII digits, rendered as `d.dd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptForm {
    code: String,
    decimal: String,
}

impl DecryptForm {
    pub fn new(code: &str, digits: &str) -> Self {
        let code = code
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .take(5)
            .collect();
        let digits: String = digits.chars().filter(char::is_ascii_digit).take(3).collect();
        let decimal = match digits.len() {
            0 | 1 => digits,
            _ => format!("{}.{}", &digits[..1], &digits[1..]),
        };
        Self { code, decimal }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn decimal(&self) -> &str {
        &self.decimal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Open,
    Elevate,
    Help,
    Decrypt,
    Exit,
}

struct SpecialCommand {
    name: &'static str,
    description: &'static str,
    action: Action,
}

const COMMANDS: &[SpecialCommand] = &[
    SpecialCommand {
        name: "ls",
        description: "List files in current directory",
        action: Action::List,
    },
    SpecialCommand {
        name: "open",
        description: "Open a file",
        action: Action::Open,
    },
    SpecialCommand {
        name: "cat",
        description: "Display file contents",
        action: Action::Open,
    },
    SpecialCommand {
        name: "sudo",
        description: "Execute commands as root",
        action: Action::Elevate,
    },
    SpecialCommand {
        name: "su",
        description: "Switch user to root",
        action: Action::Elevate,
    },
    SpecialCommand {
        name: "help",
        description: "Show available commands",
        action: Action::Help,
    },
    SpecialCommand {
        name: "decrypt",
        description: "Decrypt an encrypted file",
        action: Action::Decrypt,
    },
    SpecialCommand {
        name: "exit",
        description: "Return to normal terminal",
        action: Action::Exit,
    },
];

fn find_command(name: &str) -> Option<&'static SpecialCommand> {
    let name = name.to_lowercase();
    COMMANDS.iter().find(|c| c.name == name)
}

/// First non-empty argument; autocomplete can leave empty tokens in front.
fn file_arg(args: &[String]) -> Option<&str> {
    args.iter().map(|a| a.trim()).find(|a| !a.is_empty())
}

/// The special-mode controller.
#[derive(Debug, Clone)]
pub struct SpecialMode {
    active: bool,
    stage: PuzzleStage,
    prompt: Option<PromptKind>,
    secrets: SpecialConfig,
    marker: char,
}

impl SpecialMode {
    /// `marker` is only used to point back at normal-mode help on exit.
    pub fn new(secrets: SpecialConfig, marker: char) -> Self {
        Self {
            active: false,
            stage: PuzzleStage::Locked,
            prompt: None,
            secrets,
            marker,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stage(&self) -> PuzzleStage {
        self.stage
    }

    pub fn pending_prompt(&self) -> Option<&PromptKind> {
        self.prompt.as_ref()
    }

    /// Activate the mode at [`PuzzleStage::Locked`].
    pub fn enter(&mut self) -> CommandResponse {
        self.active = true;
        self.stage = PuzzleStage::Locked;
        self.prompt = None;
        log::info!("special mode entered");
        CommandResponse::text(
            "\u{1f480} HACKERMAN TERMINAL v1.337 \u{1f480}\n\
             [ UNAUTHORIZED ACCESS DETECTED ]\n\n\
             Type 'help' for available commands, 'exit' to leave.",
        )
        .with_signal(Signal::EnterSpecialMode)
    }

    /// Deactivate and reset the puzzle. Returns whether the mode was active.
    pub fn exit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.stage = PuzzleStage::Locked;
        self.prompt = None;
        log::info!("special mode left, puzzle reset");
        true
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// The file table for the current stage.
    pub fn files(&self) -> Result<FileTable> {
        let mut table = FileTable::new().with(SYSTEM_LOG, FileEntry::public(self.system_log()))?;
        match self.stage {
            PuzzleStage::Locked => {
                table.insert(LOCKED_FILE, FileEntry::restricted(LOCKED_TEXT))?;
            },
            PuzzleStage::Elevated => {
                table.insert(ENCRYPTED_FILE, FileEntry::restricted(ENCRYPTED_TEXT))?;
                table.insert(HINT_FILE, FileEntry::public(HINT_TEXT))?;
            },
            PuzzleStage::Unlocked => {
                table.insert(HINT_FILE, FileEntry::public(HINT_TEXT))?;
                table.insert(PLAIN_FILE, FileEntry::restricted(SECRETS_TEXT))?;
            },
        }
        Ok(table)
    }

    /// The system log, rebuilt from scratch: recent events on top, the
    /// fixed history underneath.
    pub fn system_log(&self) -> String {
        let mut lines = Vec::new();
        if self.stage.is_decrypted() {
            lines.push(format!(
                "[2024-01-15 09:32:00] \u{2705} [SUCCESS] File decrypted successfully: {PLAIN_FILE}"
            ));
            lines.push(format!(
                "[2024-01-15 09:31:45] [INFO] Decryption keys validated: {}, {}",
                self.secrets.decrypt_code, self.secrets.decrypt_decimal
            ));
        }
        if self.stage.has_elevated_access() {
            lines.push(format!(
                "[2024-01-15 09:30:00] \u{2705} [SUCCESS] Root access granted for {OPERATOR}"
            ));
            if !self.stage.is_decrypted() {
                lines.push(format!(
                    "[2024-01-15 09:30:15] [INFO] File renamed: {LOCKED_FILE} \u{2192} {ENCRYPTED_FILE}"
                ));
                lines.push(
                    "[2024-01-15 09:30:16] [WARNING] Encrypted file detected. Decryption required."
                        .to_string(),
                );
                lines.push(format!(
                    "[2024-01-15 09:30:17] [INFO] Key reminder utility available: {HINT_FILE}"
                ));
            }
        }
        lines.push("[2024-01-15 09:23:45] User login: admin".to_string());
        lines.push("[2024-01-15 09:24:12] Failed sudo attempt - incorrect password".to_string());
        lines.push(format!(
            "[2024-01-15 09:24:30] Password changed for user {OPERATOR}"
        ));
        lines.push(format!(
            "[2024-01-15 09:24:31] New password set to: {}",
            self.secrets.password
        ));
        lines.push("[2024-01-15 09:25:02] System backup completed".to_string());
        lines.push(format!(
            "[2024-01-15 09:25:15] File permissions updated: {LOCKED_FILE}"
        ));
        lines.push("[2024-01-15 09:25:16] Access level: ROOT_REQUIRED".to_string());
        lines.join("\n")
    }

    fn file_names(&self) -> Vec<String> {
        match self.files() {
            Ok(table) => table.names().map(String::from).collect(),
            Err(e) => {
                log::warn!("special file table unavailable: {e}");
                Vec::new()
            },
        }
    }

    fn has_encrypted_file(&self) -> bool {
        self.file_names().iter().any(|n| n.ends_with(".encrypted"))
    }

    /// Commands shown in help and error listings; decrypt only while there
    /// is something to decrypt.
    fn visible_commands(&self) -> Vec<&'static SpecialCommand> {
        let show_decrypt = self.has_encrypted_file();
        COMMANDS
            .iter()
            .filter(|c| c.action != Action::Decrypt || show_decrypt)
            .collect()
    }

    fn completion_entry(&self, cmd: &SpecialCommand) -> CompletionEntry {
        let files = |filter: fn(&str) -> bool, verb: &str| {
            let arguments: Vec<SuggestionItem> = self
                .file_names()
                .into_iter()
                .filter(|n| filter(n))
                .map(|n| {
                    let description = format!("{verb} {n}");
                    SuggestionItem::new(n, description)
                })
                .collect();
            (!arguments.is_empty()).then(|| CommandSuggestions {
                subcommands: Vec::new(),
                arguments,
            })
        };
        let (suggestions, listed) = match cmd.action {
            Action::Open => (files(|_| true, "Open"), true),
            Action::Decrypt => (
                files(|n| n.ends_with(".encrypted"), "Decrypt"),
                self.has_encrypted_file(),
            ),
            _ => (None, true),
        };
        CompletionEntry {
            name: cmd.name.to_string(),
            description: cmd.description.to_string(),
            suggestions,
            listed,
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Run a special-mode command. Any submission closes an open prompt.
    pub fn execute(&mut self, name: &str, args: &[String]) -> Result<CommandResponse> {
        self.prompt = None;
        let Some(cmd) = find_command(name) else {
            log::debug!("special: unknown command '{name}'");
            let names: Vec<&str> = self.visible_commands().iter().map(|c| c.name).collect();
            return Ok(CommandResponse::text(format!(
                "Unknown command: {name}. Available commands: {}",
                names.join(", ")
            )));
        };
        log::debug!("special: {}", cmd.name);
        match cmd.action {
            Action::List => self.list(),
            Action::Open => self.open(cmd.name, args),
            Action::Elevate => Ok(self.request_password()),
            Action::Help => Ok(self.help()),
            Action::Decrypt => self.decrypt(args),
            Action::Exit => {
                self.exit();
                Ok(CommandResponse::text(format!(
                    "\u{1f512} Exiting Hacker Mode\n\
                     Welcome back! Type {}help to see normal commands.",
                    self.marker
                ))
                .with_signal(Signal::ExitSpecialMode)
                .with_quick_commands(QUICK_COMMANDS, quick_commands(self.marker, MAIN_NAVIGATION)))
            },
        }
    }

    fn list(&self) -> Result<CommandResponse> {
        let table = self.files()?;
        let lines: Vec<String> = table
            .iter()
            .map(|(name, entry)| {
                if entry.requires_elevated {
                    format!("{name}  [root]")
                } else {
                    name.to_string()
                }
            })
            .collect();
        Ok(CommandResponse::text(lines.join("\n")))
    }

    fn open(&self, verb: &str, args: &[String]) -> Result<CommandResponse> {
        let Some(file) = file_arg(args) else {
            return Ok(CommandResponse::text(format!("Usage: {verb} <filename>")));
        };
        let table = self.files()?;
        let text = match table.read(file, self.stage.has_elevated_access()) {
            Ok(content) => content.to_string(),
            Err(e @ AccessError::NotFound(_)) => format!("{verb}: {e}"),
            Err(e @ AccessError::PermissionDenied(_)) => {
                format!("{verb}: {e}. Need root access to open this file.")
            },
        };
        Ok(CommandResponse::text(text))
    }

    fn request_password(&mut self) -> CommandResponse {
        self.prompt = Some(PromptKind::Password);
        CommandResponse::text("[sudo] password for root:")
            .with_signal(Signal::Prompt(PromptKind::Password))
    }

    fn help(&self) -> CommandResponse {
        let mut out = String::from("Available commands:\n");
        for cmd in self.visible_commands() {
            out.push_str(&format!("  {:<8} {}\n", cmd.name, cmd.description));
        }
        CommandResponse::text(out.trim_end())
    }

    fn decrypt(&mut self, args: &[String]) -> Result<CommandResponse> {
        let Some(file) = file_arg(args) else {
            return Ok(CommandResponse::text("Usage: decrypt <filename>"));
        };
        let table = self.files()?;
        if !table.contains(file) {
            return Ok(CommandResponse::text(format!(
                "decrypt: {file}: No such file or directory"
            )));
        }
        if !file.ends_with(".encrypted") {
            return Ok(CommandResponse::text(format!(
                "decrypt: {file}: File is not encrypted"
            )));
        }
        if !self.stage.has_elevated_access() {
            return Ok(CommandResponse::text(format!(
                "decrypt: {file}: Permission denied. Root access required."
            )));
        }
        let prompt = PromptKind::Decrypt {
            file: file.to_string(),
        };
        self.prompt = Some(prompt.clone());
        Ok(CommandResponse::text(format!(
            "Decrypting {file}\nEnter the 5-letter key and the 3-digit decimal."
        ))
        .with_signal(Signal::Prompt(prompt)))
    }

    // -----------------------------------------------------------------------
    // Prompt answers
    // -----------------------------------------------------------------------

    fn mismatch(&self, wanted: &str) -> ShellError {
        match &self.prompt {
            None => ShellError::Prompt("no prompt is open".to_string()),
            Some(PromptKind::Password) => {
                ShellError::Prompt(format!("a password prompt is open, not a {wanted} prompt"))
            },
            Some(PromptKind::Decrypt { .. }) => {
                ShellError::Prompt(format!("a decrypt prompt is open, not a {wanted} prompt"))
            },
        }
    }

    /// Answer the password prompt. A wrong password keeps the prompt open.
    pub fn submit_password(&mut self, password: &str) -> Result<CommandResponse> {
        if self.prompt != Some(PromptKind::Password) {
            return Err(self.mismatch("password"));
        }
        if password.trim() != self.secrets.password {
            log::debug!("special: wrong password");
            return Ok(CommandResponse::text("Incorrect password, try again.")
                .with_signal(Signal::Prompt(PromptKind::Password)));
        }
        self.prompt = None;
        if self.stage == PuzzleStage::Locked {
            self.stage = PuzzleStage::Elevated;
            log::info!("special: stage -> {:?}", self.stage);
        }
        Ok(CommandResponse::text(
            "\u{1f513} Root access granted!\n\
             File system updated. Try 'ls' to see what's available.",
        ))
    }

    /// Answer the decrypt prompt. Both fields must match; anything less is a
    /// plain failure and keeps the prompt open.
    pub fn submit_decrypt(&mut self, form: &DecryptForm) -> Result<CommandResponse> {
        let Some(PromptKind::Decrypt { file }) = self.prompt.clone() else {
            return Err(self.mismatch("decrypt"));
        };
        let valid = form.code() == self.secrets.decrypt_code.to_lowercase()
            && form.decimal() == self.secrets.decrypt_decimal;
        if !valid || self.stage != PuzzleStage::Elevated {
            log::debug!("special: decrypt rejected");
            return Ok(CommandResponse::text("Invalid keys. Try again.")
                .with_signal(Signal::Prompt(PromptKind::Decrypt { file })));
        }
        self.prompt = None;
        self.stage = PuzzleStage::Unlocked;
        log::info!("special: stage -> {:?}", self.stage);
        Ok(CommandResponse::text(format!(
            "\u{2705} Decryption successful!\n\
             File decrypted: {PLAIN_FILE}\n\
             Try 'open {PLAIN_FILE}' to read it."
        )))
    }
}

impl CompletionSource for SpecialMode {
    fn entries(&self) -> Vec<CompletionEntry> {
        COMMANDS.iter().map(|c| self.completion_entry(c)).collect()
    }

    fn lookup(&self, name: &str) -> Option<CompletionEntry> {
        find_command(name).map(|c| self.completion_entry(c))
    }
}
