//! Flat virtual file table for slashterm.
//!
//! The special mode exposes a single directory of named files, some of which
//! need elevated access to read. [`FileTable`] keeps them in insertion order
//! so listings are stable across state changes.

mod memory;

pub use memory::FileTable;

use slashterm_types::ShellError;

/// A single file: its content and whether reading it needs elevated access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub content: String,
    pub requires_elevated: bool,
}

impl FileEntry {
    /// A file anyone can read.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            requires_elevated: false,
        }
    }

    /// A file that needs elevated access.
    pub fn restricted(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            requires_elevated: true,
        }
    }
}

/// Why a read was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{0}: Permission denied")]
    PermissionDenied(String),
}

impl From<AccessError> for ShellError {
    fn from(e: AccessError) -> Self {
        ShellError::Vfs(e.to_string())
    }
}
