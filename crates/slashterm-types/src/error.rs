//! Error types for slashterm.
//!
//! `Command`, `Handler` and `Prompt` messages reach the user verbatim (the
//! dispatcher prefixes them), so they display without a category.

/// Errors produced by the slashterm engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Bad arguments or an unusable command invocation.
    #[error("{0}")]
    Command(String),

    /// A handler failed for its own reasons.
    #[error("{0}")]
    Handler(String),

    #[error("{0}")]
    Prompt(String),

    #[error("file table: {0}")]
    Vfs(String),

    #[error("config error: {0}")]
    Config(String),

    /// The content store could not produce a document.
    #[error("content unavailable: {0}")]
    Content(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
