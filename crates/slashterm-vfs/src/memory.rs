//! In-memory file table.
//!
//! Entries live in a `Vec` in insertion order. Tables hold a handful of
//! files, so lookups are linear scans.

use slashterm_types::{Result, ShellError};

use crate::{AccessError, FileEntry};

/// An ordered, flat, in-memory file table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTable {
    entries: Vec<(String, FileEntry)>,
}

/// A file name is valid when it is non-empty, contains no `/`, and has no
/// surrounding whitespace.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ShellError::Vfs("empty file name".to_string()));
    }
    if name.contains('/') {
        return Err(ShellError::Vfs(format!("not a flat file name: {name}")));
    }
    if name.trim() != name {
        return Err(ShellError::Vfs(format!(
            "file name has surrounding whitespace: {name:?}"
        )));
    }
    Ok(())
}

impl FileTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Insert or replace a file. A replaced file keeps its position; a new
    /// file is appended.
    pub fn insert(&mut self, name: &str, entry: FileEntry) -> Result<()> {
        validate_name(name)?;
        match self.position(name) {
            Some(i) => self.entries[i].1 = entry,
            None => self.entries.push((name.to_string(), entry)),
        }
        Ok(())
    }

    /// Builder-style insert for static tables.
    pub fn with(mut self, name: &str, entry: FileEntry) -> Result<Self> {
        self.insert(name, entry)?;
        Ok(self)
    }

    /// Remove a file, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<FileEntry> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Read a file's content, enforcing the elevated-access gate.
    pub fn read(&self, name: &str, elevated: bool) -> std::result::Result<&str, AccessError> {
        let entry = self
            .get(name)
            .ok_or_else(|| AccessError::NotFound(name.to_string()))?;
        if entry.requires_elevated && !elevated {
            return Err(AccessError::PermissionDenied(name.to_string()));
        }
        Ok(&entry.content)
    }

    /// File names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
