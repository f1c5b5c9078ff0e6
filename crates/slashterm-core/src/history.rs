//! Submitted-command history with an up/down recall cursor.

/// Append-only command history.
///
/// Consecutive duplicates collapse into one entry. The cursor indexes into
/// the entries; `entries.len()` means "past the end", i.e. a fresh line.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and reset the cursor past the end.
    pub fn push(&mut self, line: &str) {
        // Don't duplicate the last entry.
        if self.entries.last().is_none_or(|last| last != line) {
            self.entries.push(line.to_string());
        }
        self.cursor = self.entries.len();
    }

    /// Step back one entry. `None` when already at the oldest entry.
    pub fn older(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step forward one entry. Landing just past the newest entry yields an
    /// empty string (a blank line); stepping further yields `None`.
    pub fn newer(&mut self) -> Option<&str> {
        let len = self.entries.len();
        if self.cursor + 1 < len {
            self.cursor += 1;
            self.entries.get(self.cursor).map(String::as_str)
        } else if self.cursor + 1 == len {
            self.cursor = len;
            Some("")
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
