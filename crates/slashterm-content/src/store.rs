//! Content store: where handlers fetch their data from.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use slashterm_types::{Result, ShellError};

/// Read access to site content, keyed by a relative path such as
/// `resume.json`.
#[async_trait(?Send)]
pub trait ContentStore {
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// A content store rooted at a directory on disk.
///
/// Successful reads are cached for the life of the store; failures are not,
/// so a later fetch retries.
#[derive(Debug)]
pub struct FsContentStore {
    root: PathBuf,
    cache: RefCell<HashMap<String, String>>,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = path.trim_start_matches('/');
        if rel.is_empty() || rel.split('/').any(|part| part == "..") {
            return Err(ShellError::Content(format!("invalid content path: {path}")));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait(?Send)]
impl ContentStore for FsContentStore {
    async fn fetch(&self, path: &str) -> Result<String> {
        if let Some(hit) = self.cache.borrow().get(path) {
            return Ok(hit.clone());
        }
        let full = self.resolve(path)?;
        let text = tokio::fs::read_to_string(&full).await.map_err(|e| {
            log::warn!("content fetch failed for {}: {e}", full.display());
            ShellError::Content(format!("{path}: {e}"))
        })?;
        log::debug!("content: loaded {path} ({} bytes)", text.len());
        self.cache
            .borrow_mut()
            .insert(path.to_string(), text.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resume.json"), "{}").unwrap();
        let store = FsContentStore::new(dir.path());

        assert_eq!(store.fetch("resume.json").await.unwrap(), "{}");
        // Served from cache after the file changes on disk.
        std::fs::write(dir.path().join("resume.json"), "[]").unwrap();
        assert_eq!(store.fetch("resume.json").await.unwrap(), "{}");

        store.clear_cache();
        assert_eq!(store.fetch("resume.json").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn leading_slash_is_relative() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("about.md"), "hi").unwrap();
        let store = FsContentStore::new(dir.path());
        assert_eq!(store.fetch("/about.md").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn missing_file_is_content_error_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::new(dir.path());
        let err = store.fetch("resume.json").await.unwrap_err();
        assert!(matches!(err, ShellError::Content(_)));
        assert!(err.to_string().contains("resume.json"));

        std::fs::write(dir.path().join("resume.json"), "{}").unwrap();
        assert!(store.fetch("resume.json").await.is_ok());
    }

    #[tokio::test]
    async fn parent_segments_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::new(dir.path());
        assert!(store.fetch("../etc/passwd").await.is_err());
        assert!(store.fetch("").await.is_err());
    }
}
