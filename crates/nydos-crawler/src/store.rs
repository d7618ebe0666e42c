//! On-disk response log.
//!
//! Every response body is written verbatim to a file named after its search token or
//! entity identifier. A second write for the same name appends after the existing bytes
//! with no separator, so a file holds one or more concatenated JSON documents and is not
//! valid JSON as a whole once appended to. The existence of a file doubles as the
//! "already fetched" marker for entity details.
//!
//! There is no locking: two processes sharing an output directory race on the
//! existence check.

use std::fmt;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::config::output;
use crate::error::{StoreError, StoreResult};
use crate::models::EntityIdentifier;
use crate::token::SearchToken;

/// Logical output artifact; the variant fixes the filename template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFile {
    /// Single-cycle search response: `search_results<token>.json`.
    SearchResults(SearchToken),
    /// Search response from a scan cycle: `api_search_<token>.json`.
    ApiSearch(SearchToken),
    /// Entity detail response: `business_data_<id>.json`.
    BusinessData(EntityIdentifier),
}

impl OutputFile {
    /// File name inside the output directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        match self {
            Self::SearchResults(token) => format!("search_results{token}.json"),
            Self::ApiSearch(token) => format!("api_search_{token}.json"),
            Self::BusinessData(id) => format!("business_data_{id}.json"),
        }
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// What a write did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File did not exist and now holds exactly the payload.
    Created,
    /// Payload was appended after existing content.
    Appended,
}

/// Output directory handle.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Store rooted at `root`. Nothing is touched on disk until a write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory (and parents) if it is missing.
    pub async fn ensure_root(&self) -> StoreResult<()> {
        if tokio::fs::metadata(&self.root).await.is_ok_and(|m| m.is_dir()) {
            return Ok(());
        }

        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(output::DIR_MODE);

        builder
            .create(&self.root)
            .await
            .map_err(|source| StoreError::CreateDir { path: self.root.clone(), source })?;

        tracing::info!(path = %self.root.display(), "Created output directory");
        Ok(())
    }

    /// Absolute or root-relative path of an artifact.
    #[must_use]
    pub fn path_for(&self, file: &OutputFile) -> PathBuf {
        self.root.join(file.file_name())
    }

    /// Whether the artifact already exists as a regular file.
    pub async fn exists(&self, file: &OutputFile) -> bool {
        tokio::fs::metadata(self.path_for(file)).await.is_ok_and(|m| m.is_file())
    }

    /// Create the artifact with `payload`, or append `payload` if it already exists.
    pub async fn write_or_append(
        &self,
        file: &OutputFile,
        payload: &[u8],
    ) -> StoreResult<WriteOutcome> {
        let path = self.path_for(file);
        let outcome =
            if self.exists(file).await { WriteOutcome::Appended } else { WriteOutcome::Created };

        let mut options = tokio::fs::OpenOptions::new();
        match outcome {
            WriteOutcome::Created => options.write(true).create(true).truncate(true),
            WriteOutcome::Appended => options.append(true),
        };

        let mut handle = options
            .open(&path)
            .await
            .map_err(|source| StoreError::Open { path: path.clone(), source })?;

        handle.write_all(payload).await.map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        handle.flush().await.map_err(|source| StoreError::Write { path: path.clone(), source })?;

        tracing::debug!(path = %path.display(), bytes = payload.len(), ?outcome, "Persisted response");
        Ok(outcome)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(output::DEFAULT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> SearchToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(OutputFile::SearchResults(token("abc")).file_name(), "search_resultsabc.json");
        assert_eq!(OutputFile::ApiSearch(token("abc")).file_name(), "api_search_abc.json");
        assert_eq!(
            OutputFile::BusinessData(EntityIdentifier::new(123)).file_name(),
            "business_data_123.json"
        );
    }

    #[test]
    fn test_path_for_joins_root() {
        let store = Store::new("assets");
        let path = store.path_for(&OutputFile::BusinessData(EntityIdentifier::new(9)));
        assert_eq!(path, PathBuf::from("assets").join("business_data_9.json"));
    }

    #[tokio::test]
    async fn test_create_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let file = OutputFile::ApiSearch(token("qrs"));

        assert!(!store.exists(&file).await);
        let first = store.write_or_append(&file, b"{\"a\":1}").await.unwrap();
        assert_eq!(first, WriteOutcome::Created);
        assert_eq!(std::fs::read(store.path_for(&file)).unwrap(), b"{\"a\":1}");

        let second = store.write_or_append(&file, b"{\"b\":2}").await.unwrap();
        assert_eq!(second, WriteOutcome::Appended);
        assert_eq!(std::fs::read(store.path_for(&file)).unwrap(), b"{\"a\":1}{\"b\":2}");
    }

    #[tokio::test]
    async fn test_ensure_root_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out").join("assets");
        let store = Store::new(&root);

        store.ensure_root().await.unwrap();
        assert!(root.is_dir());
        // Idempotent.
        store.ensure_root().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_root_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("assets");
        Store::new(&root).ensure_root().await.unwrap();

        let mode = std::fs::metadata(&root).unwrap().permissions().mode() & 0o777;
        // The process umask can only remove bits.
        assert_eq!(mode & !0o755, 0);
        assert_ne!(mode & 0o700, 0);
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing"));
        let err = store
            .write_or_append(&OutputFile::BusinessData(EntityIdentifier::new(1)), b"{}")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }
}
