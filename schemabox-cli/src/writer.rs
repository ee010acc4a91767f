//! Writes generated model files, with dry-run and check support.

use std::path::{Path, PathBuf};

use crate::error::{CliResult, WriteError};

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf, bytes: usize },

    /// File already held the same content and was left alone.
    Unchanged { path: PathBuf },

    /// Dry run; content was not written.
    DryRun { content: String, path: PathBuf },
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write content to a file, creating parent directories as needed.
    ///
    /// Files whose content already matches are not rewritten, so watch mode
    /// does not touch timestamps on every save.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if Self::is_current(path, content) {
            tracing::debug!(path = %path.display(), "output unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Whether `path` exists and holds exactly `content`.
    pub fn is_current(path: &Path, content: &str) -> bool {
        std::fs::read_to_string(path).is_ok_and(|existing| existing == content)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Bytes written (0 unless the file was written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONTENT: &str = "pub type Posts = ::schemabox::ArrayOf<Post>;\n";

    #[test]
    fn test_write_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.rs");

        let result = FileWriter::new(false).write(&path, CONTENT).unwrap();

        assert!(result.was_written());
        assert_eq!(result.bytes(), CONTENT.len());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONTENT);
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/models.ts");

        let result = FileWriter::new(false).write(&path, CONTENT).unwrap();

        assert!(result.was_written());
        assert!(path.exists());
    }

    #[test]
    fn test_identical_content_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.rs");
        let writer = FileWriter::new(false);

        writer.write(&path, CONTENT).unwrap();
        let second = writer.write(&path, CONTENT).unwrap();

        assert!(matches!(second, WriteResult::Unchanged { .. }));
        assert_eq!(second.bytes(), 0);
        assert_eq!(second.path(), path.as_path());
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.rs");

        let writer = FileWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer.write(&path, CONTENT).unwrap();

        assert!(!result.was_written());
        assert!(!path.exists());
        match result {
            WriteResult::DryRun { content, .. } => assert_eq!(content, CONTENT),
            other => panic!("expected dry run, got {other:?}"),
        }
    }

    #[test]
    fn test_is_current() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.rs");
        assert!(!FileWriter::is_current(&path, CONTENT));

        std::fs::write(&path, "stale").unwrap();
        assert!(!FileWriter::is_current(&path, CONTENT));

        std::fs::write(&path, CONTENT).unwrap();
        assert!(FileWriter::is_current(&path, CONTENT));
    }
}
