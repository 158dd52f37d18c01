// crates/strip_marked_range/src/processor/file_processor.rs

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::{strip_marked_range, MarkerPositions, MarkerRange, StripOutcome};

/// Target file and the two markers delimiting the range to remove.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripConfig {
    pub target: PathBuf,
    pub start_marker: String,
    pub end_marker: String,
}

/// What a run did to the target file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StripReport {
    Stripped { range: MarkerRange },
    MarkersNotFound(MarkerPositions),
}

/// Trait that abstracts where documents are loaded from and saved to.
pub trait DocumentStore {
    /// Reads the whole document as UTF-8 text.
    fn read(&self, path: &Path) -> Result<String>;
    /// Replaces the document with `contents`.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Filesystem store. Writes go to a temporary file next to the target,
/// which is then renamed over it.
pub struct FsDocumentStore;

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Edit through symlinks: replace the file the link points at, not the link.
        let resolved;
        let path = if path.exists() {
            resolved = fs::canonicalize(path)
                .with_context(|| format!("Failed to resolve {}", path.display()))?;
            resolved.as_path()
        } else {
            path
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp_file
            .write_all(contents.as_bytes())
            .context("Failed to write temporary file")?;
        temp_file
            .as_file()
            .sync_all()
            .context("Failed to flush temporary file")?;

        // Keep the original file's mode; tempfile creates 0600 files.
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp_file.path(), metadata.permissions())
                .context("Failed to copy permissions onto temporary file")?;
        }

        temp_file
            .persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        log::debug!("replaced {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// Runs the full pipeline against `store`: load, scan, splice, write.
///
/// User-facing progress goes to `out`:
///   - `Deleting lines {start} to {end}` then `Success` when the range was removed,
///   - `Could not find start/end markers` when either marker is missing.
///
/// An inverted range is returned as an error before anything is written.
pub fn run_strip(
    store: &dyn DocumentStore,
    config: &StripConfig,
    out: &mut dyn Write,
) -> Result<StripReport> {
    let content = store.read(&config.target)?;
    log::info!(
        "loaded {} ({} bytes)",
        config.target.display(),
        content.len()
    );

    let outcome = strip_marked_range(&content, &config.start_marker, &config.end_marker)
        .with_context(|| format!("Refusing to edit {}", config.target.display()))?;

    match outcome {
        StripOutcome::Stripped { range, content } => {
            writeln!(out, "Deleting lines {} to {}", range.start(), range.end())?;
            log::debug!("removing {} line(s)", range.len());
            store.write(&config.target, &content)?;
            writeln!(out, "Success")?;
            Ok(StripReport::Stripped { range })
        }
        StripOutcome::MarkersNotFound(positions) => {
            log::debug!("marker positions: {:?}", positions);
            writeln!(out, "Could not find start/end markers")?;
            Ok(StripReport::MarkersNotFound(positions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Store that keeps a single document in memory and counts writes.
    struct MemoryStore {
        contents: RefCell<String>,
        writes: RefCell<usize>,
    }

    impl MemoryStore {
        fn new(contents: &str) -> Self {
            Self {
                contents: RefCell::new(contents.to_string()),
                writes: RefCell::new(0),
            }
        }
    }

    impl DocumentStore for MemoryStore {
        fn read(&self, _path: &Path) -> Result<String> {
            Ok(self.contents.borrow().clone())
        }

        fn write(&self, _path: &Path, contents: &str) -> Result<()> {
            *self.contents.borrow_mut() = contents.to_string();
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }

    /// Dummy store that always fails to read.
    struct FailingStore;

    impl DocumentStore for FailingStore {
        fn read(&self, _path: &Path) -> Result<String> {
            Err(anyhow!("Simulated read failure"))
        }

        fn write(&self, _path: &Path, _contents: &str) -> Result<()> {
            Err(anyhow!("Simulated write failure"))
        }
    }

    fn config() -> StripConfig {
        StripConfig {
            target: PathBuf::from("Widget.tsx"),
            start_marker: "BEGIN".to_string(),
            end_marker: "END".to_string(),
        }
    }

    #[test]
    fn test_run_strip_removes_range_and_reports() {
        let store = MemoryStore::new("one\nBEGIN\ntwo\nEND\nthree\n");
        let mut out = Vec::new();
        let report = run_strip(&store, &config(), &mut out).unwrap();

        assert_eq!(report, StripReport::Stripped { range: MarkerRange { start: 1, end: 3 } });
        assert_eq!(*store.contents.borrow(), "one\nEND\nthree\n");
        assert_eq!(*store.writes.borrow(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Deleting lines 1 to 3\nSuccess\n");
    }

    #[test]
    fn test_run_strip_missing_marker_does_not_write() {
        let store = MemoryStore::new("one\nBEGIN\ntwo\n");
        let mut out = Vec::new();
        let report = run_strip(&store, &config(), &mut out).unwrap();

        assert_eq!(
            report,
            StripReport::MarkersNotFound(MarkerPositions { start: Some(1), end: None })
        );
        assert_eq!(*store.writes.borrow(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "Could not find start/end markers\n");
    }

    #[test]
    fn test_run_strip_inverted_range_is_error() {
        let store = MemoryStore::new("END\nmiddle\nBEGIN\n");
        let mut out = Vec::new();
        let err = run_strip(&store, &config(), &mut out).unwrap_err();

        assert!(format!("{:#}", err).contains("does not precede"));
        assert_eq!(*store.writes.borrow(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_strip_propagates_read_failure() {
        let mut out = Vec::new();
        let result = run_strip(&FailingStore, &config(), &mut out);
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_fs_store_write_replaces_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Widget.tsx");
        fs::write(&path, "old contents\n").unwrap();

        FsDocumentStore.write(&path, "new contents\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents\n");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("Widget.tsx");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FsDocumentStore.write(&path, "new\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_write_follows_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let real = dir.path().join("real.tsx");
        let link = dir.path().join("link.tsx");
        fs::write(&real, "a\nBEGIN\nb\nEND\n").unwrap();
        symlink(&real, &link).unwrap();

        let config = StripConfig { target: link.clone(), ..config() };
        let mut out = Vec::new();
        run_strip(&FsDocumentStore, &config, &mut out).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "a\nEND\n");
        assert_eq!(fs::read_to_string(&link).unwrap(), "a\nEND\n");
    }

    #[test]
    fn test_fs_store_read_missing_file_has_path_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.tsx");
        let err = FsDocumentStore.read(&path).unwrap_err();
        assert!(err.to_string().contains("missing.tsx"));
    }
}
