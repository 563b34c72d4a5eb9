//! Output directory layout
//!
//! Generated feature files live under `<workspace>/bdd_tests`:
//!
//! - `bdd_tests/functional/<feature>.feature`
//! - `bdd_tests/non_functional/<feature>.feature`
//! - `bdd_tests/<feature>.feature` (combined output, when enabled)
//!
//! These directories are owned by the splitter. Every run starts by deleting
//! the `.feature` files already in them, so output is always regenerated from
//! scratch rather than updated in place.

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::OutputError;
use crate::domain::{Classification, feature::FEATURE_EXTENSION};

/// The directory, relative to the workspace, that holds all generated output.
pub const DIR_BDD_TESTS: &str = "bdd_tests";

/// Paths for the generated feature files of one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base: PathBuf,
}

impl OutputLayout {
    /// Construct the layout for the given workspace root.
    #[must_use]
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            base: workspace.as_ref().join(DIR_BDD_TESTS),
        }
    }

    /// `bdd_tests/`
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `bdd_tests/functional/`
    #[must_use]
    pub fn functional(&self) -> PathBuf {
        self.dir(Classification::Functional)
    }

    /// `bdd_tests/non_functional/`
    #[must_use]
    pub fn non_functional(&self) -> PathBuf {
        self.dir(Classification::NonFunctional)
    }

    /// The directory for a classification bucket.
    #[must_use]
    pub fn dir(&self, classification: Classification) -> PathBuf {
        self.base.join(classification.dir_name())
    }

    /// `bdd_tests/<bucket>/<file_name>`
    #[must_use]
    pub fn bucket_file(&self, classification: Classification, file_name: &str) -> PathBuf {
        self.dir(classification).join(file_name)
    }

    /// `bdd_tests/<file_name>`
    #[must_use]
    pub fn combined_file(&self, file_name: &str) -> PathBuf {
        self.base.join(file_name)
    }

    /// Ensures the bucket directories exist and removes stale feature files.
    ///
    /// When `include_base` is `true` the `bdd_tests` directory itself is also
    /// cleared, for combined output. Files with other extensions and nested
    /// directories are left untouched.
    ///
    /// Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or read, or if a
    /// stale file cannot be deleted.
    pub fn prepare(&self, include_base: bool) -> Result<usize, OutputError> {
        let mut dirs: Vec<PathBuf> = Classification::ALL
            .into_iter()
            .map(|classification| self.dir(classification))
            .collect();
        if include_base {
            dirs.push(self.base.clone());
        }

        let mut removed = 0;
        for dir in &dirs {
            fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            removed += clear_feature_files(dir)?;
        }

        Ok(removed)
    }
}

/// Deletes every `.feature` file directly inside `dir`, including one named
/// just `.feature`.
fn clear_feature_files(dir: &Path) -> Result<usize, OutputError> {
    let suffix = format!(".{FEATURE_EXTENSION}");
    let mut removed = 0;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| OutputError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file()
            || !entry.file_name().to_string_lossy().ends_with(&suffix)
        {
            continue;
        }

        fs::remove_file(entry.path()).map_err(|source| OutputError::Remove {
            path: entry.path().to_path_buf(),
            source,
        })?;
        tracing::debug!("Removed stale feature file {}", entry.path().display());
        removed += 1;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn paths_are_stable() {
        let layout = OutputLayout::new("/tmp/workspace");

        assert_eq!(layout.base(), Path::new("/tmp/workspace/bdd_tests"));
        assert_eq!(
            layout.functional(),
            PathBuf::from("/tmp/workspace/bdd_tests/functional")
        );
        assert_eq!(
            layout.non_functional(),
            PathBuf::from("/tmp/workspace/bdd_tests/non_functional")
        );
        assert_eq!(
            layout.bucket_file(Classification::NonFunctional, "login.feature"),
            PathBuf::from("/tmp/workspace/bdd_tests/non_functional/login.feature")
        );
        assert_eq!(
            layout.combined_file("login.feature"),
            PathBuf::from("/tmp/workspace/bdd_tests/login.feature")
        );
    }

    #[test]
    fn prepare_creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let layout = OutputLayout::new(tmp.path());

        assert_eq!(layout.prepare(false).unwrap(), 0);

        assert!(layout.functional().is_dir());
        assert!(layout.non_functional().is_dir());
    }

    #[test]
    fn prepare_removes_only_feature_files() {
        let tmp = TempDir::new().unwrap();
        let layout = OutputLayout::new(tmp.path());
        fs::create_dir_all(layout.functional().join("nested")).unwrap();
        fs::create_dir_all(layout.non_functional()).unwrap();

        fs::write(layout.functional().join("old.feature"), "stale").unwrap();
        fs::write(layout.non_functional().join("old.feature"), "stale").unwrap();
        fs::write(layout.functional().join("notes.md"), "keep").unwrap();
        fs::write(layout.functional().join("nested/deep.feature"), "keep").unwrap();

        assert_eq!(layout.prepare(false).unwrap(), 2);

        assert!(!layout.functional().join("old.feature").exists());
        assert!(!layout.non_functional().join("old.feature").exists());
        assert!(layout.functional().join("notes.md").exists());
        assert!(layout.functional().join("nested/deep.feature").exists());
    }

    #[test]
    fn prepare_clears_base_only_when_asked() {
        let tmp = TempDir::new().unwrap();
        let layout = OutputLayout::new(tmp.path());
        fs::create_dir_all(layout.base()).unwrap();
        let combined = layout.combined_file("all.feature");
        fs::write(&combined, "stale").unwrap();

        layout.prepare(false).unwrap();
        assert!(combined.exists());

        layout.prepare(true).unwrap();
        assert!(!combined.exists());
    }

    #[test]
    fn prepare_fails_when_base_is_a_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DIR_BDD_TESTS), "not a directory").unwrap();

        let error = OutputLayout::new(tmp.path()).prepare(false).unwrap_err();
        assert!(matches!(error, OutputError::CreateDir { .. }));
    }
}
