use std::{
    fs, io,
    path::{Path, PathBuf},
};

mod document;
pub mod layout;

pub use document::FeatureDocument;
pub use layout::OutputLayout;

/// Errors raised while preparing or writing the output directories.
///
/// All of these are fatal for a run. Files written before the failure are
/// left in place.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// An output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An output directory could not be read.
    #[error("failed to read directory {}: {source}", path.display())]
    Scan {
        /// The directory being scanned.
        path: PathBuf,
        /// The underlying traversal error.
        source: walkdir::Error,
    },

    /// A stale feature file could not be deleted.
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        /// The file that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A feature file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Writes a rendered document to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_document(path: &Path, document: &FeatureDocument) -> Result<(), OutputError> {
    fs::write(path, document.render()).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
