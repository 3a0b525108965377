//! Failure taxonomy for overlay installation.
//!
//! Every variant carries the underlying `io::Error` untouched as its
//! `source()`; the installer never retries or cleans up.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    /// The install disk could not be opened read-write or flushed.
    /// Nothing has been written when this is returned.
    #[error("cannot open or sync install disk '{}'", .path.display())]
    DeviceAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination directory tree could not be created. No copy was attempted.
    #[error("cannot create destination directory '{}'", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The DTB could not be copied. The destination may be partially written.
    #[error(
        "cannot copy '{}' -> '{}'",
        .source_path.display(),
        .destination.display()
    )]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown board '{0}'")]
    UnknownBoard(String),
}

impl InstallError {
    /// The underlying OS error, if this failure came from one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            InstallError::DeviceAccess { source, .. }
            | InstallError::DirectoryCreation { source, .. }
            | InstallError::Copy { source, .. } => Some(source),
            InstallError::UnknownBoard(_) => None,
        }
    }
}
