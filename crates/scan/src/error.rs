//! crates/scan/src/error.rs
//! Error types and the status codes every outcome maps onto.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::DirectoryHandle;

/// Outcome code for opens and queries.
///
/// Values mirror the NT status codes directory-enumeration callers already
/// know, so output from this crate can be compared line by line with native
/// listings. Codes with the top two bits set are errors; `0x8...` codes are
/// warnings that end a pass.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u32)]
pub enum Status {
    /// Entries were returned.
    Ok = 0x0000_0000,
    /// The pass has no further entries.
    NoMoreEntries = 0x8000_0006,
    /// The first fetch of a filtered pass found nothing.
    NoMatchingEntries = 0xC000_000F,
    /// The handle is not open.
    InvalidHandle = 0xC000_0008,
    /// The caller's buffer cannot hold a single record.
    BufferTooSmall = 0xC000_0023,
    /// Opening the directory was refused.
    AccessDenied = 0xC000_0022,
    /// The directory does not exist.
    NotFound = 0xC000_0034,
    /// The path names something other than a directory.
    NotADirectory = 0xC000_0103,
    /// The entry source failed.
    SourceUnavailable = 0xC000_0185,
}

impl Status {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Returns `true` for error-severity codes.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.code() >> 30 == 0b11
    }

    /// Returns a stable name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NoMoreEntries => "no more entries",
            Self::NoMatchingEntries => "no matching entries",
            Self::InvalidHandle => "invalid handle",
            Self::BufferTooSmall => "buffer too small",
            Self::AccessDenied => "access denied",
            Self::NotFound => "not found",
            Self::NotADirectory => "not a directory",
            Self::SourceUnavailable => "source unavailable",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::UpperHex for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.code(), f)
    }
}

/// Failure reported by [`ScanEngine::query`](crate::ScanEngine::query) and
/// [`ScanEngine::close`](crate::ScanEngine::close).
#[derive(Debug, Error)]
pub enum ScanError {
    /// The handle was never opened or has been closed.
    #[error("directory handle {handle} is not open")]
    InvalidHandle {
        /// Handle supplied by the caller.
        handle: DirectoryHandle,
    },
    /// The buffer cannot hold the next record. Scan state is unchanged.
    #[error("buffer of {capacity} bytes is too small; {required} bytes are required")]
    BufferTooSmall {
        /// Capacity supplied by the caller.
        capacity: usize,
        /// Capacity that would have let the call make progress.
        required: usize,
    },
    /// The entry source failed. Scan state is unchanged.
    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),
}

impl ScanError {
    pub(crate) const fn invalid_handle(handle: DirectoryHandle) -> Self {
        Self::InvalidHandle { handle }
    }

    pub(crate) const fn buffer_too_small(capacity: usize, required: usize) -> Self {
        Self::BufferTooSmall { capacity, required }
    }

    /// Returns the status code for this failure.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::InvalidHandle { .. } => Status::InvalidHandle,
            Self::BufferTooSmall { .. } => Status::BufferTooSmall,
            Self::SourceUnavailable(_) => Status::SourceUnavailable,
        }
    }
}

/// Failure reported when a directory cannot be opened.
#[derive(Debug, Error)]
pub enum OpenError {
    /// Nothing exists at the path.
    #[error("directory '{}' does not exist", .path.display())]
    NotFound {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// The path exists but may not be read.
    #[error("access to directory '{}' was denied", .path.display())]
    AccessDenied {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// The path exists but is not a directory.
    #[error("'{}' is not a directory", .path.display())]
    NotADirectory {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// Any other I/O failure.
    #[error("failed to open directory '{}': {source}", .path.display())]
    Io {
        /// Path supplied by the caller.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
}

impl OpenError {
    /// Classifies an I/O failure raised while inspecting `path`.
    #[must_use]
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Returns the path the caller tried to open.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::AccessDenied { path }
            | Self::NotADirectory { path }
            | Self::Io { path, .. } => path,
        }
    }

    /// Returns the status code for this failure.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::NotFound { .. } => Status::NotFound,
            Self::AccessDenied { .. } => Status::AccessDenied,
            Self::NotADirectory { .. } => Status::NotADirectory,
            Self::Io { .. } => Status::SourceUnavailable,
        }
    }
}

/// Failure raised by an [`EntrySource`](crate::EntrySource) while listing.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The directory could not be read.
    #[error("failed to read directory '{}': {source}", .path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// An individual entry could not be read.
    #[error("failed to read entry in '{}': {source}", .path.display())]
    ReadEntry {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Metadata for an entry could not be retrieved.
    #[error("failed to inspect metadata for '{}': {source}", .path.display())]
    Metadata {
        /// Entry whose metadata failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    /// Reports a failure to read `path`.
    #[must_use]
    pub const fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::ReadDir { path, source }
    }

    /// Reports a failure to read one entry of `path`.
    #[must_use]
    pub const fn read_entry(path: PathBuf, source: io::Error) -> Self {
        Self::ReadEntry { path, source }
    }

    /// Reports a failure to stat `path`.
    #[must_use]
    pub const fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::Metadata { path, source }
    }

    /// Returns the path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadDir { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::Metadata { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn io_error(message: &'static str) -> io::Error {
        io::Error::other(message)
    }

    #[test]
    fn status_codes_and_severity() {
        assert_eq!(format!("{:X}", Status::NoMoreEntries), "80000006");
        assert_eq!(format!("{:X}", Status::NoMatchingEntries), "C000000F");
        assert_eq!(format!("{:X}", Status::Ok), "0");
        assert!(!Status::Ok.is_error());
        assert!(!Status::NoMoreEntries.is_error());
        assert!(Status::NoMatchingEntries.is_error());
        assert!(Status::SourceUnavailable.is_error());
    }

    #[test]
    fn scan_error_maps_to_status() {
        let invalid = ScanError::invalid_handle(DirectoryHandle::from_raw(9));
        assert_eq!(invalid.status(), Status::InvalidHandle);
        assert_eq!(invalid.to_string(), "directory handle 9 is not open");

        let small = ScanError::buffer_too_small(10, 574);
        assert_eq!(small.status(), Status::BufferTooSmall);
        assert_eq!(
            small.to_string(),
            "buffer of 10 bytes is too small; 574 bytes are required"
        );

        let source: ScanError = SourceError::read_dir(PathBuf::from("dir"), io_error("boom")).into();
        assert_eq!(source.status(), Status::SourceUnavailable);
        assert_eq!(source.to_string(), "failed to read directory 'dir': boom");
    }

    #[test]
    fn open_error_classifies_io_kinds() {
        let missing = OpenError::from_io(
            PathBuf::from("gone"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(missing, OpenError::NotFound { .. }));
        assert_eq!(missing.status(), Status::NotFound);
        assert_eq!(missing.path(), Path::new("gone"));

        let denied = OpenError::from_io(
            PathBuf::from("locked"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(denied.status(), Status::AccessDenied);

        let other = OpenError::from_io(PathBuf::from("odd"), io_error("weird"));
        assert_eq!(other.status(), Status::SourceUnavailable);
        assert_eq!(other.source().map(ToString::to_string), Some("weird".into()));
    }

    #[test]
    fn source_error_exposes_path_and_io_source() {
        let error = SourceError::metadata(PathBuf::from("dir/entry"), io_error("stat"));
        assert_eq!(error.path(), Path::new("dir/entry"));
        let source = error
            .source()
            .and_then(|err| err.downcast_ref::<io::Error>())
            .expect("source error should expose the underlying io::Error");
        assert_eq!(source.to_string(), "stat");
    }
}
