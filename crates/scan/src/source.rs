//! crates/scan/src/source.rs
//! The collaborator that produces raw directory entries.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{OpenError, RawEntry, SourceError};

/// Lazy, finite sequence of raw entries returned by [`EntrySource::list_from`].
pub type Listing<'a> = Box<dyn Iterator<Item = Result<RawEntry, SourceError>> + 'a>;

/// Producer of raw directory entries in a stable order.
///
/// The engine owns restartability: a source only ever has to answer "list
/// from position N" and may read the directory afresh on every call. Two
/// calls with the same position against an unchanged directory must yield
/// the same sequence.
pub trait EntrySource: Send + Sync {
    /// Resolves `path` to a directory the source can list.
    fn open(&self, path: &Path) -> Result<SourceDirectory, OpenError>;

    /// Lists the entries of `directory` starting at `position`.
    fn list_from(
        &self,
        directory: &SourceDirectory,
        position: SourcePosition,
    ) -> Result<Listing<'_>, SourceError>;
}

/// Directory identity produced by [`EntrySource::open`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SourceDirectory {
    path: PathBuf,
}

impl SourceDirectory {
    /// Wraps the path a source resolved.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Zero-based index into a source's ordered entry sequence.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourcePosition(u64);

impl SourcePosition {
    /// Position of the first entry.
    pub const START: Self = Self(0);

    /// Creates a position from a raw index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }

    /// Returns the position immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns `true` for [`SourcePosition::START`].
    #[must_use]
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
