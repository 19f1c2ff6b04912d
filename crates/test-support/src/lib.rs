#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared fixtures for dirquery tests.
//!
//! - [`ScriptedSource`] is an in-memory [`EntrySource`] whose directories,
//!   failures and call counts are controlled by the test.
//! - [`ScratchDir`] creates throwaway directory trees on the real filesystem
//!   with pinned timestamps.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use filetime::FileTime;
use scan::{
    EntrySource, Listing, OpenError, RawEntry, SourceDirectory, SourceError, SourcePosition,
};
use tempfile::TempDir;

/// Names used by the two-header directory most scenarios start from.
pub const HEADER_FILES: [&str; 2] = ["a-file.h", "another-file.h"];

/// Contents written to every header fixture file.
pub const HEADER_CONTENTS: &[u8] = b"hello\n";

/// Where the next listing failure is injected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Failure {
    /// `list_from` itself fails.
    OnList,
    /// The listing fails after yielding this many entries.
    AfterEntries(usize),
}

#[derive(Debug, Default)]
struct Script {
    directories: BTreeMap<PathBuf, Vec<RawEntry>>,
    denied: BTreeSet<PathBuf>,
    failures: Vec<Failure>,
}

/// In-memory [`EntrySource`] for engine tests.
///
/// Clones share state, so a test can hand one clone to the engine and keep
/// another to change the directory contents or queue failures mid-scenario.
///
/// ```
/// use scan::{QueryRequest, QueryStatus, ScanEngine};
/// use test_support::ScriptedSource;
///
/// let source = ScriptedSource::new().with_names("/test", &["a", "b"]);
/// let engine = ScanEngine::builder(source.clone()).build();
/// let handle = engine.open("/test").expect("open");
/// let request = QueryRequest::new(engine.config().min_buffer_capacity() * 4);
///
/// let result = engine.query(handle, &request).expect("query");
/// assert_eq!(result.names().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(source.list_calls(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<Script>>,
    list_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Creates a source with no directories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding `/test` with `.`, `..` and the two header
    /// files.
    #[must_use]
    pub fn headers() -> Self {
        let mut names = vec![".", ".."];
        names.extend(HEADER_FILES);
        Self::new().with_names("/test", &names)
    }

    /// Adds a directory with the given entries, in listing order.
    #[must_use]
    pub fn with_directory(self, path: impl Into<PathBuf>, entries: Vec<RawEntry>) -> Self {
        self.set_entries(path, entries);
        self
    }

    /// Adds a directory of small regular files named `names`; `.` and `..`
    /// become directory entries.
    #[must_use]
    pub fn with_names(self, path: impl Into<PathBuf>, names: &[&str]) -> Self {
        let entries = names
            .iter()
            .map(|name| match *name {
                "." | ".." => RawEntry::directory(*name),
                _ => RawEntry::file(*name, HEADER_CONTENTS.len() as u64),
            })
            .collect();
        self.with_directory(path, entries)
    }

    /// Replaces a directory's entries; later listings see the new contents.
    pub fn set_entries(&self, path: impl Into<PathBuf>, entries: Vec<RawEntry>) {
        self.script().directories.insert(path.into(), entries);
    }

    /// Makes opening `path` fail with [`OpenError::AccessDenied`].
    pub fn deny(&self, path: impl Into<PathBuf>) {
        self.script().denied.insert(path.into());
    }

    /// Queues a failure for the next listing. Failures fire in queue order,
    /// one per `list_from` call.
    pub fn fail_next(&self, failure: Failure) {
        self.script().failures.push(failure);
    }

    /// Number of `list_from` calls observed so far, including failed ones.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn offline(path: &Path) -> io::Error {
    io::Error::other(format!("scripted failure listing {}", path.display()))
}

impl EntrySource for ScriptedSource {
    fn open(&self, path: &Path) -> Result<SourceDirectory, OpenError> {
        let script = self.script();
        if script.denied.contains(path) {
            return Err(OpenError::AccessDenied {
                path: path.to_path_buf(),
            });
        }
        if !script.directories.contains_key(path) {
            return Err(OpenError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(SourceDirectory::new(path))
    }

    fn list_from(
        &self,
        directory: &SourceDirectory,
        position: SourcePosition,
    ) -> Result<Listing<'_>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script();
        let path = directory.path().to_path_buf();
        let failure = if script.failures.is_empty() {
            None
        } else {
            Some(script.failures.remove(0))
        };

        if failure == Some(Failure::OnList) {
            return Err(SourceError::read_dir(path.clone(), offline(&path)));
        }
        let Some(entries) = script.directories.get(&path) else {
            return Err(SourceError::read_dir(
                path.clone(),
                io::Error::from(io::ErrorKind::NotFound),
            ));
        };

        let skip = usize::try_from(position.index()).unwrap_or(usize::MAX);
        let mut items: Vec<Result<RawEntry, SourceError>> =
            entries.iter().skip(skip).cloned().map(Ok).collect();
        if let Some(Failure::AfterEntries(count)) = failure {
            items.truncate(count);
            items.push(Err(SourceError::read_entry(path.clone(), offline(&path))));
        }
        Ok(Box::new(items.into_iter()))
    }
}

/// Timestamp pinned on every file a [`ScratchDir`] creates.
pub const PINNED_MTIME: i64 = 1_700_000_000;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    temp: TempDir,
}

impl ScratchDir {
    /// Creates an empty scratch directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    /// Creates a scratch directory holding the two header files.
    pub fn with_headers() -> io::Result<Self> {
        let scratch = Self::new()?;
        for name in HEADER_FILES {
            scratch.write(name, HEADER_CONTENTS)?;
        }
        Ok(scratch)
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Writes a file and pins its modification time to [`PINNED_MTIME`].
    pub fn write(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::write(&path, contents)?;
        filetime::set_file_mtime(&path, FileTime::from_unix_time(PINNED_MTIME, 0))?;
        Ok(path)
    }

    /// Creates a subdirectory.
    pub fn mkdir(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::create_dir(&path)?;
        Ok(path)
    }
}
