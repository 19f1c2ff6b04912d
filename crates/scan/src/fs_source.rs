//! crates/scan/src/fs_source.rs
//! [`EntrySource`] backed by the local filesystem.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;
use logging::trace_source;

use crate::{
    Attributes, EntrySource, Listing, OpenError, RawEntry, SourceDirectory, SourceError,
    SourcePosition,
};

/// Lists real directories through `std::fs`.
///
/// Every [`list_from`](EntrySource::list_from) call reads the directory
/// afresh and sorts the names lexicographically, so positions stay stable
/// across calls and platforms while the directory is unchanged. Metadata is
/// fetched lazily, one entry at a time, as the engine consumes the listing.
///
/// # Cost
///
/// Nothing is cached between calls. Paging through `n` names costs one full
/// directory read and sort per page, so a single-entry pass performs `n`
/// reads and `O(n² log n)` work overall. Prefer multi-record pages for large
/// directories. Names created between calls therefore show up in later
/// pages when they sort after the cursor.
#[derive(Clone, Copy, Debug)]
pub struct FsEntrySource {
    include_dot_entries: bool,
}

impl Default for FsEntrySource {
    fn default() -> Self {
        Self::new()
    }
}

impl FsEntrySource {
    /// Creates a source that lists `.` and `..` ahead of real entries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_dot_entries: true,
        }
    }

    /// Controls whether the `.` and `..` pseudo-entries are listed.
    #[must_use]
    pub const fn include_dot_entries(mut self, include: bool) -> Self {
        self.include_dot_entries = include;
        self
    }

    fn sorted_names(&self, dir: &Path) -> Result<Vec<OsString>, SourceError> {
        let reader =
            fs::read_dir(dir).map_err(|error| SourceError::read_dir(dir.to_path_buf(), error))?;
        let mut names = Vec::new();
        for entry in reader {
            let entry =
                entry.map_err(|error| SourceError::read_entry(dir.to_path_buf(), error))?;
            names.push(entry.file_name());
        }
        names.sort();

        if self.include_dot_entries {
            names.insert(0, OsString::from(".."));
            names.insert(0, OsString::from("."));
        }
        Ok(names)
    }
}

impl EntrySource for FsEntrySource {
    fn open(&self, path: &Path) -> Result<SourceDirectory, OpenError> {
        let metadata =
            fs::metadata(path).map_err(|error| OpenError::from_io(path.to_path_buf(), error))?;
        if !metadata.is_dir() {
            return Err(OpenError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        // Probe readability now so permission problems surface on open.
        fs::read_dir(path).map_err(|error| OpenError::from_io(path.to_path_buf(), error))?;
        Ok(SourceDirectory::new(path))
    }

    fn list_from(
        &self,
        directory: &SourceDirectory,
        position: SourcePosition,
    ) -> Result<Listing<'_>, SourceError> {
        let dir = directory.path().to_path_buf();
        let names = self.sorted_names(&dir)?;
        trace_source!(
            dir = %dir.display(),
            names = names.len(),
            from = position.index(),
            "read directory"
        );

        let skip = usize::try_from(position.index()).unwrap_or(usize::MAX);
        let listing = names
            .into_iter()
            .skip(skip)
            .filter_map(move |name| stat_entry(&dir, name).transpose());
        Ok(Box::new(listing))
    }
}

/// Stats one listed name. Entries that vanished since the directory read
/// yield `Ok(None)` and are skipped.
fn stat_entry(dir: &Path, name: OsString) -> Result<Option<RawEntry>, SourceError> {
    let (path, metadata) = if name == "." {
        (dir.to_path_buf(), fs::metadata(dir))
    } else if name == ".." {
        let parent = dir.join("..");
        let metadata = fs::metadata(&parent);
        (parent, metadata)
    } else {
        let path = dir.join(&name);
        let metadata = fs::symlink_metadata(&path);
        (path, metadata)
    };

    match metadata {
        Ok(metadata) => Ok(Some(raw_entry(name, &metadata))),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            trace_source!(path = %path.display(), "entry vanished");
            Ok(None)
        }
        Err(error) => Err(SourceError::metadata(path, error)),
    }
}

fn raw_entry(name: OsString, metadata: &fs::Metadata) -> RawEntry {
    let name = name.to_string_lossy().into_owned();
    let file_type = metadata.file_type();
    let directory = file_type.is_dir();
    let attributes = Attributes {
        directory,
        hidden: is_hidden(&name, metadata),
        read_only: metadata.permissions().readonly(),
        reparse_point: file_type.is_symlink(),
    };

    RawEntry {
        end_of_file: if directory { 0 } else { metadata.len() },
        allocation_size: allocation_size(metadata),
        creation_time: FileTime::from_creation_time(metadata),
        last_access_time: FileTime::from_last_access_time(metadata),
        last_write_time: FileTime::from_last_modification_time(metadata),
        change_time: change_time(metadata),
        attributes,
        name,
    }
}

#[cfg(windows)]
fn is_hidden(_name: &str, metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes() & Attributes::HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(name: &str, _metadata: &fs::Metadata) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

#[cfg(unix)]
fn allocation_size(metadata: &fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.blocks().saturating_mul(512))
}

#[cfg(not(unix))]
fn allocation_size(_metadata: &fs::Metadata) -> Option<u64> {
    None
}

#[cfg(unix)]
fn change_time(metadata: &fs::Metadata) -> Option<FileTime> {
    use std::os::unix::fs::MetadataExt;
    Some(FileTime::from_unix_time(
        metadata.ctime(),
        metadata.ctime_nsec() as u32,
    ))
}

#[cfg(not(unix))]
fn change_time(_metadata: &fs::Metadata) -> Option<FileTime> {
    None
}
