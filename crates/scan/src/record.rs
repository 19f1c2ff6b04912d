//! crates/scan/src/record.rs
//! Raw entries produced by sources and the records handed back to callers.

use std::fmt;

use filetime::FileTime;

use crate::SourcePosition;

/// Size of the fixed part of a packed record: next offset, file index, four
/// timestamps, end of file, allocation size, attributes and name length.
pub const RECORD_HEADER_LEN: usize = 64;

/// Records after the first start on this boundary.
pub const RECORD_ALIGNMENT: usize = 8;

/// Bytes per UTF-16 code unit of an inline name.
pub const UTF16_UNIT_LEN: usize = 2;

/// Allocation granularity assumed when a source does not report one.
pub const ALLOCATION_UNIT: u64 = 4096;

/// Returns the packed size of a record carrying `name`.
#[must_use]
pub fn packed_record_len(name: &str) -> usize {
    RECORD_HEADER_LEN + UTF16_UNIT_LEN * name.encode_utf16().count()
}

/// Rounds `offset` up to the next record boundary.
#[must_use]
pub const fn align_record_offset(offset: usize) -> usize {
    offset.div_ceil(RECORD_ALIGNMENT) * RECORD_ALIGNMENT
}

/// Attribute bits reported for an entry.
///
/// The numeric form returned by [`Attributes::bits`] uses the classic
/// directory-listing attribute values so listings can be compared against
/// other tools.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Attributes {
    /// Entry is a directory.
    pub directory: bool,
    /// Entry is hidden from ordinary listings.
    pub hidden: bool,
    /// Entry cannot be written.
    pub read_only: bool,
    /// Entry is a symbolic link or other reparse point.
    pub reparse_point: bool,
}

impl Attributes {
    /// Read-only bit.
    pub const READ_ONLY: u32 = 0x0001;
    /// Hidden bit.
    pub const HIDDEN: u32 = 0x0002;
    /// Directory bit.
    pub const DIRECTORY: u32 = 0x0010;
    /// Reported when no other bit applies.
    pub const NORMAL: u32 = 0x0080;
    /// Reparse-point bit.
    pub const REPARSE_POINT: u32 = 0x0400;

    /// Attributes of a plain file.
    #[must_use]
    pub const fn file() -> Self {
        Self {
            directory: false,
            hidden: false,
            read_only: false,
            reparse_point: false,
        }
    }

    /// Attributes of a plain directory.
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            directory: true,
            hidden: false,
            read_only: false,
            reparse_point: false,
        }
    }

    /// Returns `true` when no attribute bit is set.
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        !(self.directory || self.hidden || self.read_only || self.reparse_point)
    }

    /// Packs the attributes into their numeric form.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        if self.is_normal() {
            return Self::NORMAL;
        }
        let mut bits = 0;
        if self.read_only {
            bits |= Self::READ_ONLY;
        }
        if self.hidden {
            bits |= Self::HIDDEN;
        }
        if self.directory {
            bits |= Self::DIRECTORY;
        }
        if self.reparse_point {
            bits |= Self::REPARSE_POINT;
        }
        bits
    }
}

/// Renders the attributes as a fixed-width `dhrl` mask with `-` for unset bits.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            flag(self.directory, 'd'),
            flag(self.hidden, 'h'),
            flag(self.read_only, 'r'),
            flag(self.reparse_point, 'l'),
        )
    }
}

/// Entry as produced by an [`EntrySource`](crate::EntrySource).
#[derive(Clone, Debug, PartialEq)]
pub struct RawEntry {
    /// Entry name, never a path.
    pub name: String,
    /// Logical size in bytes.
    pub end_of_file: u64,
    /// Bytes allocated on disk, when the source knows it.
    pub allocation_size: Option<u64>,
    /// Creation time, when the platform records one.
    pub creation_time: Option<FileTime>,
    /// Last access time.
    pub last_access_time: FileTime,
    /// Last content modification time.
    pub last_write_time: FileTime,
    /// Last metadata change time, when the platform records one.
    pub change_time: Option<FileTime>,
    /// Attribute bits.
    pub attributes: Attributes,
}

impl RawEntry {
    /// Creates an empty regular-file entry with zeroed timestamps.
    #[must_use]
    pub fn file(name: impl Into<String>, end_of_file: u64) -> Self {
        Self {
            name: name.into(),
            end_of_file,
            allocation_size: None,
            creation_time: None,
            last_access_time: FileTime::zero(),
            last_write_time: FileTime::zero(),
            change_time: None,
            attributes: Attributes::file(),
        }
    }

    /// Creates a directory entry with zeroed timestamps.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            attributes: Attributes::directory(),
            ..Self::file(name, 0)
        }
    }

    /// Replaces the attribute bits.
    #[must_use]
    pub const fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets both access and write times to `time`.
    #[must_use]
    pub const fn with_times(mut self, time: FileTime) -> Self {
        self.last_access_time = time;
        self.last_write_time = time;
        self
    }
}

/// Entry returned by a query.
///
/// Records carry the source position they were read from as their file
/// index, so two records from the same pass never share an index.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryRecord {
    name: String,
    file_index: u64,
    end_of_file: u64,
    allocation_size: u64,
    creation_time: Option<FileTime>,
    last_access_time: FileTime,
    last_write_time: FileTime,
    change_time: Option<FileTime>,
    attributes: Attributes,
}

impl EntryRecord {
    pub(crate) fn from_raw(position: SourcePosition, raw: RawEntry) -> Self {
        let allocation_size = raw
            .allocation_size
            .unwrap_or_else(|| raw.end_of_file.div_ceil(ALLOCATION_UNIT) * ALLOCATION_UNIT);
        Self {
            name: raw.name,
            file_index: position.index(),
            end_of_file: raw.end_of_file,
            allocation_size,
            creation_time: raw.creation_time,
            last_access_time: raw.last_access_time,
            last_write_time: raw.last_write_time,
            change_time: raw.change_time,
            attributes: raw.attributes,
        }
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of the entry in the source's ordering.
    #[must_use]
    pub const fn file_index(&self) -> u64 {
        self.file_index
    }

    /// Returns the logical size in bytes.
    #[must_use]
    pub const fn end_of_file(&self) -> u64 {
        self.end_of_file
    }

    /// Returns the allocated size in bytes.
    #[must_use]
    pub const fn allocation_size(&self) -> u64 {
        self.allocation_size
    }

    /// Returns the creation time, if known.
    #[must_use]
    pub const fn creation_time(&self) -> Option<FileTime> {
        self.creation_time
    }

    /// Returns the last access time.
    #[must_use]
    pub const fn last_access_time(&self) -> FileTime {
        self.last_access_time
    }

    /// Returns the last write time.
    #[must_use]
    pub const fn last_write_time(&self) -> FileTime {
        self.last_write_time
    }

    /// Returns the last metadata change time, if known.
    #[must_use]
    pub const fn change_time(&self) -> Option<FileTime> {
        self.change_time
    }

    /// Returns the attribute bits.
    #[must_use]
    pub const fn attributes(&self) -> Attributes {
        self.attributes
    }

    /// Returns the number of bytes this record occupies when packed.
    #[must_use]
    pub fn packed_len(&self) -> usize {
        packed_record_len(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_len_counts_utf16_units() {
        assert_eq!(packed_record_len(""), 64);
        assert_eq!(packed_record_len("a-file.h"), 64 + 16);
        // U+1F600 needs a surrogate pair.
        assert_eq!(packed_record_len("\u{1F600}"), 64 + 4);
    }

    #[test]
    fn offsets_round_up_to_eight() {
        assert_eq!(align_record_offset(0), 0);
        assert_eq!(align_record_offset(66), 72);
        assert_eq!(align_record_offset(80), 80);
    }

    #[test]
    fn attribute_bits_and_display() {
        assert_eq!(Attributes::file().bits(), Attributes::NORMAL);
        assert_eq!(Attributes::directory().bits(), Attributes::DIRECTORY);
        let hidden_link = Attributes {
            hidden: true,
            reparse_point: true,
            ..Attributes::file()
        };
        assert_eq!(
            hidden_link.bits(),
            Attributes::HIDDEN | Attributes::REPARSE_POINT
        );
        assert_eq!(hidden_link.to_string(), "-h-l");
        assert_eq!(Attributes::directory().to_string(), "d---");
    }

    #[test]
    fn allocation_size_rounds_when_unreported() {
        let record = EntryRecord::from_raw(SourcePosition::new(3), RawEntry::file("a", 6));
        assert_eq!(record.allocation_size(), 4096);
        assert_eq!(record.file_index(), 3);

        let empty = EntryRecord::from_raw(SourcePosition::START, RawEntry::file("b", 0));
        assert_eq!(empty.allocation_size(), 0);

        let reported = RawEntry {
            allocation_size: Some(512),
            ..RawEntry::file("c", 6)
        };
        let record = EntryRecord::from_raw(SourcePosition::START, reported);
        assert_eq!(record.allocation_size(), 512);
    }
}
