//! crates/scan/src/config.rs
//! Engine tunables and packed-record geometry.

use crate::record::{RECORD_HEADER_LEN, UTF16_UNIT_LEN};

/// Longest entry name, in UTF-16 code units, a minimum-sized buffer must hold.
pub const DEFAULT_MAX_NAME_LEN: usize = 255;

/// Default upper bound on the number of records returned by one query.
pub const DEFAULT_PAGE_LIMIT: usize = 512;

/// Tunables shared by every handle an engine opens.
///
/// ```
/// use scan::ScanConfig;
///
/// let config = ScanConfig::default().max_name_len(260).page_limit(16);
/// assert_eq!(config.min_buffer_capacity(), 64 + 2 * 260);
/// assert_eq!(config.page_limit_value(), 16);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    max_name_len: usize,
    page_limit: usize,
    include_dot_entries: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            page_limit: DEFAULT_PAGE_LIMIT,
            include_dot_entries: true,
        }
    }
}

impl ScanConfig {
    /// Sets the longest supported entry name in UTF-16 code units.
    #[must_use]
    pub const fn max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }

    /// Caps the number of records one query may return. Zero is treated as one.
    #[must_use]
    pub const fn page_limit(mut self, limit: usize) -> Self {
        self.page_limit = if limit == 0 { 1 } else { limit };
        self
    }

    /// Controls whether the filesystem source lists `.` and `..`.
    #[must_use]
    pub const fn include_dot_entries(mut self, include: bool) -> Self {
        self.include_dot_entries = include;
        self
    }

    /// Returns the configured maximum name length.
    #[must_use]
    pub const fn max_name_len_value(&self) -> usize {
        self.max_name_len
    }

    /// Returns the configured page cap.
    #[must_use]
    pub const fn page_limit_value(&self) -> usize {
        if self.page_limit == 0 {
            1
        } else {
            self.page_limit
        }
    }

    /// Returns whether `.` and `..` are listed by the filesystem source.
    #[must_use]
    pub const fn includes_dot_entries(&self) -> bool {
        self.include_dot_entries
    }

    /// Smallest buffer a query accepts: one record carrying a name of
    /// [`max_name_len`](Self::max_name_len) code units.
    #[must_use]
    pub const fn min_buffer_capacity(&self) -> usize {
        RECORD_HEADER_LEN + UTF16_UNIT_LEN * self.max_name_len
    }
}
