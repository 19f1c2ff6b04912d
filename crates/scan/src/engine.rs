//! crates/scan/src/engine.rs
//! The scan engine: open, query and close directory handles.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use filters::NameMask;
use logging::{debug_log, info_log, trace_handle, trace_scan};

use crate::handle::{HandleTable, lock_slot};
use crate::record::align_record_offset;
use crate::{
    DirectoryHandle, EntryRecord, EntrySource, FsEntrySource, OpenError, ScanConfig, ScanError,
    ScanState, Status,
};

/// Parameters of a single [`ScanEngine::query`] call.
///
/// ```
/// use filters::NameMask;
/// use scan::QueryRequest;
///
/// let request = QueryRequest::new(4096)
///     .restart(true)
///     .filter(NameMask::new("*.h").expect("mask"))
///     .single_entry(true);
/// assert!(request.is_restart());
/// assert!(request.is_single_entry());
/// assert_eq!(request.filter_mask().map(NameMask::pattern), Some("*.h"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryRequest {
    restart: bool,
    filter: Option<NameMask>,
    buffer_capacity: usize,
    return_single_entry: bool,
}

impl QueryRequest {
    /// Creates a request that continues the current pass with the current
    /// filter, packing records into `buffer_capacity` bytes.
    #[must_use]
    pub const fn new(buffer_capacity: usize) -> Self {
        Self {
            restart: false,
            filter: None,
            buffer_capacity,
            return_single_entry: false,
        }
    }

    /// Rewinds the pass to the first entry before fetching.
    #[must_use]
    pub const fn restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    /// Replaces the handle's filter, effective with this call.
    #[must_use]
    pub fn filter(mut self, mask: NameMask) -> Self {
        self.filter = Some(mask);
        self
    }

    /// Sets or clears the filter directive.
    #[must_use]
    pub fn filter_opt(mut self, mask: Option<NameMask>) -> Self {
        self.filter = mask;
        self
    }

    /// Limits the call to at most one record.
    #[must_use]
    pub const fn single_entry(mut self, single: bool) -> Self {
        self.return_single_entry = single;
        self
    }

    /// Returns whether the request restarts the pass.
    #[must_use]
    pub const fn is_restart(&self) -> bool {
        self.restart
    }

    /// Returns the filter directive, if any.
    #[must_use]
    pub const fn filter_mask(&self) -> Option<&NameMask> {
        self.filter.as_ref()
    }

    /// Returns the buffer capacity in bytes.
    #[must_use]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Returns whether at most one record is returned.
    #[must_use]
    pub const fn is_single_entry(&self) -> bool {
        self.return_single_entry
    }
}

/// Non-error outcome of a query.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryStatus {
    /// At least one record was returned.
    Ok,
    /// The pass has no further entries.
    NoMoreEntries,
    /// The first fetch of a filtered pass found no matching entry.
    NoMatchingEntries,
}

impl From<QueryStatus> for Status {
    fn from(status: QueryStatus) -> Self {
        match status {
            QueryStatus::Ok => Self::Ok,
            QueryStatus::NoMoreEntries => Self::NoMoreEntries,
            QueryStatus::NoMatchingEntries => Self::NoMatchingEntries,
        }
    }
}

/// Records returned by a successful query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    entries: Vec<EntryRecord>,
    status: QueryStatus,
    bytes_used: usize,
}

impl QueryResult {
    const fn empty(status: QueryStatus) -> Self {
        Self {
            entries: Vec::new(),
            status,
            bytes_used: 0,
        }
    }

    /// Returns the query outcome.
    #[must_use]
    pub const fn status(&self) -> QueryStatus {
        self.status
    }

    /// Returns the records in source order.
    #[must_use]
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Consumes the result, returning the records.
    #[must_use]
    pub fn into_entries(self) -> Vec<EntryRecord> {
        self.entries
    }

    /// Returns the number of buffer bytes the packed records occupy.
    #[must_use]
    pub const fn bytes_used(&self) -> usize {
        self.bytes_used
    }

    /// Returns the names of the returned records.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(EntryRecord::name)
    }
}

/// Accumulates packed records for one call.
struct Page {
    capacity: usize,
    limit: usize,
    used: usize,
    entries: Vec<EntryRecord>,
}

enum Push {
    Accepted,
    Full { required: usize },
}

impl Page {
    fn new(capacity: usize, limit: usize) -> Self {
        Self {
            capacity,
            limit,
            used: 0,
            entries: Vec::new(),
        }
    }

    fn try_push(&mut self, record: EntryRecord) -> Push {
        let offset = if self.entries.is_empty() {
            0
        } else {
            align_record_offset(self.used)
        };
        let end = offset + record.packed_len();
        if end > self.capacity {
            return Push::Full {
                required: record.packed_len(),
            };
        }
        self.used = end;
        self.entries.push(record);
        Push::Accepted
    }

    fn at_limit(&self) -> bool {
        self.entries.len() >= self.limit
    }
}

/// Builds a [`ScanEngine`] over a chosen [`EntrySource`].
pub struct EngineBuilder {
    source: Arc<dyn EntrySource>,
    config: ScanConfig,
}

impl EngineBuilder {
    /// Replaces the whole configuration.
    #[must_use]
    pub const fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the longest supported entry name in UTF-16 code units.
    #[must_use]
    pub const fn max_name_len(mut self, len: usize) -> Self {
        self.config = self.config.max_name_len(len);
        self
    }

    /// Caps the number of records one query may return.
    #[must_use]
    pub const fn page_limit(mut self, limit: usize) -> Self {
        self.config = self.config.page_limit(limit);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> ScanEngine {
        ScanEngine {
            source: self.source,
            config: self.config,
            handles: HandleTable::new(),
        }
    }
}

/// Stateful, restartable directory enumeration over an [`EntrySource`].
///
/// Each open handle owns an independent [`ScanState`]. Calls on one handle
/// are serialised; calls on different handles proceed in parallel.
pub struct ScanEngine {
    source: Arc<dyn EntrySource>,
    config: ScanConfig,
    handles: HandleTable,
}

impl fmt::Debug for ScanEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanEngine")
            .field("config", &self.config)
            .field("open_handles", &self.handles.len())
            .finish_non_exhaustive()
    }
}

impl ScanEngine {
    /// Starts building an engine over `source`.
    pub fn builder<S: EntrySource + 'static>(source: S) -> EngineBuilder {
        EngineBuilder {
            source: Arc::new(source),
            config: ScanConfig::default(),
        }
    }

    /// Creates an engine over the local filesystem with default settings.
    #[must_use]
    pub fn filesystem() -> Self {
        Self::filesystem_with(ScanConfig::default())
    }

    /// Creates an engine over the local filesystem.
    #[must_use]
    pub fn filesystem_with(config: ScanConfig) -> Self {
        let source = FsEntrySource::new().include_dot_entries(config.includes_dot_entries());
        Self::builder(source).config(config).build()
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Returns the number of open handles.
    #[must_use]
    pub fn open_handles(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` while `handle` is open.
    #[must_use]
    pub fn is_open(&self, handle: DirectoryHandle) -> bool {
        self.handles.contains(handle)
    }

    /// Opens `path` and returns a handle positioned at the start of a fresh,
    /// unfiltered pass.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<DirectoryHandle, OpenError> {
        let path = path.as_ref();
        let directory = self.source.open(path)?;
        let handle = self.handles.insert(directory);
        trace_handle!(handle = handle.as_u64(), path = %path.display(), "opened");
        Ok(handle)
    }

    /// Closes `handle`. Later queries against it fail with
    /// [`ScanError::InvalidHandle`].
    pub fn close(&self, handle: DirectoryHandle) -> Result<(), ScanError> {
        if !self.handles.remove(handle) {
            return Err(ScanError::invalid_handle(handle));
        }
        trace_handle!(handle = handle.as_u64(), "closed");
        Ok(())
    }

    /// Returns a copy of the handle's current scan state.
    pub fn snapshot(&self, handle: DirectoryHandle) -> Result<ScanState, ScanError> {
        let slot = self
            .handles
            .get(handle)
            .ok_or_else(|| ScanError::invalid_handle(handle))?;
        let guard = lock_slot(&slot);
        Ok(guard.state.clone())
    }

    /// Fetches the next page of matching entries.
    ///
    /// A restart rewinds the cursor and clears exhaustion before any filter
    /// directive is applied; the filter itself survives restarts. Scan state
    /// is written back only when the call succeeds, so a request that fails
    /// with [`ScanError::BufferTooSmall`] or [`ScanError::SourceUnavailable`]
    /// can be retried verbatim.
    pub fn query(
        &self,
        handle: DirectoryHandle,
        request: &QueryRequest,
    ) -> Result<QueryResult, ScanError> {
        let slot = self
            .handles
            .get(handle)
            .ok_or_else(|| ScanError::invalid_handle(handle))?;
        let mut guard = lock_slot(&slot);

        let required = self.config.min_buffer_capacity();
        if request.buffer_capacity < required {
            debug_log!(
                Paging,
                1,
                "handle {}: buffer {} below minimum {}",
                handle,
                request.buffer_capacity,
                required
            );
            return Err(ScanError::buffer_too_small(
                request.buffer_capacity,
                required,
            ));
        }

        let mut next = guard.state.clone();
        if request.restart {
            debug_log!(Scan, 1, "handle {}: restart pass", handle);
            next.restart();
        }
        if let Some(mask) = &request.filter {
            debug_log!(Scan, 1, "handle {}: filter set to {:?}", handle, mask.pattern());
            next.active_filter = Some(mask.clone());
        }

        if next.exhausted {
            guard.state = next;
            info_log!(Query, 2, "handle {}: pass already exhausted", handle);
            return Ok(QueryResult::empty(QueryStatus::NoMoreEntries));
        }

        let limit = if request.is_single_entry() {
            1
        } else {
            self.config.page_limit_value()
        };
        let mut page = Page::new(request.buffer_capacity, limit);
        let mut position = next.cursor;
        let mut source_exhausted = true;

        let mut listing = self.source.list_from(&guard.directory, position)?;
        for item in listing.by_ref() {
            let raw = item?;
            if next.admits(&raw.name) {
                let record = EntryRecord::from_raw(position, raw);
                if let Push::Full { required } = page.try_push(record) {
                    if page.entries.is_empty() {
                        debug_log!(
                            Paging,
                            1,
                            "handle {}: record at {} needs {} bytes",
                            handle,
                            position,
                            required
                        );
                        return Err(ScanError::buffer_too_small(
                            request.buffer_capacity,
                            required,
                        ));
                    }
                    source_exhausted = false;
                    break;
                }
            }
            position = position.next();
            if page.at_limit() {
                // Look one entry ahead so the pass can end on this call. A
                // failing look-ahead is left for the next call to report.
                source_exhausted = listing.next().is_none();
                break;
            }
        }

        next.cursor = position;
        next.exhausted = source_exhausted;
        let status = if !page.entries.is_empty() {
            QueryStatus::Ok
        } else if next.filter_is_active() && next.fresh_pass {
            QueryStatus::NoMatchingEntries
        } else {
            QueryStatus::NoMoreEntries
        };
        next.fresh_pass = false;

        debug_log!(
            Paging,
            2,
            "handle {}: packed {} records in {} of {} bytes",
            handle,
            page.entries.len(),
            page.used,
            page.capacity
        );
        trace_scan!(
            handle = handle.as_u64(),
            cursor = position.index(),
            exhausted = source_exhausted,
            "commit"
        );
        guard.state = next;
        info_log!(
            Query,
            1,
            "handle {}: {} ({} entries)",
            handle,
            Status::from(status),
            page.entries.len()
        );

        Ok(QueryResult {
            entries: page.entries,
            status,
            bytes_used: page.used,
        })
    }
}
