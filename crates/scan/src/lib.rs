#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scan` implements stateful, restartable directory enumeration. A caller
//! opens a directory, then issues repeated [`ScanEngine::query`] calls; each
//! call returns the next page of entries whose names match the handle's
//! current [`NameMask`](filters::NameMask), packed against a caller-supplied
//! buffer capacity. The engine remembers where the previous call stopped, so
//! results never skip or repeat an entry within a pass.
//!
//! # Design
//!
//! - [`ScanEngine`] owns a concurrent table of open [`DirectoryHandle`]s.
//!   Each handle carries one [`ScanState`] behind its own mutex.
//! - Raw entries come from an injected [`EntrySource`]. The engine only ever
//!   asks "list from position N"; restarting, filtering and paging happen
//!   here. [`FsEntrySource`] is the filesystem-backed implementation.
//! - [`QueryRequest`] carries the restart flag, an optional replacement
//!   filter, the buffer capacity and the single-entry switch. Capacity is
//!   accounted with the packed layout: a 64-byte header plus the UTF-16 name,
//!   records after the first aligned to 8 bytes.
//!
//! # Invariants
//!
//! - A restart rewinds the cursor and clears exhaustion. It never clears the
//!   active filter.
//! - A filter supplied without a restart applies from the current cursor
//!   onwards; entries already returned are not revisited.
//! - Once a pass is exhausted, further non-restart queries report
//!   [`QueryStatus::NoMoreEntries`] without touching the source.
//! - Scan state is written back only when a query succeeds. Failed queries
//!   can be retried verbatim.
//!
//! # Errors
//!
//! Opening reports [`OpenError`]. Queries report [`ScanError`] for closed
//! handles, buffers too small for the next record, and source failures
//! ([`SourceError`]). Every outcome maps onto a [`Status`] code.
//!
//! # Examples
//!
//! ```
//! use filters::NameMask;
//! use scan::{QueryRequest, QueryStatus, ScanEngine};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::write(temp.path().join("a-file.h"), b"hello")?;
//! fs::write(temp.path().join("another-file.h"), b"hello")?;
//! fs::write(temp.path().join("notes.txt"), b"hello")?;
//!
//! let engine = ScanEngine::filesystem();
//! let handle = engine.open(temp.path())?;
//! let capacity = engine.config().min_buffer_capacity() * 4;
//!
//! let first = engine.query(
//!     handle,
//!     &QueryRequest::new(capacity).restart(true).filter(NameMask::new("*.h")?),
//! )?;
//! assert_eq!(first.names().collect::<Vec<_>>(), ["a-file.h", "another-file.h"]);
//!
//! let next = engine.query(handle, &QueryRequest::new(capacity))?;
//! assert_eq!(next.status(), QueryStatus::NoMoreEntries);
//!
//! engine.close(handle)?;
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod config;
mod engine;
mod error;
mod fs_source;
mod handle;
mod record;
mod source;
mod state;

pub use config::{DEFAULT_MAX_NAME_LEN, DEFAULT_PAGE_LIMIT, ScanConfig};
pub use engine::{EngineBuilder, QueryRequest, QueryResult, QueryStatus, ScanEngine};
pub use error::{OpenError, ScanError, SourceError, Status};
pub use fs_source::FsEntrySource;
pub use handle::DirectoryHandle;
pub use record::{
    ALLOCATION_UNIT, Attributes, EntryRecord, RECORD_ALIGNMENT, RECORD_HEADER_LEN, RawEntry,
    UTF16_UNIT_LEN, align_record_offset, packed_record_len,
};
pub use source::{EntrySource, Listing, SourceDirectory, SourcePosition};
pub use state::ScanState;
