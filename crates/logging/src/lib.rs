#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostic plumbing shared by the dirquery
//! workspace. Diagnostics are grouped into *info* categories (what a user
//! asked for: handle lifetime, per-query summaries) and *debug* categories
//! (engine internals: scan state transitions, mask compilation, entry source
//! I/O, buffer accounting). Each category carries its own verbosity level so a
//! caller can ask for `--debug=scan2` without drowning in source I/O traces.
//!
//! # Design
//!
//! - [`VerbosityConfig`] stores one `u8` level per [`InfoFlag`] and
//!   [`DebugFlag`]. It is built from a `-v` count with
//!   [`VerbosityConfig::from_verbose_level`] and refined with `NAME[N]` tokens.
//! - The active configuration and the collected [`DiagnosticEvent`]s live in
//!   thread-local storage. [`info_log!`] and [`debug_log!`] check the level
//!   before formatting anything, so disabled diagnostics cost a single
//!   comparison.
//! - With the `tracing` feature enabled, [`ScanLayer`] routes `tracing` events
//!   whose target starts with `dirquery::` into the same event buffer, letting
//!   library code use the `trace_*` macros interchangeably with the
//!   level-gated ones.
//!
//! # Invariants
//!
//! - Events are only recorded when the configured level for their flag is at
//!   least the event's level.
//! - [`drain_events`] returns events in emission order and empties the buffer.
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, drain_events, init, VerbosityConfig};
//!
//! init(VerbosityConfig::from_verbose_level(2));
//! debug_log!(Scan, 1, "restarting pass on handle {}", 7);
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert!(events[0].message().contains("handle 7"));
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, debug_gte, drain_events, emit_debug,
    emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ScanLayer, diagnostics_subscriber};
