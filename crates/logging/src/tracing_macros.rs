//! crates/logging/src/tracing_macros.rs
//! Convenience macros for dirquery-specific tracing.
//!
//! These macros wrap the standard tracing macros with the targets understood
//! by the tracing bridge. Callers must depend on `tracing` themselves.

/// Emit a scan-engine trace.
///
/// # Example
/// ```ignore
/// trace_scan!("query on handle {}", handle);
/// ```
#[macro_export]
macro_rules! trace_scan {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirquery::scan", $($arg)*);
    };
}

/// Emit an entry-source I/O trace.
///
/// # Example
/// ```ignore
/// trace_source!("read {} names from {}", count, path.display());
/// ```
#[macro_export]
macro_rules! trace_source {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "dirquery::source", $($arg)*);
    };
}

/// Emit a handle lifetime trace.
///
/// # Example
/// ```ignore
/// trace_handle!("closed handle {}", handle);
/// ```
#[macro_export]
macro_rules! trace_handle {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirquery::handle", $($arg)*);
    };
}
