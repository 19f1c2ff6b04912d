//! crates/cli/src/render.rs
//! Output formatting for listings, probe lines and diagnostics.

use std::io::{self, Write};

use filetime::FileTime;
use logging::{DiagnosticEvent, drain_events};
use scan::{EntryRecord, Status};
use time::OffsetDateTime;
use time::macros::format_description;

/// Formats one `list` line: attributes, size, last write time (UTC), name.
#[must_use]
pub fn entry_line(record: &EntryRecord) -> String {
    format!(
        "{} {:>12} {} {}",
        record.attributes(),
        record.end_of_file(),
        format_time(record.last_write_time()),
        record.name()
    )
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in UTC, or `-` when it is out
/// of range.
#[must_use]
pub fn format_time(time: FileTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(time.unix_seconds())
        .ok()
        .and_then(|stamp| stamp.format(format).ok())
        .unwrap_or_else(|| "-".to_owned())
}

/// Formats one probe line.
///
/// The mask column prints `(null)` when no mask was supplied and the mask
/// text verbatim otherwise, so the empty mask renders as nothing at all.
#[must_use]
pub fn probe_line(restart: bool, mask: Option<&str>, status: Status, name: Option<&str>) -> String {
    let mut line = format!(
        "RestartScan: {restart}, Mask: {}, Result: {status:X}",
        mask.unwrap_or("(null)")
    );
    if let (Status::Ok, Some(name)) = (status, name) {
        line.push_str(", Filename: ");
        line.push_str(name);
    }
    line
}

/// Formats a diagnostic event for stderr.
#[must_use]
pub fn event_line(event: &DiagnosticEvent) -> String {
    let kind = match event {
        DiagnosticEvent::Info { .. } => "info",
        DiagnosticEvent::Debug { .. } => "debug",
    };
    format!("dirquery: [{kind}:{}] {}", event.flag_name(), event.message())
}

/// Writes every pending diagnostic event to `stderr`.
pub fn flush_diagnostics<W: Write>(stderr: &mut W) -> io::Result<()> {
    for event in drain_events() {
        writeln!(stderr, "{}", event_line(&event))?;
    }
    Ok(())
}
