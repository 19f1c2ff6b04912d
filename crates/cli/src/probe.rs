//! crates/cli/src/probe.rs
//! `dirquery probe`: replay the restart and mask script against a scratch
//! directory holding two header files.
//!
//! Every query uses single-entry mode and a buffer sized for one record with
//! a 260-character name, and prints one line per call.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use filters::NameMask;
use scan::{DirectoryHandle, QueryRequest, ScanConfig, ScanEngine, Status};

use crate::args::{PROBE_NAME_LEN, ProbeArgs};
use crate::error::CliError;
use crate::render::{flush_diagnostics, probe_line};

/// Files created in the probe directory.
pub const PROBE_FILES: [&str; 2] = ["a-file.h", "another-file.h"];

/// Contents of each probe file.
pub const PROBE_CONTENTS: &[u8] = b"hello\n";

/// One query of the script.
#[derive(Clone, Copy, Debug)]
struct Step {
    restart: bool,
    mask: Option<&'static str>,
}

const fn step(restart: bool, mask: Option<&'static str>) -> Step {
    Step { restart, mask }
}

const NEXT: Step = step(false, None);

/// A titled group of queries. `reopen` closes the current handle and opens a
/// fresh one before the group runs.
struct Section {
    title: &'static str,
    reopen: bool,
    steps: &'static [Step],
}

const SCRIPT: &[Section] = &[
    Section {
        title: "[First Handle] List the contents of the directory...",
        reopen: false,
        steps: &[NEXT, NEXT, NEXT, NEXT, NEXT],
    },
    Section {
        title: "[First Handle] Specify a new mask without restarting the scan...",
        reopen: false,
        steps: &[step(false, Some("*.h"))],
    },
    Section {
        title: "[First Handle] Specify a new mask, restarting the scan...",
        reopen: false,
        steps: &[step(true, Some("*.h")), NEXT, NEXT],
    },
    Section {
        title: "[First Handle] Restart the scan without a mask...",
        reopen: false,
        steps: &[step(true, None), NEXT, NEXT],
    },
    Section {
        title: "[First Handle] Restart the scan with an empty mask...",
        reopen: false,
        steps: &[step(true, Some("")), NEXT, NEXT],
    },
    Section {
        title: "[First Handle] Restart the scan with a whitespace mask...",
        reopen: false,
        steps: &[step(true, Some(" ")), NEXT, NEXT],
    },
    Section {
        title: "[First Handle] Restart the scan with a mask that doesn't match anything...",
        reopen: false,
        steps: &[step(true, Some("not-a-file.h"))],
    },
    Section {
        title: "[First Handle] Restart the scan with a mask that matches a single file...",
        reopen: false,
        steps: &[step(true, Some("a-file.h")), NEXT],
    },
    Section {
        title: "[First Handle] Restart the scan with a mask that matches everything...",
        reopen: false,
        steps: &[step(true, Some("*")), NEXT, NEXT, NEXT, NEXT],
    },
    Section {
        title: "[Second Handle] Scan with a mask that doesn't match anything...",
        reopen: true,
        steps: &[step(true, Some("not-a-file.h"))],
    },
    Section {
        title: "[Second Handle] List the contents of the directory...",
        reopen: false,
        steps: &[NEXT, NEXT, NEXT, NEXT, NEXT],
    },
];

/// Creates the probe files under `dir`, creating `dir` itself if needed.
pub fn prepare_probe_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|error| CliError::prepare(dir.to_path_buf(), error))?;
    for name in PROBE_FILES {
        let path = dir.join(name);
        fs::write(&path, PROBE_CONTENTS).map_err(|error| CliError::prepare(path, error))?;
    }
    Ok(())
}

pub(crate) fn run_probe<Out, Err>(
    args: &ProbeArgs,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
{
    // Keeps a default scratch directory alive until the script finishes.
    let mut scratch = None;
    let dir: PathBuf = if let Some(dir) = &args.dir {
        dir.clone()
    } else {
        let temp = tempfile::tempdir()
            .map_err(|error| CliError::prepare(std::env::temp_dir(), error))?;
        let path = temp.path().to_path_buf();
        scratch = Some(temp);
        path
    };
    prepare_probe_dir(&dir)?;

    let config = ScanConfig::default().max_name_len(PROBE_NAME_LEN);
    let engine = ScanEngine::filesystem_with(config);
    let capacity = config.min_buffer_capacity();
    let mut handle = engine.open(&dir)?;

    for section in SCRIPT {
        if section.reopen {
            engine.close(handle)?;
            handle = engine.open(&dir)?;
        }
        writeln!(stdout, "{}", section.title)?;
        for step in section.steps {
            let line = run_step(&engine, handle, capacity, *step)?;
            flush_diagnostics(stderr)?;
            writeln!(stdout, "{line}")?;
        }
        writeln!(stdout)?;
    }

    engine.close(handle)?;
    flush_diagnostics(stderr)?;
    drop(scratch);
    Ok(())
}

fn run_step(
    engine: &ScanEngine,
    handle: DirectoryHandle,
    capacity: usize,
    step: Step,
) -> Result<String, CliError> {
    let mask = step.mask.map(NameMask::new).transpose()?;
    let request = QueryRequest::new(capacity)
        .single_entry(true)
        .restart(step.restart)
        .filter_opt(mask);

    let line = match engine.query(handle, &request) {
        Ok(result) => probe_line(
            step.restart,
            step.mask,
            result.status().into(),
            result.names().next(),
        ),
        Err(error) => probe_line(step.restart, step.mask, error.status(), None),
    };
    Ok(line)
}

/// Status sequence the script produces on a directory holding exactly the
/// probe files.
#[must_use]
pub fn expected_statuses() -> Vec<Status> {
    use Status::{NoMatchingEntries as Unmatched, NoMoreEntries as Done, Ok};
    vec![
        Ok, Ok, Ok, Ok, Done, // plain listing
        Done, // mask without restart
        Ok, Ok, Done, // restart with *.h
        Ok, Ok, Done, // restart keeps *.h
        Ok, Ok, Ok, // empty mask
        Unmatched, Done, Done, // whitespace mask
        Unmatched, // no match
        Ok, Done, // single match
        Ok, Ok, Ok, Ok, Done, // everything
        Unmatched, // second handle, no match
        Done, Done, Done, Done, Done, // exhausted pass
    ]
}
