#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end for the `dirquery` workspace. It parses
//! arguments with [`clap`](https://docs.rs/clap/), configures diagnostics from
//! `-v`, `--info` and `--debug`, and drives a [`scan::ScanEngine`] through one
//! of two commands:
//!
//! - `list DIR` pages through a directory, optionally filtered by a mask, and
//!   prints one line per entry.
//! - `probe` creates a scratch directory holding `a-file.h` and
//!   `another-file.h` and replays a fixed script of restart and mask queries,
//!   printing the status of every call.
//!
//! # Design
//!
//! [`run`] accepts the argument iterator together with handles for standard
//! output and error, so tests drive the exact code path the binary uses.
//! Diagnostics are gathered through the `logging` crate's thread-local event
//! buffer and written to the error handle after each query. A scoped
//! [`logging::diagnostics_subscriber`] routes `tracing` events from the engine
//! into the same buffer without touching the global dispatcher.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Help and version output go to the output handle with exit code `0`.
//!
//! # Errors
//!
//! Usage errors, including rejected `--info`/`--debug` tokens and malformed
//! masks, exit with `2`. Open and query failures exit with `1` and print the
//! underlying status.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["dirquery", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("dirquery"));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use logging::VerbosityConfig;

mod args;
mod error;
mod list;
mod probe;
mod render;

pub use args::{Cli, Command, DEFAULT_BUFFER_SIZE, ListArgs, PROBE_NAME_LEN, ProbeArgs};
pub use error::{CliError, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
pub use probe::{PROBE_CONTENTS, PROBE_FILES, expected_statuses, prepare_probe_dir};
pub use render::{entry_line, event_line, format_time, probe_line};

/// Largest exit status the process can report.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Parses `arguments`, runs the selected command and returns its exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let cli = match args::parse_args(arguments) {
        Ok(cli) => cli,
        Err(error) => return report_parse_error(&error, stdout, stderr),
    };

    let config = match verbosity_config(&cli) {
        Ok(config) => config,
        Err(error) => return report(&error, stderr),
    };
    let subscriber = logging::diagnostics_subscriber(config);
    let outcome = tracing::subscriber::with_default(subscriber, || match &cli.command {
        Command::List(list_args) => list::run_list(list_args, stdout, stderr),
        Command::Probe(probe_args) => probe::run_probe(probe_args, stdout, stderr),
    });

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => report(&error, stderr),
    }
}

/// Converts a status returned by [`run`] into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn verbosity_config(cli: &Cli) -> Result<VerbosityConfig, CliError> {
    let mut config = VerbosityConfig::from_verbose_level(cli.verbose);
    for token in &cli.info {
        config
            .apply_info_flag(token)
            .map_err(|reason| CliError::verbosity(token, reason))?;
    }
    for token in &cli.debug {
        config
            .apply_debug_flag(token)
            .map_err(|reason| CliError::verbosity(token, reason))?;
    }
    Ok(config)
}

fn report_parse_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{}", error.render());
            EXIT_SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{}", error.render());
            EXIT_USAGE
        }
    }
}

fn report<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "dirquery: {error}");
    error.exit_code()
}

/// Helpers exposed for integration tests.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::args::parse_args;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_clamped() {
        assert_eq!(exit_code_from(0), ExitCode::SUCCESS);
        assert_eq!(exit_code_from(-3), ExitCode::from(0));
        assert_eq!(exit_code_from(1000), ExitCode::from(u8::MAX));
    }

    #[test]
    fn verbosity_tokens_are_layered_on_the_count() {
        let cli = args::parse_args(["dirquery", "-v", "--debug", "scan2", "probe"]).expect("parse");
        let config = verbosity_config(&cli).expect("config");
        assert_eq!(config.info.query, 1);
        assert_eq!(config.debug.scan, 2);
    }

    #[test]
    fn unknown_debug_token_is_a_usage_error() {
        let cli = args::parse_args(["dirquery", "--debug", "bogus", "probe"]).expect("parse");
        let error = verbosity_config(&cli).expect_err("unknown flag");
        assert_eq!(error.exit_code(), EXIT_USAGE);
    }
}
