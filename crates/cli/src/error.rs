//! crates/cli/src/error.rs
//! Failures surfaced by command execution.

use std::io;
use std::path::PathBuf;

use filters::FilterError;
use scan::{OpenError, ScanError, Status};
use thiserror::Error;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when opening or querying fails.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for usage errors, matching clap's convention.
pub const EXIT_USAGE: i32 = 2;

/// Error raised while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--info` or `--debug` token was rejected.
    #[error("invalid diagnostic flag '{token}': {reason}")]
    Verbosity {
        /// Token as supplied.
        token: String,
        /// Parser explanation.
        reason: String,
    },
    /// The mask could not be compiled.
    #[error(transparent)]
    Mask(#[from] FilterError),
    /// The directory could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),
    /// A query failed.
    #[error("query failed: {0}")]
    Query(#[from] ScanError),
    /// The probe directory could not be prepared.
    #[error("failed to prepare '{}': {source}", .path.display())]
    Prepare {
        /// Path being created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub(crate) fn verbosity(token: &str, reason: String) -> Self {
        Self::Verbosity {
            token: token.to_owned(),
            reason,
        }
    }

    pub(crate) const fn prepare(path: PathBuf, source: io::Error) -> Self {
        Self::Prepare { path, source }
    }

    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Verbosity { .. } | Self::Mask(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// Returns the status code behind an open or query failure.
    #[must_use]
    pub const fn status(&self) -> Option<Status> {
        match self {
            Self::Open(error) => Some(error.status()),
            Self::Query(error) => Some(error.status()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        let error = CliError::verbosity("bogus", "unknown debug flag: bogus".into());
        assert_eq!(error.exit_code(), EXIT_USAGE);
        assert_eq!(
            error.to_string(),
            "invalid diagnostic flag 'bogus': unknown debug flag: bogus"
        );
    }

    #[test]
    fn open_failures_exit_with_one_and_keep_status() {
        let error: CliError = OpenError::NotFound {
            path: PathBuf::from("/missing"),
        }
        .into();
        assert_eq!(error.exit_code(), EXIT_FAILURE);
        assert_eq!(error.status(), Some(Status::NotFound));
        assert_eq!(error.to_string(), "directory '/missing' does not exist");
    }
}
