//! crates/cli/src/args.rs
//! Command-line surface parsed with clap's derive API.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default buffer handed to `list` queries.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Longest name the probe buffer is sized for.
pub const PROBE_NAME_LEN: usize = 260;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(
    name = "dirquery",
    version,
    about = "Page through directories with restartable, mask-filtered queries"
)]
pub struct Cli {
    /// Increase diagnostic verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Set an info category level, e.g. `query2`.
    #[arg(long = "info", value_name = "FLAG[N]", global = true)]
    pub info: Vec<String>,

    /// Set a debug category level, e.g. `scan2` or `all`.
    #[arg(long = "debug", value_name = "FLAG[N]", global = true)]
    pub debug: Vec<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a directory, one query page at a time.
    List(ListArgs),
    /// Replay the restart and mask probe script against a scratch directory.
    Probe(ProbeArgs),
}

/// Arguments for `dirquery list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list.
    pub dir: PathBuf,

    /// Only list entries whose names match PATTERN (`*` and `?` wildcards).
    #[arg(short, long, value_name = "PATTERN")]
    pub mask: Option<String>,

    /// Bytes available to each query.
    #[arg(short, long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,

    /// Return one entry per query.
    #[arg(short, long)]
    pub single: bool,

    /// Omit the `.` and `..` entries.
    #[arg(long)]
    pub no_dot_entries: bool,

    /// Cap the number of entries returned by one query.
    #[arg(long, value_name = "N")]
    pub page_limit: Option<usize>,
}

/// Arguments for `dirquery probe`.
#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Directory to create and probe. Defaults to a fresh temporary directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Parses `arguments`, including the program name, into [`Cli`].
pub fn parse_args<I, S>(arguments: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    Cli::try_parse_from(arguments)
}
