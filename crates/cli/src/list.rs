//! crates/cli/src/list.rs
//! `dirquery list`: page through one directory.

use std::io::Write;

use filters::NameMask;
use logging::info_log;
use scan::{QueryRequest, QueryStatus, ScanConfig, ScanEngine};

use crate::args::ListArgs;
use crate::error::CliError;
use crate::render::{entry_line, flush_diagnostics};

/// Lists `args.dir`, restarting once with the requested mask and then
/// continuing until the pass ends.
pub(crate) fn run_list<Out, Err>(
    args: &ListArgs,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
{
    let mask = args.mask.as_deref().map(NameMask::new).transpose()?;

    let mut config = ScanConfig::default().include_dot_entries(!args.no_dot_entries);
    if let Some(limit) = args.page_limit {
        config = config.page_limit(limit);
    }
    let engine = ScanEngine::filesystem_with(config);
    let handle = engine.open(&args.dir)?;

    let base = QueryRequest::new(args.buffer_size).single_entry(args.single);
    let mut request = base.clone().restart(true).filter_opt(mask);
    let mut listed = 0usize;
    let mut pages = 0usize;

    let outcome = loop {
        let result = match engine.query(handle, &request) {
            Ok(result) => result,
            Err(error) => break Err(error),
        };
        flush_diagnostics(stderr)?;
        if result.status() != QueryStatus::Ok {
            break Ok(result.status());
        }
        pages += 1;
        for record in result.into_entries() {
            writeln!(stdout, "{}", entry_line(&record))?;
            listed += 1;
        }
        request = base.clone();
    };

    engine.close(handle)?;
    match outcome {
        Ok(status) => {
            info_log!(
                Query,
                1,
                "listed {} entries in {} pages ({})",
                listed,
                pages,
                scan::Status::from(status)
            );
            flush_diagnostics(stderr)?;
            Ok(())
        }
        Err(error) => {
            flush_diagnostics(stderr)?;
            Err(error.into())
        }
    }
}
