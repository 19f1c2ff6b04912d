use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

/// Runs the command-line front end and maps its status to a process exit
/// code.
///
/// The binary's `main` only locks the standard streams and calls this helper,
/// so tests exercise the same path with in-memory buffers.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let arguments: Vec<OsString> = args.into_iter().map(Into::into).collect();
    cli::exit_code_from(cli::run(arguments, stdout, stderr))
}

#[cfg(test)]
mod tests {
    use super::run_with;
    use std::ffi::OsString;
    use std::process::ExitCode;

    #[test]
    fn version_flag_reports_success() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(["dirquery", "--version"], &mut stdout, &mut stderr);

        assert_eq!(exit, ExitCode::SUCCESS);
        let stdout = String::from_utf8(stdout).expect("stdout is UTF-8");
        assert!(stdout.starts_with("dirquery "));
        assert!(stderr.is_empty(), "--version must not write to stderr");
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(
            [
                OsString::from("dirquery"),
                OsString::from("--definitely-invalid-option"),
            ],
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(exit, ExitCode::from(2));
        assert!(stdout.is_empty(), "invalid flag should not write to stdout");
        assert!(!stderr.is_empty(), "invalid flag should emit diagnostics");
    }

    #[test]
    fn empty_argument_list_is_a_usage_error() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(std::iter::empty::<OsString>(), &mut stdout, &mut stderr);

        assert_eq!(exit, ExitCode::from(2));
        let stderr = String::from_utf8(stderr).expect("stderr is UTF-8");
        assert!(stderr.contains("Usage:"));
    }
}
