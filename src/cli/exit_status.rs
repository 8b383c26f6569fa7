use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed; warnings may have been reported
/// - `Failure` (1): The input could not be processed (unsupported template, parse error),
///   or `init` found an existing config file
/// - `Error` (2): Command failed due to internal error (I/O, config, replacement definition)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed; warnings may have been reported.
    Success,
    /// The pass aborted or the input did not parse.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
