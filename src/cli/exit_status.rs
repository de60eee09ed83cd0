use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, or the user declined a confirmation
/// - `Failure` (1): Command ran but could not do its job (nothing to translate, config exists)
/// - `Error` (2): Command failed due to an internal error (I/O, config, manifest)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
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
