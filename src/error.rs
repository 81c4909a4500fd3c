//! Exit codes for the stringsweep binary.

/// Exit codes for the stringsweep application.
///
/// - 0: Success (every eligible file was processed or skipped cleanly)
/// - 1: General error (backup, configuration or argument failure)
/// - 3: Partial success (completed, but some files could not be processed)
///
/// Failed translations alone never change the exit code: the affected
/// strings are kept as they were and the run counts as successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: All eligible files were handled.
    Success = 0,
    /// General error: A fatal error aborted the run.
    GeneralError = 1,
    /// Partial success: The run completed with per-file errors.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "SW000",
            Self::GeneralError => "SW001",
            Self::PartialSuccess => "SW003",
        }
    }
}
