//! CLI-level errors (wraps domain and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::ExprError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Eval(#[from] ExprError),

    #[error("{0}")]
    Config(#[from] SettingsError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Eval(_) => crate::exitcode::DATAERR,
            CliError::Config(_) => crate::exitcode::CONFIG,
        }
    }
}

/// Exit code for a failed argument parse: help and version requests are
/// successful, everything else is a usage error.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        crate::exitcode::USAGE
    } else {
        crate::exitcode::OK
    }
}
