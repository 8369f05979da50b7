//! CLI error type and its mapping to process exit codes.

use lexmoji::{LoadError, StoreError};
use miette::Diagnostic;
use thiserror::Error;

use crate::output::JsonDiagnostic;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// A required input could not be read.
    #[error(transparent)]
    #[diagnostic(code(lexmoji::input))]
    Load(LoadError),

    /// An input document is not valid JSON.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Malformed(JsonDiagnostic),

    /// An output document could not be committed.
    #[error(transparent)]
    #[diagnostic(code(lexmoji::output), help("check that the output directory is writable"))]
    Store(#[from] StoreError),

    /// A required setting is missing or invalid.
    #[error("{message}")]
    #[diagnostic(code(lexmoji::config))]
    Config { message: String },

    /// An HTTP client could not be set up.
    #[error("failed to set up HTTP client: {0}")]
    #[diagnostic(code(lexmoji::http))]
    Http(#[from] reqwest::Error),
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        CliError::Config {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Load(e) if e.is_not_found() => exitcode::NOINPUT,
            CliError::Load(LoadError::Io { .. }) => exitcode::IOERR,
            CliError::Load(_) | CliError::Malformed(_) => exitcode::DATAERR,
            CliError::Store(_) => exitcode::CANTCREAT,
            CliError::Config { .. } => exitcode::CONFIG,
            CliError::Http(_) => exitcode::SOFTWARE,
        }
    }
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Json {
                path,
                line,
                column,
                message,
            } => CliError::Malformed(JsonDiagnostic::from_location(&path, line, column, &message)),
            other => CliError::Load(other),
        }
    }
}
