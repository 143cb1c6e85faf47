//! Error types for network loading and sampling.

use std::path::PathBuf;

use thiserror::Error;

impl From<bayesnet_frontend::FrontendError> for ExecError {
    fn from(err: bayesnet_frontend::FrontendError) -> Self {
        match err {
            bayesnet_frontend::FrontendError::ParseError(msg) => ExecError::ParseError(msg),
            bayesnet_frontend::FrontendError::ValidationError(msg) => {
                ExecError::ValidationError(msg)
            }
            bayesnet_frontend::FrontendError::ValidationDiagnostic(diag) => {
                ExecError::ValidationError(diag.to_string())
            }
            _ => ExecError::Internal(format!("unexpected frontend error: {:?}", err)),
        }
    }
}

/// Errors that can occur while loading a network or running a sampler.
///
/// All public APIs return `Result<T, ExecError>`; library code does not panic
/// on malformed input.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExecError {
    /// Syntax error in a network or evidence file.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Structural error (unknown parent, CPT length, cycle, evidence arity).
    #[error("validation error: {0}")]
    ValidationError(String),

    /// An input file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Runtime sampling error.
    #[error("execution error: {0}")]
    Execution(String),

    /// Numerical error (NaN/Inf weights, invalid probabilities).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Rejection sampling discarded every trial, so the posterior is undefined.
    #[error("no accepted samples: all {attempted} trial(s) disagreed with the evidence")]
    NoAcceptedSamples { attempted: usize },

    /// Contract violation inside the engine (programmer error, not user error).
    #[error("internal error: {0}")]
    Internal(String),
}
