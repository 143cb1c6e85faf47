//! Error types for parsing and validation.

use std::fmt;

use thiserror::Error;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub(crate) fn from_span(span: pest::Span<'_>) -> Self {
        let (line, column) = span.start_pos().line_col();
        Self {
            line: line as u32,
            column: column as u32,
        }
    }
}

/// What a validation diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationContext {
    Network,
    Node { name: String },
    Evidence { index: usize, token: String },
}

impl fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Node { name } => write!(f, "node '{}'", name),
            Self::Evidence { index, token } => {
                write!(f, "evidence token #{} '{}'", index + 1, token)
            }
        }
    }
}

/// Rich semantic validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub message: String,
    pub context: Option<ValidationContext>,
    pub position: Option<SourcePosition>,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error")?;
        if let Some(ctx) = &self.context {
            write!(f, " [{}]", ctx)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(pos) = self.position {
            write!(f, " (at {}:{})", pos.line, pos.column)?;
        }
        Ok(())
    }
}

/// Errors that can occur during parsing or validation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Syntax error during parsing.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Semantic validation error.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Semantic validation error with context and optional source position.
    #[error("{0}")]
    ValidationDiagnostic(ValidationDiagnostic),
}

impl FrontendError {
    /// Build a context-aware validation diagnostic.
    pub fn validation(
        message: impl Into<String>,
        context: Option<ValidationContext>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self::ValidationDiagnostic(ValidationDiagnostic {
            message: message.into(),
            context,
            position,
        })
    }

    /// Returns the rich validation diagnostic if present.
    pub fn validation_diagnostic(&self) -> Option<&ValidationDiagnostic> {
        match self {
            Self::ValidationDiagnostic(diag) => Some(diag),
            _ => None,
        }
    }
}
