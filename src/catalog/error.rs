//! Error types for catalog construction and reconfiguration.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors produced while loading or reconfiguring a library catalog.
///
/// Construction failures are all-or-nothing; a failed build leaves no partial
/// catalog behind.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed library data document. Carries the 1-based source line of the
    /// offending element.
    #[error("library data XML syntax error, line {line}: {message}")]
    Document { line: u32, message: String },

    /// Two otherwise-valid records collided under strict duplicate handling.
    /// The line is that of the second, colliding element.
    #[error("library data XML syntax error, line {line}: duplicate or ambiguous definition of '{name}'")]
    DuplicateSignature { line: u32, name: SmolStr },

    /// The active subsets of a catalog can only change in live filtering mode.
    #[error("cannot change active subsets: catalog is not in live filtering mode")]
    LiveFilteringDisabled,
}

impl CatalogError {
    /// Create a document error attributed to `line`.
    pub fn document(line: u32, message: impl Into<String>) -> Self {
        Self::Document {
            line,
            message: message.into(),
        }
    }

    /// 1-based document line of the failure, if it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            CatalogError::Document { line, .. } => Some(*line),
            CatalogError::DuplicateSignature { line, .. } => Some(*line),
            CatalogError::LiveFilteringDisabled => None,
        }
    }
}
