//! Diagnostic reporting pipeline.
//!
//! Validation stages report findings through the [`DiagnosticSink`] trait, one
//! method per severity, with the condition itself expressed as an [`ErrorKind`]
//! or [`WarningKind`] value. Because multiple stages run over one script and
//! each emits in its own traversal order, raw emission order is meaningless to
//! a reader; a [`DiagnosticQueue`] wrapped around a sink buffers everything and
//! releases it in presentation order instead. [`DiagnosticCollector`] is the
//! usual terminal sink, rendering each kind into a [`Diagnostic`] record.

mod collector;
mod kinds;
mod queue;

pub use collector::DiagnosticCollector;
pub use kinds::{ConditionalKind, ErrorKind, RotationComponent, VectorComponent, WarningKind};
pub use queue::DiagnosticQueue;

use std::fmt;

use crate::base::Span;

/// Severity class of a diagnostic. Errors always present before warnings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered diagnostic: where, how severe, which condition, and the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    /// Stable code, e.g. `E0101` or `W0105`.
    pub code: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_none() {
            write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
        } else {
            write!(
                f,
                "{}:{}: {} [{}]: {}",
                self.span.line, self.span.column, self.severity, self.code, self.message
            )
        }
    }
}

/// Receiver for validation findings.
///
/// Implementations decide what reporting means: collect, buffer and reorder,
/// or forward. Reporting never aborts validation; a stage keeps going after
/// calling [`error`](Self::error) so one pass can surface every finding.
pub trait DiagnosticSink {
    fn error(&mut self, span: Span, kind: ErrorKind);
    fn warning(&mut self, span: Span, kind: WarningKind);
}
