//! Terminal sink collecting rendered diagnostics.

use tracing::debug;

use crate::base::Span;

use super::{Diagnostic, DiagnosticSink, ErrorKind, Severity, WarningKind};

/// A [`DiagnosticSink`] that renders each reported kind into a [`Diagnostic`]
/// and keeps them all, in the order they arrive. Wrapped in a
/// [`DiagnosticQueue`](super::DiagnosticQueue), arrival order is presentation
/// order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Remove and return everything collected so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
        self.warning_count = 0;
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn error(&mut self, span: Span, kind: ErrorKind) {
        let diagnostic = Diagnostic {
            span,
            severity: Severity::Error,
            code: kind.code(),
            message: kind.to_string(),
        };
        debug!(code = diagnostic.code, line = span.line, "error collected");
        self.diagnostics.push(diagnostic);
        self.error_count += 1;
    }

    fn warning(&mut self, span: Span, kind: WarningKind) {
        let diagnostic = Diagnostic {
            span,
            severity: Severity::Warning,
            code: kind.code(),
            message: kind.to_string(),
        };
        debug!(code = diagnostic.code, line = span.line, "warning collected");
        self.diagnostics.push(diagnostic);
        self.warning_count += 1;
    }
}
