//! Deferred, ordered diagnostic release.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

use crate::base::Span;

use super::{DiagnosticSink, ErrorKind, WarningKind};

/// A buffered finding, ordered by source position with an arrival sequence
/// number breaking ties, so same-position findings come out in the order
/// they went in.
struct Queued<K> {
    position: u32,
    seq: u64,
    span: Span,
    kind: K,
}

impl<K> Queued<K> {
    fn key(&self) -> (u32, u64) {
        (self.position, self.seq)
    }
}

impl<K> PartialEq for Queued<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<K> Eq for Queued<K> {}

impl<K> PartialOrd for Queued<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Queued<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A sink adapter that buffers findings and forwards them to the wrapped sink
/// in presentation order on [`drain`](Self::drain): every error first, by
/// ascending source position, then every warning the same way. Findings
/// sharing a position keep their arrival order.
///
/// Validation stages emit in traversal order, which interleaves severities
/// and positions arbitrarily; wrapping the terminal sink in a queue is what
/// turns that into readable output.
pub struct DiagnosticQueue<S> {
    sink: S,
    errors: BinaryHeap<Reverse<Queued<ErrorKind>>>,
    warnings: BinaryHeap<Reverse<Queued<WarningKind>>>,
    next_seq: u64,
}

impl<S: DiagnosticSink> DiagnosticQueue<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            errors: BinaryHeap::new(),
            warnings: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Number of buffered, not yet drained errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of buffered, not yet drained warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Forward everything buffered to the wrapped sink, errors before
    /// warnings, each severity in ascending source position. Each finding is
    /// delivered exactly once; the queue is empty afterwards.
    pub fn drain(&mut self) {
        trace!(
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            "draining diagnostic queue"
        );
        while let Some(Reverse(queued)) = self.errors.pop() {
            self.sink.error(queued.span, queued.kind);
        }
        while let Some(Reverse(queued)) = self.warnings.pop() {
            self.sink.warning(queued.span, queued.kind);
        }
    }

    /// Access the wrapped sink.
    pub fn inner(&self) -> &S {
        &self.sink
    }

    /// Discard the queue, returning the wrapped sink. Buffered findings that
    /// were never drained are dropped.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: DiagnosticSink> DiagnosticSink for DiagnosticQueue<S> {
    fn error(&mut self, span: Span, kind: ErrorKind) {
        let seq = self.next_seq();
        self.errors.push(Reverse(Queued {
            position: span.start(),
            seq,
            span,
            kind,
        }));
    }

    fn warning(&mut self, span: Span, kind: WarningKind) {
        let seq = self.next_seq();
        self.warnings.push(Reverse(Queued {
            position: span.start(),
            seq,
            span,
            kind,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticCollector, Severity};

    fn span_at(start: u32) -> Span {
        Span::new(start, start + 1, 1, start + 1)
    }

    fn undefined(name: &str) -> ErrorKind {
        ErrorKind::UndefinedVariable { name: name.into() }
    }

    #[test]
    fn test_errors_sorted_by_position_with_stable_ties() {
        let mut queue = DiagnosticQueue::new(DiagnosticCollector::new());
        queue.error(span_at(30), undefined("a"));
        queue.error(span_at(10), undefined("b"));
        queue.error(span_at(20), undefined("c"));
        queue.error(span_at(10), undefined("d"));
        queue.drain();

        let names: Vec<_> = queue
            .inner()
            .diagnostics()
            .iter()
            .map(|d| (d.span.start(), d.message.clone()))
            .collect();
        assert_eq!(names[0], (10, "undefined variable 'b'".to_string()));
        assert_eq!(names[1], (10, "undefined variable 'd'".to_string()));
        assert_eq!(names[2], (20, "undefined variable 'c'".to_string()));
        assert_eq!(names[3], (30, "undefined variable 'a'".to_string()));
    }

    #[test]
    fn test_errors_drain_before_warnings_regardless_of_position() {
        let mut queue = DiagnosticQueue::new(DiagnosticCollector::new());
        queue.warning(span_at(1), WarningKind::UselessSemicolon);
        queue.error(span_at(100), undefined("late"));
        queue.drain();

        let collected = queue.inner().diagnostics();
        assert_eq!(collected[0].severity, Severity::Error);
        assert_eq!(collected[0].span.start(), 100);
        assert_eq!(collected[1].severity, Severity::Warning);
        assert_eq!(collected[1].span.start(), 1);
    }

    #[test]
    fn test_drain_delivers_exactly_once() {
        let mut queue = DiagnosticQueue::new(DiagnosticCollector::new());
        queue.error(span_at(5), undefined("x"));
        assert_eq!(queue.error_count(), 1);
        queue.drain();
        assert!(queue.is_empty());
        queue.drain();
        assert_eq!(queue.inner().diagnostics().len(), 1);
    }
}
