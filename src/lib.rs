//! # lslcheck-base
//!
//! Core library for LSL script validation: the standard-library symbol catalog
//! and the ordered diagnostic pipeline used by the rest of the compiler front end.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! diagnostics → DiagnosticSink contract, error/warning kinds, DiagnosticQueue
//!   ↓
//! catalog     → LibraryCatalog, XML DocumentReader, signatures, subset tags
//!   ↓
//! base        → Primitives (Span, ValueType)
//! ```
//!
//! The grammar/parser for script source, per-construct type checking and code
//! generation live in sibling crates; they consume this crate through two
//! surfaces only: catalog lookups ([`catalog::LibraryCatalog`]) and diagnostic
//! reporting ([`diagnostics::DiagnosticSink`]).

// ============================================================================
// MODULES (dependency order: base → catalog → diagnostics)
// ============================================================================

/// Foundation types: Span, ValueType
pub mod base;

/// Library data catalog: XML loader, signatures, subset filtering
pub mod catalog;

/// Diagnostics: sink contract, kinds, ordered replay queue
pub mod diagnostics;

// Re-export foundation types
pub use base::{Parameter, Span, ValueType};

// Re-export the commonly consumed surface
pub use catalog::{
    ALL_SUBSETS, CatalogError, ConstantSignature, DuplicateHandling, EventSignature,
    FunctionSignature, LibraryCatalog, LibrarySignature, SignatureKind, TagSet,
};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, DiagnosticQueue, DiagnosticSink, ErrorKind, Severity,
    WarningKind,
};
