//! Foundation types for the lslcheck toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Span`] - Source positions (byte offsets plus line/column)
//! - [`ValueType`] - The script value types
//! - [`Parameter`] - One typed parameter of a function or event signature
//!
//! This module has NO dependencies on other lslcheck modules.

mod span;
mod types;

pub use span::Span;
pub use types::{Parameter, ValueType};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
