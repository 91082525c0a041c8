//! Library signature records.
//!
//! A signature describes one member of the standard library: a callable
//! function (possibly one overload among several), a constant, or an event
//! handler. Signatures are plain data; once a catalog has accepted one it is
//! never mutated or removed individually.

use std::fmt;
use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Parameter, ValueType};

use super::tags::TagSet;

/// Discriminates the three record shapes of a library data document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    Function,
    Constant,
    Event,
}

impl SignatureKind {
    /// The element name carrying this kind in a library data document.
    pub fn element_name(&self) -> &'static str {
        match self {
            SignatureKind::Function => "LibraryFunction",
            SignatureKind::Constant => "LibraryConstant",
            SignatureKind::Event => "EventHandler",
        }
    }
}

/// A built-in function signature, one overload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: SmolStr,
    pub return_type: ValueType,
    /// Document order. At most the last parameter is variadic.
    pub params: Vec<Parameter>,
    pub subsets: TagSet,
    pub docs: String,
}

impl FunctionSignature {
    pub fn new(return_type: ValueType, name: impl Into<SmolStr>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            subsets: TagSet::new(),
            docs: String::new(),
        }
    }

    pub fn with_subsets(mut self, subsets: TagSet) -> Self {
        self.subsets = subsets;
        self
    }

    pub fn has_variadic_parameter(&self) -> bool {
        self.params.last().is_some_and(|p| p.variadic)
    }

    /// Number of fixed leading parameters, excluding the variadic tail.
    pub fn concrete_parameter_count(&self) -> usize {
        self.params.len() - usize::from(self.has_variadic_parameter())
    }

    /// The fixed leading parameters.
    pub fn concrete_parameters(&self) -> &[Parameter] {
        &self.params[..self.concrete_parameter_count()]
    }

    /// Whether `other` would be a duplicate or ambiguous definition of this
    /// signature.
    ///
    /// Two same-named zero-parameter functions are always duplicates. Otherwise
    /// the parameter lists must agree position-by-position in type and variadic
    /// status. The return type never participates; it does not make a
    /// definition unique and takes no part in overload resolution.
    pub fn definition_is_duplicate(&self, other: &FunctionSignature) -> bool {
        if self.name != other.name {
            return false;
        }
        if self.params.is_empty() && other.params.is_empty() {
            return true;
        }
        self.parameters_identical(other)
    }

    /// Exact signature match: name, return type and the full parameter shape.
    /// Parameter names do not matter.
    pub fn signature_equivalent(&self, other: &FunctionSignature) -> bool {
        self.name == other.name
            && self.return_type == other.return_type
            && self.parameters_identical(other)
    }

    fn parameters_identical(&self, other: &FunctionSignature) -> bool {
        self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(l, r)| l.ty == r.ty && l.variadic == r.variadic)
    }

    /// Human-readable rendering, e.g. `float llSin(float theta)`.
    pub fn signature_string(&self) -> String {
        let mut out = String::new();
        if !self.return_type.is_void() {
            let _ = write!(out, "{} ", self.return_type);
        }
        let _ = write!(out, "{}(", self.name);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{param}");
        }
        out.push(')');
        out
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature_string())
    }
}

/// A built-in constant signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantSignature {
    pub name: SmolStr,
    pub ty: ValueType,
    /// Literal value as spelled in the document, if any.
    pub value: Option<String>,
    pub subsets: TagSet,
    pub docs: String,
}

impl ConstantSignature {
    pub fn new(ty: ValueType, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: None,
            subsets: TagSet::new(),
            docs: String::new(),
        }
    }

    pub fn with_subsets(mut self, subsets: TagSet) -> Self {
        self.subsets = subsets;
        self
    }

    pub fn signature_string(&self) -> String {
        format!("{} {}", self.ty, self.name)
    }
}

/// A built-in event handler signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventSignature {
    pub name: SmolStr,
    /// Document order, never variadic.
    pub params: Vec<Parameter>,
    pub subsets: TagSet,
    pub docs: String,
    /// Free-form key/value annotations carried by EventHandler elements.
    pub properties: FxHashMap<SmolStr, String>,
}

impl EventSignature {
    pub fn new(name: impl Into<SmolStr>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            params,
            subsets: TagSet::new(),
            docs: String::new(),
            properties: FxHashMap::default(),
        }
    }

    pub fn with_subsets(mut self, subsets: TagSet) -> Self {
        self.subsets = subsets;
        self
    }

    pub fn signature_string(&self) -> String {
        let mut out = format!("{}(", self.name);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{param}");
        }
        out.push(')');
        out
    }
}

/// A parsed library record of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibrarySignature {
    Function(FunctionSignature),
    Constant(ConstantSignature),
    Event(EventSignature),
}

impl LibrarySignature {
    pub fn kind(&self) -> SignatureKind {
        match self {
            LibrarySignature::Function(_) => SignatureKind::Function,
            LibrarySignature::Constant(_) => SignatureKind::Constant,
            LibrarySignature::Event(_) => SignatureKind::Event,
        }
    }

    pub fn name(&self) -> &SmolStr {
        match self {
            LibrarySignature::Function(s) => &s.name,
            LibrarySignature::Constant(s) => &s.name,
            LibrarySignature::Event(s) => &s.name,
        }
    }

    pub fn subsets(&self) -> &TagSet {
        match self {
            LibrarySignature::Function(s) => &s.subsets,
            LibrarySignature::Constant(s) => &s.subsets,
            LibrarySignature::Event(s) => &s.subsets,
        }
    }
}
