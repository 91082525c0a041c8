//! Script value types and signature parameters.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

/// The value types of the scripting language.
///
/// Library data documents spell these with the capitalized token
/// (`Integer`, `Void`, ...); diagnostics render the script keyword
/// (`integer`, `float`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// No value. Legal only as a return type or a variadic parameter type.
    Void,
    Integer,
    Float,
    String,
    Key,
    Vector,
    Rotation,
    List,
}

impl ValueType {
    /// The script-source keyword for this type, empty for `Void`.
    pub fn keyword(&self) -> &'static str {
        match self {
            ValueType::Void => "",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Key => "key",
            ValueType::Vector => "vector",
            ValueType::Rotation => "rotation",
            ValueType::List => "list",
        }
    }

    /// The capitalized token used in library data documents.
    pub fn document_token(&self) -> &'static str {
        match self {
            ValueType::Void => "Void",
            ValueType::Integer => "Integer",
            ValueType::Float => "Float",
            ValueType::String => "String",
            ValueType::Key => "Key",
            ValueType::Vector => "Vector",
            ValueType::Rotation => "Rotation",
            ValueType::List => "List",
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ValueType::Void)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_void() {
            f.write_str("void")
        } else {
            f.write_str(self.keyword())
        }
    }
}

/// Error returned when a document type token does not name a [`ValueType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidTypeToken(pub String);

impl fmt::Display for InvalidTypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid type token", self.0)
    }
}

impl std::error::Error for InvalidTypeToken {}

impl FromStr for ValueType {
    type Err = InvalidTypeToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Void" => Ok(ValueType::Void),
            "Integer" => Ok(ValueType::Integer),
            "Float" => Ok(ValueType::Float),
            "String" => Ok(ValueType::String),
            "Key" => Ok(ValueType::Key),
            "Vector" => Ok(ValueType::Vector),
            "Rotation" => Ok(ValueType::Rotation),
            "List" => Ok(ValueType::List),
            other => Err(InvalidTypeToken(other.to_string())),
        }
    }
}

/// One typed parameter of a function or event signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    pub ty: ValueType,
    /// Variadic tail parameter. At most one per signature, always last,
    /// functions only.
    pub variadic: bool,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
            variadic: false,
        }
    }

    pub fn variadic(name: impl Into<SmolStr>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
            variadic: true,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            write!(f, "{} {}...", self.ty, self.name)
        } else {
            write!(f, "{} {}", self.ty, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trips_document_token() {
        for ty in [
            ValueType::Void,
            ValueType::Integer,
            ValueType::Float,
            ValueType::String,
            ValueType::Key,
            ValueType::Vector,
            ValueType::Rotation,
            ValueType::List,
        ] {
            assert_eq!(ty.document_token().parse::<ValueType>(), Ok(ty));
        }
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert!("integer".parse::<ValueType>().is_err());
        assert!("Quaternion".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_display_is_script_keyword() {
        assert_eq!(ValueType::Integer.to_string(), "integer");
        assert_eq!(ValueType::Void.to_string(), "void");
        assert_eq!(
            Parameter::variadic("rest", ValueType::Void).to_string(),
            "void rest..."
        );
    }
}
