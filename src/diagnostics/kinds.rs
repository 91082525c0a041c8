//! Diagnostic kinds for script validation.
//!
//! Every diagnosable condition about a script under validation is one variant
//! of [`ErrorKind`] or [`WarningKind`], carrying exactly the payload needed to
//! render its message. Sinks receive the sum type rather than implementing one
//! method per condition.
//!
//! ## Code Ranges
//!
//! - **E01xx**: symbol resolution (undefined references, event signatures)
//! - **E02xx**: function calls (arity, argument types, overload selection)
//! - **E03xx**: redefinitions (user symbols and standard library symbols)
//! - **E04xx**: type mismatches and invalid operations
//! - **E05xx**: statements, lvalues, control flow, string literals
//! - **E06xx**: restrictions in static (global initializer) context
//! - **W01xx**: warnings (dead code, unused, shadowing, style)

use std::fmt;

use smol_str::SmolStr;

use crate::base::ValueType;

/// A component of a vector literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorComponent {
    X,
    Y,
    Z,
}

impl fmt::Display for VectorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VectorComponent::X => "x",
            VectorComponent::Y => "y",
            VectorComponent::Z => "z",
        })
    }
}

/// A component of a rotation literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationComponent {
    X,
    Y,
    Z,
    S,
}

impl fmt::Display for RotationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotationComponent::X => "x",
            RotationComponent::Y => "y",
            RotationComponent::Z => "z",
            RotationComponent::S => "s",
        })
    }
}

/// The statement forms that carry a conditional expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionalKind {
    If,
    ElseIf,
    While,
    DoWhile,
    For,
}

impl fmt::Display for ConditionalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConditionalKind::If => "if statement",
            ConditionalKind::ElseIf => "else-if statement",
            ConditionalKind::While => "while loop",
            ConditionalKind::DoWhile => "do-while loop",
            ConditionalKind::For => "for loop",
        })
    }
}

/// An error condition detected in a script under validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    // =========================================================================
    // E01xx: symbol resolution
    // =========================================================================
    UndefinedVariable {
        name: SmolStr,
    },
    CallToUndefinedFunction {
        name: SmolStr,
    },
    JumpToUndefinedLabel {
        name: SmolStr,
    },
    ChangeToUndefinedState {
        name: SmolStr,
    },
    UnknownEventHandler {
        name: SmolStr,
    },
    IncorrectEventHandlerSignature {
        name: SmolStr,
        /// Rendering of the library's expected signature.
        expected: String,
    },

    // =========================================================================
    // E02xx: function calls
    // =========================================================================
    ImproperParameterCount {
        function: SmolStr,
        /// For variadic functions this is the concrete parameter count,
        /// not the total.
        expected: usize,
        given: usize,
        variadic: bool,
    },
    ParameterTypeMismatch {
        function: SmolStr,
        /// Zero-based position of the offending argument.
        index: usize,
        parameter: SmolStr,
        expected: ValueType,
        given: ValueType,
    },
    NoSuitableOverload {
        function: SmolStr,
        given: usize,
    },
    AmbiguousOverloadCall {
        function: SmolStr,
        matches: usize,
    },

    // =========================================================================
    // E03xx: redefinitions
    // =========================================================================
    VariableRedefined {
        name: SmolStr,
        ty: ValueType,
    },
    ParameterNameRedefined {
        name: SmolStr,
    },
    FunctionRedefined {
        name: SmolStr,
    },
    LabelRedefined {
        name: SmolStr,
    },
    StateRedefined {
        name: SmolStr,
    },
    DefaultStateRedefined,
    EventHandlerRedefined {
        event: SmolStr,
        state: SmolStr,
    },
    RedefinedStandardLibraryConstant {
        name: SmolStr,
        ty: ValueType,
    },
    RedefinedStandardLibraryFunction {
        name: SmolStr,
        /// Rendering of the library signature being shadowed.
        library_signature: String,
    },
    ModifiedLibraryConstant {
        name: SmolStr,
    },

    // =========================================================================
    // E04xx: type mismatches and invalid operations
    // =========================================================================
    TypeMismatchInDeclaration {
        variable: SmolStr,
        expected: ValueType,
        given: ValueType,
    },
    TypeMismatchInAssignment {
        operator: SmolStr,
        expected: ValueType,
        given: ValueType,
    },
    TypeMismatchInReturn {
        function: SmolStr,
        expected: ValueType,
        given: ValueType,
    },
    ReturnedValueFromVoidFunction {
        function: SmolStr,
        given: ValueType,
    },
    ReturnedVoidFromNonVoidFunction {
        function: SmolStr,
        expected: ValueType,
    },
    InvalidCast {
        from: ValueType,
        to: ValueType,
    },
    InvalidVectorContent {
        component: VectorComponent,
        given: ValueType,
    },
    InvalidRotationContent {
        component: RotationComponent,
        given: ValueType,
    },
    InvalidListContent {
        index: usize,
        given: ValueType,
    },
    InvalidBinaryOperation {
        operator: SmolStr,
        left: ValueType,
        right: ValueType,
    },
    InvalidPrefixOperation {
        operator: SmolStr,
        operand: ValueType,
    },
    InvalidPostfixOperation {
        operator: SmolStr,
        operand: ValueType,
    },
    InvalidTupleComponentAccess {
        component: SmolStr,
        ty: ValueType,
    },
    TupleComponentAccessOnLibraryConstant {
        constant: SmolStr,
        component: SmolStr,
    },

    // =========================================================================
    // E05xx: statements, lvalues, control flow, string literals
    // =========================================================================
    AssignmentToLiteral {
        operator: SmolStr,
    },
    AssignmentToCompoundExpression {
        operator: SmolStr,
    },
    IfConditionNotValidType {
        given: ValueType,
    },
    ElseIfConditionNotValidType {
        given: ValueType,
    },
    WhileConditionNotValidType {
        given: ValueType,
    },
    DoLoopConditionNotValidType {
        given: ValueType,
    },
    ForLoopConditionNotValidType {
        given: ValueType,
    },
    MissingConditionalExpression {
        statement: ConditionalKind,
    },
    DeadCodeAfterReturnPath {
        function: SmolStr,
    },
    NotAllCodePathsReturn {
        function: SmolStr,
    },
    DefinedVariableInBracelessScope {
        name: SmolStr,
    },
    IllegalStringCharacter {
        character: char,
        /// Zero-based offset within the string literal.
        index: usize,
    },
    InvalidStringEscapeCode {
        escape: char,
        index: usize,
    },
    /// Program-wide; reported with [`Span::NONE`](crate::base::Span::NONE).
    MissingDefaultState,
    StateHasNoEventHandlers {
        state: SmolStr,
    },

    // =========================================================================
    // E06xx: static (global initializer) context restrictions
    // =========================================================================
    FunctionCallInStaticContext,
    BinaryOperatorInStaticContext,
    ParenthesizedExpressionInStaticContext,
    PostfixOperationInStaticContext,
    InvalidPrefixOperationInStaticContext {
        operator: SmolStr,
    },
    CastExpressionInStaticContext,
}

impl ErrorKind {
    /// Stable diagnostic code for this condition.
    pub fn code(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            UndefinedVariable { .. } => "E0101",
            CallToUndefinedFunction { .. } => "E0102",
            JumpToUndefinedLabel { .. } => "E0103",
            ChangeToUndefinedState { .. } => "E0104",
            UnknownEventHandler { .. } => "E0105",
            IncorrectEventHandlerSignature { .. } => "E0106",
            ImproperParameterCount { .. } => "E0201",
            ParameterTypeMismatch { .. } => "E0202",
            NoSuitableOverload { .. } => "E0203",
            AmbiguousOverloadCall { .. } => "E0204",
            VariableRedefined { .. } => "E0301",
            ParameterNameRedefined { .. } => "E0302",
            FunctionRedefined { .. } => "E0303",
            LabelRedefined { .. } => "E0304",
            StateRedefined { .. } => "E0305",
            DefaultStateRedefined => "E0306",
            EventHandlerRedefined { .. } => "E0307",
            RedefinedStandardLibraryConstant { .. } => "E0308",
            RedefinedStandardLibraryFunction { .. } => "E0309",
            ModifiedLibraryConstant { .. } => "E0310",
            TypeMismatchInDeclaration { .. } => "E0401",
            TypeMismatchInAssignment { .. } => "E0402",
            TypeMismatchInReturn { .. } => "E0403",
            ReturnedValueFromVoidFunction { .. } => "E0404",
            ReturnedVoidFromNonVoidFunction { .. } => "E0405",
            InvalidCast { .. } => "E0406",
            InvalidVectorContent { .. } => "E0407",
            InvalidRotationContent { .. } => "E0408",
            InvalidListContent { .. } => "E0409",
            InvalidBinaryOperation { .. } => "E0410",
            InvalidPrefixOperation { .. } => "E0411",
            InvalidPostfixOperation { .. } => "E0412",
            InvalidTupleComponentAccess { .. } => "E0413",
            TupleComponentAccessOnLibraryConstant { .. } => "E0414",
            AssignmentToLiteral { .. } => "E0501",
            AssignmentToCompoundExpression { .. } => "E0502",
            IfConditionNotValidType { .. } => "E0503",
            ElseIfConditionNotValidType { .. } => "E0504",
            WhileConditionNotValidType { .. } => "E0505",
            DoLoopConditionNotValidType { .. } => "E0506",
            ForLoopConditionNotValidType { .. } => "E0507",
            MissingConditionalExpression { .. } => "E0508",
            DeadCodeAfterReturnPath { .. } => "E0509",
            NotAllCodePathsReturn { .. } => "E0510",
            DefinedVariableInBracelessScope { .. } => "E0511",
            IllegalStringCharacter { .. } => "E0512",
            InvalidStringEscapeCode { .. } => "E0513",
            MissingDefaultState => "E0514",
            StateHasNoEventHandlers { .. } => "E0515",
            FunctionCallInStaticContext => "E0601",
            BinaryOperatorInStaticContext => "E0602",
            ParenthesizedExpressionInStaticContext => "E0603",
            PostfixOperationInStaticContext => "E0604",
            InvalidPrefixOperationInStaticContext { .. } => "E0605",
            CastExpressionInStaticContext => "E0606",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ErrorKind::*;
        match self {
            UndefinedVariable { name } => write!(f, "undefined variable '{name}'"),
            CallToUndefinedFunction { name } => write!(f, "call to undefined function '{name}'"),
            JumpToUndefinedLabel { name } => write!(f, "jump to undefined label '{name}'"),
            ChangeToUndefinedState { name } => write!(f, "change to undefined state '{name}'"),
            UnknownEventHandler { name } => write!(f, "unknown event handler '{name}'"),
            IncorrectEventHandlerSignature { name, expected } => write!(
                f,
                "incorrect signature for event handler '{name}', expected: {expected}"
            ),
            ImproperParameterCount {
                function,
                expected,
                given,
                variadic,
            } => {
                if *variadic {
                    write!(
                        f,
                        "function '{function}' takes at least {expected} concrete parameter(s), \
                         {given} given"
                    )
                } else {
                    write!(
                        f,
                        "function '{function}' takes {expected} parameter(s), {given} given"
                    )
                }
            }
            ParameterTypeMismatch {
                function,
                index,
                parameter,
                expected,
                given,
            } => write!(
                f,
                "type mismatch in call to function '{function}': parameter #{} ('{parameter}') \
                 expects {expected}, {given} given",
                index + 1
            ),
            NoSuitableOverload { function, given } => write!(
                f,
                "no overload of function '{function}' accepts the given {given} argument(s)"
            ),
            AmbiguousOverloadCall { function, matches } => write!(
                f,
                "call to function '{function}' is ambiguous, {matches} overloads match"
            ),
            VariableRedefined { name, ty } => {
                write!(f, "{ty} variable '{name}' redefined")
            }
            ParameterNameRedefined { name } => {
                write!(f, "parameter name '{name}' used more than once")
            }
            FunctionRedefined { name } => write!(f, "function '{name}' redefined"),
            LabelRedefined { name } => write!(f, "label '{name}' redefined"),
            StateRedefined { name } => write!(f, "state '{name}' redefined"),
            DefaultStateRedefined => write!(f, "default state redefined"),
            EventHandlerRedefined { event, state } => write!(
                f,
                "event handler '{event}' redefined in state '{state}'"
            ),
            RedefinedStandardLibraryConstant { name, ty } => write!(
                f,
                "redefinition of standard library constant '{name}' as a {ty} variable"
            ),
            RedefinedStandardLibraryFunction {
                name,
                library_signature,
            } => write!(
                f,
                "redefinition of standard library function '{name}', see: {library_signature}"
            ),
            ModifiedLibraryConstant { name } => write!(
                f,
                "standard library constant '{name}' cannot be modified"
            ),
            TypeMismatchInDeclaration {
                variable,
                expected,
                given,
            } => write!(
                f,
                "type mismatch declaring {expected} variable '{variable}', {given} given"
            ),
            TypeMismatchInAssignment {
                operator,
                expected,
                given,
            } => write!(
                f,
                "type mismatch in '{operator}' assignment: expected {expected}, {given} given"
            ),
            TypeMismatchInReturn {
                function,
                expected,
                given,
            } => write!(
                f,
                "type mismatch returning from function '{function}': expected {expected}, \
                 {given} given"
            ),
            ReturnedValueFromVoidFunction { function, given } => write!(
                f,
                "returned {given} value from function '{function}' which has no return type"
            ),
            ReturnedVoidFromNonVoidFunction { function, expected } => write!(
                f,
                "empty return in function '{function}' which must return {expected}"
            ),
            InvalidCast { from, to } => write!(f, "cannot cast {from} to {to}"),
            InvalidVectorContent { component, given } => write!(
                f,
                "vector component '{component}' must be float, {given} given"
            ),
            InvalidRotationContent { component, given } => write!(
                f,
                "rotation component '{component}' must be float, {given} given"
            ),
            InvalidListContent { index, given } => write!(
                f,
                "list element #{} cannot be {given}",
                index + 1
            ),
            InvalidBinaryOperation {
                operator,
                left,
                right,
            } => write!(
                f,
                "operator '{operator}' cannot be applied to {left} and {right}"
            ),
            InvalidPrefixOperation { operator, operand } => write!(
                f,
                "prefix operator '{operator}' cannot be applied to {operand}"
            ),
            InvalidPostfixOperation { operator, operand } => write!(
                f,
                "postfix operator '{operator}' cannot be applied to {operand}"
            ),
            InvalidTupleComponentAccess { component, ty } => {
                write!(f, "{ty} has no component '{component}'")
            }
            TupleComponentAccessOnLibraryConstant { constant, component } => write!(
                f,
                "component '{component}' of standard library constant '{constant}' \
                 cannot be accessed"
            ),
            AssignmentToLiteral { operator } => {
                write!(f, "'{operator}' assignment to a literal value")
            }
            AssignmentToCompoundExpression { operator } => {
                write!(f, "'{operator}' assignment to a compound expression")
            }
            IfConditionNotValidType { given } => {
                write!(f, "{given} is not a valid if condition type")
            }
            ElseIfConditionNotValidType { given } => {
                write!(f, "{given} is not a valid else-if condition type")
            }
            WhileConditionNotValidType { given } => {
                write!(f, "{given} is not a valid while loop condition type")
            }
            DoLoopConditionNotValidType { given } => {
                write!(f, "{given} is not a valid do-while loop condition type")
            }
            ForLoopConditionNotValidType { given } => {
                write!(f, "{given} is not a valid for loop condition type")
            }
            MissingConditionalExpression { statement } => {
                write!(f, "missing conditional expression in {statement}")
            }
            DeadCodeAfterReturnPath { function } => write!(
                f,
                "unreachable code after return path in function '{function}'"
            ),
            NotAllCodePathsReturn { function } => write!(
                f,
                "not all code paths of function '{function}' return a value"
            ),
            DefinedVariableInBracelessScope { name } => write!(
                f,
                "variable '{name}' declared in a braceless scope"
            ),
            IllegalStringCharacter { character, index } => write!(
                f,
                "illegal character '{character}' in string literal at index {index}"
            ),
            InvalidStringEscapeCode { escape, index } => write!(
                f,
                "invalid escape code '\\{escape}' in string literal at index {index}"
            ),
            MissingDefaultState => write!(f, "script is missing a default state"),
            StateHasNoEventHandlers { state } => {
                write!(f, "state '{state}' declares no event handlers")
            }
            FunctionCallInStaticContext => {
                write!(f, "function calls are not allowed in a global variable initializer")
            }
            BinaryOperatorInStaticContext => write!(
                f,
                "binary operators are not allowed in a global variable initializer"
            ),
            ParenthesizedExpressionInStaticContext => write!(
                f,
                "parenthesized expressions are not allowed in a global variable initializer"
            ),
            PostfixOperationInStaticContext => write!(
                f,
                "postfix operations are not allowed in a global variable initializer"
            ),
            InvalidPrefixOperationInStaticContext { operator } => write!(
                f,
                "prefix operator '{operator}' is not allowed in a global variable initializer"
            ),
            CastExpressionInStaticContext => write!(
                f,
                "cast expressions are not allowed in a global variable initializer"
            ),
        }
    }
}

/// A warning condition detected in a script under validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    DeadCodeInFunction { function: SmolStr },
    DeadCodeInEventHandler { event: SmolStr },
    FunctionNeverUsed { name: SmolStr },
    GlobalVariableNeverUsed { name: SmolStr },
    LocalVariableNeverUsed { name: SmolStr },
    ParameterNeverUsed { name: SmolStr },
    ParameterHidesGlobalVariable { parameter: SmolStr },
    LocalVariableHidesParameter { variable: SmolStr },
    LocalVariableHidesGlobalVariable { variable: SmolStr },
    VariableRedeclaredInInnerScope { name: SmolStr },
    RedundantCast { ty: ValueType },
    ConditionalExpressionIsConstant,
    ExpressionStatementHasNoEffect,
    UselessSemicolon,
    MultipleListAssignmentsInExpression,
    MultipleStringAssignmentsInExpression,
    UseOfDeprecatedFunction { name: SmolStr },
    UseOfDeprecatedConstant { name: SmolStr },
    UseOfDeprecatedEventHandler { name: SmolStr },
}

impl WarningKind {
    /// Stable diagnostic code for this condition.
    pub fn code(&self) -> &'static str {
        use WarningKind::*;
        match self {
            DeadCodeInFunction { .. } => "W0101",
            DeadCodeInEventHandler { .. } => "W0102",
            FunctionNeverUsed { .. } => "W0103",
            GlobalVariableNeverUsed { .. } => "W0104",
            LocalVariableNeverUsed { .. } => "W0105",
            ParameterNeverUsed { .. } => "W0106",
            ParameterHidesGlobalVariable { .. } => "W0107",
            LocalVariableHidesParameter { .. } => "W0108",
            LocalVariableHidesGlobalVariable { .. } => "W0109",
            VariableRedeclaredInInnerScope { .. } => "W0110",
            RedundantCast { .. } => "W0111",
            ConditionalExpressionIsConstant => "W0112",
            ExpressionStatementHasNoEffect => "W0113",
            UselessSemicolon => "W0114",
            MultipleListAssignmentsInExpression => "W0115",
            MultipleStringAssignmentsInExpression => "W0116",
            UseOfDeprecatedFunction { .. } => "W0117",
            UseOfDeprecatedConstant { .. } => "W0118",
            UseOfDeprecatedEventHandler { .. } => "W0119",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use WarningKind::*;
        match self {
            DeadCodeInFunction { function } => {
                write!(f, "dead code detected in function '{function}'")
            }
            DeadCodeInEventHandler { event } => {
                write!(f, "dead code detected in event handler '{event}'")
            }
            FunctionNeverUsed { name } => write!(f, "function '{name}' is never used"),
            GlobalVariableNeverUsed { name } => {
                write!(f, "global variable '{name}' is never used")
            }
            LocalVariableNeverUsed { name } => {
                write!(f, "local variable '{name}' is never used")
            }
            ParameterNeverUsed { name } => write!(f, "parameter '{name}' is never used"),
            ParameterHidesGlobalVariable { parameter } => {
                write!(f, "parameter '{parameter}' hides a global variable")
            }
            LocalVariableHidesParameter { variable } => {
                write!(f, "local variable '{variable}' hides a parameter")
            }
            LocalVariableHidesGlobalVariable { variable } => {
                write!(f, "local variable '{variable}' hides a global variable")
            }
            VariableRedeclaredInInnerScope { name } => {
                write!(f, "variable '{name}' redeclared in an inner scope")
            }
            RedundantCast { ty } => write!(f, "redundant cast to {ty}"),
            ConditionalExpressionIsConstant => write!(f, "conditional expression is constant"),
            ExpressionStatementHasNoEffect => write!(f, "expression statement has no effect"),
            UselessSemicolon => write!(f, "useless semicolon"),
            MultipleListAssignmentsInExpression => write!(
                f,
                "multiple assignments to a list variable in one expression"
            ),
            MultipleStringAssignmentsInExpression => write!(
                f,
                "multiple assignments to a string variable in one expression"
            ),
            UseOfDeprecatedFunction { name } => {
                write!(f, "use of deprecated library function '{name}'")
            }
            UseOfDeprecatedConstant { name } => {
                write!(f, "use of deprecated library constant '{name}'")
            }
            UseOfDeprecatedEventHandler { name } => {
                write!(f, "use of deprecated library event handler '{name}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variadic_arity_wording_is_distinct() {
        let variadic = ErrorKind::ImproperParameterCount {
            function: "llListRandomize".into(),
            expected: 2,
            given: 1,
            variadic: true,
        };
        let fixed = ErrorKind::ImproperParameterCount {
            function: "llSin".into(),
            expected: 1,
            given: 2,
            variadic: false,
        };
        assert_eq!(
            variadic.to_string(),
            "function 'llListRandomize' takes at least 2 concrete parameter(s), 1 given"
        );
        assert_eq!(
            fixed.to_string(),
            "function 'llSin' takes 1 parameter(s), 2 given"
        );
    }

    #[test]
    fn test_codes_follow_range_convention() {
        assert_eq!(
            ErrorKind::UndefinedVariable { name: "x".into() }.code(),
            "E0101"
        );
        assert_eq!(ErrorKind::MissingDefaultState.code(), "E0514");
        assert_eq!(WarningKind::UselessSemicolon.code(), "W0114");
    }

    #[test]
    fn test_positionless_kind_renders() {
        assert_eq!(
            ErrorKind::MissingDefaultState.to_string(),
            "script is missing a default state"
        );
    }
}
