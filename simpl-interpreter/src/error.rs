//! Runtime error types for the Simpl interpreter.
//!
//! Every evaluation error carries the span of the node that raised it so the
//! caller can render it against the source with miette.

use crate::environment::EnvironmentError;
use miette::Diagnostic;
use simpl_parser::{ParseError, Span};
use thiserror::Error;

/// Errors that can occur during evaluation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("{source}")]
    #[diagnostic(code(simpl::runtime::environment))]
    Environment {
        #[diagnostic_source]
        source: EnvironmentError,
        #[label("here")]
        span: Span,
    },

    #[error("Type mismatch: expected {expected}, found {found}")]
    #[diagnostic(
        code(simpl::runtime::type_mismatch),
        help("Values are never converted implicitly")
    )]
    TypeMismatch {
        expected: String,
        found: String,
        #[label("this is a {found}")]
        span: Span,
    },

    #[error("Invalid assignment target")]
    #[diagnostic(
        code(simpl::runtime::invalid_assignment_target),
        help("Only variables can be assigned; object properties are immutable")
    )]
    InvalidAssignmentTarget {
        #[label("cannot assign to this")]
        span: Span,
    },

    #[error("Cannot evaluate a {node} node on its own")]
    #[diagnostic(code(simpl::runtime::unsupported_node))]
    UnsupportedNode {
        node: String,
        #[label("unsupported")]
        span: Span,
    },

    #[error("Constant '{name}' has no initializer")]
    #[diagnostic(
        code(simpl::runtime::uninitialized_constant),
        help("Give the constant a value: const {name} = ...;")
    )]
    UninitializedConstant {
        name: String,
        #[label("declared without a value")]
        span: Span,
    },

    #[error("A {found} value is not callable")]
    #[diagnostic(
        code(simpl::runtime::not_callable),
        help("Only functions declared with 'fn' can be called")
    )]
    NotCallable {
        found: String,
        #[label("called here")]
        span: Span,
    },

    #[error("Wrong arity: function {function} expects {expected} arguments, got {found}")]
    #[diagnostic(
        code(simpl::runtime::arity_mismatch),
        help("Check the function signature for the correct number of arguments")
    )]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
        #[label("wrong number of arguments")]
        span: Span,
    },

    #[error("Property '{property}' not found")]
    #[diagnostic(code(simpl::runtime::property_not_found))]
    PropertyNotFound {
        property: String,
        #[label("no such property")]
        span: Span,
    },

    #[error("A {found} cannot be used as a property key")]
    #[diagnostic(
        code(simpl::runtime::invalid_property_key),
        help("Property keys must be strings or whole numbers")
    )]
    InvalidPropertyKey {
        found: String,
        #[label("invalid key")]
        span: Span,
    },

    #[error("Recursion depth exceeds the maximum of {limit}")]
    #[diagnostic(
        code(simpl::runtime::recursion_limit),
        help("Look for a function that never stops calling itself, or split up deep nesting")
    )]
    RecursionLimitExceeded {
        limit: usize,
        #[label("while evaluating this")]
        span: Span,
    },
}

impl EvaluationError {
    pub fn environment(source: EnvironmentError, span: Span) -> Self {
        EvaluationError::Environment { source, span }
    }

    pub fn type_mismatch(expected: &str, found: &str, span: Span) -> Self {
        EvaluationError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Location of the node that failed
    pub fn span(&self) -> Span {
        match self {
            EvaluationError::Environment { span, .. }
            | EvaluationError::TypeMismatch { span, .. }
            | EvaluationError::InvalidAssignmentTarget { span }
            | EvaluationError::UnsupportedNode { span, .. }
            | EvaluationError::UninitializedConstant { span, .. }
            | EvaluationError::NotCallable { span, .. }
            | EvaluationError::ArityMismatch { span, .. }
            | EvaluationError::PropertyNotFound { span, .. }
            | EvaluationError::InvalidPropertyKey { span, .. }
            | EvaluationError::RecursionLimitExceeded { span, .. } => *span,
        }
    }
}

/// Result type for evaluation
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Failure of the whole source-to-value pipeline
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InterpreterError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Evaluation(#[from] EvaluationError),
}
