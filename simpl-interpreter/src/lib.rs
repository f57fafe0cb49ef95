//! Simpl Interpreter
//!
//! Tree-walking evaluation of parsed Simpl programs:
//! - `Value`: the runtime values (null, number, boolean, string, object, function)
//! - `Environment`: parent-linked lexical scopes with constant bindings
//! - `Evaluator`: dispatches on AST nodes and produces values
//! - `InterpreterSession`: parse + evaluate against one persistent environment

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod test_harness;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use environment::{Environment, EnvironmentError};
pub use error::{EvaluationError, EvaluationResult, InterpreterError};
pub use evaluator::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_EVALUATION_DEPTH, Evaluator, Node};
pub use test_harness::{InterpreterSession, TestHarnessError};
pub use value::{FunctionValue, Value};

/// Evaluate a single node against `env` with a default evaluator
pub fn evaluate<'a>(node: impl Into<Node<'a>>, env: &Environment) -> EvaluationResult<Value> {
    Evaluator::new().evaluate(node, env)
}

/// Parse `source` and evaluate it as a program in `env`
///
/// Declarations made before a failure stay in `env`.
pub fn evaluate_source(source: &str, env: &Environment) -> Result<Value, InterpreterError> {
    let program = simpl_parser::parse_program(source)?;
    let value = evaluate(&program, env)?;
    Ok(value)
}
