//! Interpreter session for the Simpl interpreter
//!
//! Parses and evaluates snippets against one persistent environment, so a
//! test (or the REPL) can declare something in one step and use it in the
//! next. Assertion helpers return errors instead of panicking.

use crate::{Environment, EvaluationError, Evaluator, Value};
use miette::Diagnostic;
use simpl_parser::{ParseError, parse_program};
use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Debug, Error, Diagnostic)]
pub enum TestHarnessError {
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Evaluation error: {source}")]
    Evaluation {
        #[from]
        source: EvaluationError,
    },

    #[error("Assertion failed: expected {expected}, but got {actual}")]
    AssertionFailed { expected: String, actual: String },

    #[error("Type error: expected {expected_type}, got {actual_type}")]
    TypeError {
        expected_type: String,
        actual_type: String,
    },

    #[error("Variable not found: {name}")]
    VariableNotFound { name: String },
}

/// A parse-and-evaluate session with REPL-like variable persistence
#[derive(Debug, Default)]
pub struct InterpreterSession {
    environment: Environment,
    evaluator: Evaluator,
}

impl InterpreterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose evaluator stops at `max_call_depth` nested calls
    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self {
            environment: Environment::root(),
            evaluator: Evaluator::new().with_max_call_depth(max_call_depth),
        }
    }

    /// Session whose evaluator stops at `max_depth` nested evaluations
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            environment: Environment::root(),
            evaluator: Evaluator::new().with_max_depth(max_depth),
        }
    }

    /// Parse `source` as a program and evaluate it in the session environment
    pub fn evaluate(&mut self, source: &str) -> Result<Value, TestHarnessError> {
        let program = parse_program(source)?;
        let value = self.evaluator.evaluate(&program, &self.environment)?;
        Ok(value)
    }

    /// Execute code and assert it evaluates to a specific number
    pub fn assert_evaluates_to_number(
        &mut self,
        source: &str,
        expected: f64,
    ) -> Result<(), TestHarnessError> {
        let result = self.evaluate(source)?;

        match result {
            Value::Number(value) if value == expected => Ok(()),
            Value::Number(value) => Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual: value.to_string(),
            }),
            _ => Err(TestHarnessError::TypeError {
                expected_type: "Number".to_string(),
                actual_type: result.type_name().to_string(),
            }),
        }
    }

    /// Execute code and assert it evaluates to a specific boolean
    pub fn assert_evaluates_to_boolean(
        &mut self,
        source: &str,
        expected: bool,
    ) -> Result<(), TestHarnessError> {
        let result = self.evaluate(source)?;

        match result {
            Value::Boolean(value) if value == expected => Ok(()),
            Value::Boolean(value) => Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual: value.to_string(),
            }),
            _ => Err(TestHarnessError::TypeError {
                expected_type: "Boolean".to_string(),
                actual_type: result.type_name().to_string(),
            }),
        }
    }

    pub fn assert_evaluates_to_null(&mut self, source: &str) -> Result<(), TestHarnessError> {
        let result = self.evaluate(source)?;

        if result.is_null() {
            Ok(())
        } else {
            Err(TestHarnessError::TypeError {
                expected_type: "Null".to_string(),
                actual_type: result.type_name().to_string(),
            })
        }
    }

    /// Execute code and compare against any value
    pub fn assert_evaluates_to_value(
        &mut self,
        source: &str,
        expected: Value,
    ) -> Result<(), TestHarnessError> {
        let result = self.evaluate(source)?;

        if result == expected {
            Ok(())
        } else {
            Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual: result.to_string(),
            })
        }
    }

    pub fn define_variable(&mut self, name: &str, value: Value) -> Result<(), TestHarnessError> {
        self.environment.declare(name, value, false).map_err(|_| {
            TestHarnessError::AssertionFailed {
                expected: format!("'{name}' to be undeclared"),
                actual: "an existing declaration".to_string(),
            }
        })?;
        Ok(())
    }

    pub fn get_variable(&self, name: &str) -> Result<Value, TestHarnessError> {
        self.environment
            .get(name)
            .map_err(|_| TestHarnessError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// Drop every declaration and start over from a fresh root scope
    pub fn reset(&mut self) {
        self.environment = Environment::root();
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}
