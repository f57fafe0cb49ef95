//! Acceptance tests for the Simpl interpreter
//!
//! Each module drives the parser → evaluator pipeline through
//! `InterpreterSession` or the public `Evaluator` API.

pub mod test_acceptance_functions;
