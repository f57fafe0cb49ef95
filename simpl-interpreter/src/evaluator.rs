//! Tree-walking evaluator
//!
//! Dispatches on the AST node variant and produces a `Value`, reading and
//! writing the `Environment` it is given. Evaluation is strictly left to
//! right: a binary operator's left operand, a call's callee and then its
//! arguments, an object's properties in declaration order.

use crate::environment::Environment;
use crate::error::{EvaluationError, EvaluationResult};
use crate::value::{FunctionValue, Value};
use indexmap::IndexMap;
use simpl_parser::{
    AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, Expression, ExpressionKind,
    FunctionDeclaration, MemberExpr, MemberProperty, ObjectLiteral, Program, Property, Span,
    Statement, StatementKind, UnaryExpr, UnaryOperator, VariableDeclaration,
};
use std::rc::Rc;

/// Default limit on nested function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100;

/// Default limit on nested expression evaluations and calls combined
///
/// Every level costs a few native stack frames, so this stays well below what
/// a 2 MiB thread stack can hold.
pub const DEFAULT_MAX_EVALUATION_DEPTH: usize = 256;

/// Any AST node the evaluator can be handed
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Property(&'a Property),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

impl<'a> From<&'a Property> for Node<'a> {
    fn from(property: &'a Property) -> Self {
        Node::Property(property)
    }
}

/// Evaluates AST nodes; tracks call and evaluation depth across nested calls
#[derive(Debug, Clone)]
pub struct Evaluator {
    max_call_depth: usize,
    call_depth: usize,
    max_depth: usize,
    depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            call_depth: 0,
            max_depth: DEFAULT_MAX_EVALUATION_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate any node against `env`
    pub fn evaluate<'a>(
        &mut self,
        node: impl Into<Node<'a>>,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        match node.into() {
            Node::Program(program) => self.evaluate_program(program, env),
            Node::Statement(statement) => self.evaluate_statement(statement, env),
            Node::Expression(expression) => self.evaluate_expression(expression, env),
            Node::Property(property) => Err(EvaluationError::UnsupportedNode {
                node: "Property".to_string(),
                span: property.span,
            }),
        }
    }

    /// Run every statement in order; the last value wins, an empty program is null
    pub fn evaluate_program(
        &mut self,
        program: &Program,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        self.evaluate_body(&program.body, env)
    }

    fn evaluate_body(&mut self, body: &[Statement], env: &Environment) -> EvaluationResult<Value> {
        let mut last = Value::Null;
        for statement in body {
            last = self.evaluate_statement(statement, env)?;
        }
        Ok(last)
    }

    pub fn evaluate_statement(
        &mut self,
        statement: &Statement,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        match &statement.kind {
            StatementKind::VariableDeclaration(declaration) => {
                self.evaluate_variable_declaration(declaration, statement.span, env)
            }
            StatementKind::FunctionDeclaration(declaration) => {
                self.evaluate_function_declaration(declaration, statement.span, env)
            }
            StatementKind::Expression(expression) => self.evaluate_expression(expression, env),
        }
    }

    fn evaluate_variable_declaration(
        &mut self,
        declaration: &VariableDeclaration,
        span: Span,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let name = &declaration.identifier.name;
        let value = match &declaration.value {
            Some(initializer) => self.evaluate_expression(initializer, env)?,
            None if declaration.constant => {
                return Err(EvaluationError::UninitializedConstant {
                    name: name.clone(),
                    span,
                });
            }
            None => Value::Null,
        };

        env.declare(name, value, declaration.constant)
            .map_err(|error| EvaluationError::environment(error, declaration.identifier.span))
    }

    fn evaluate_function_declaration(
        &mut self,
        declaration: &FunctionDeclaration,
        span: Span,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let function = FunctionValue {
            name: declaration.name.name.clone(),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| parameter.name.clone())
                .collect(),
            body: declaration.body.clone(),
            closure: env.clone(),
        };

        // `env` and the function now reference each other; the cycle outlives
        // the call that declared it
        log::trace!("declare fn {}/{}", function.name, function.arity());
        env.declare(
            &declaration.name.name,
            Value::Function(Rc::new(function)),
            false,
        )
        .map_err(|error| EvaluationError::environment(error, span))
    }

    pub fn evaluate_expression(
        &mut self,
        expression: &Expression,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let span = expression.span;
        self.enter(span)?;
        let result = match &expression.kind {
            ExpressionKind::NumericLiteral(literal) => Ok(Value::Number(literal.value)),
            ExpressionKind::NullLiteral => Ok(Value::Null),
            ExpressionKind::Identifier(identifier) => env
                .get(&identifier.name)
                .map_err(|error| EvaluationError::environment(error, span)),
            ExpressionKind::Binary(binary) => self.evaluate_binary(binary, env),
            ExpressionKind::Unary(unary) => self.evaluate_unary(unary, span, env),
            ExpressionKind::Assignment(assignment) => self.evaluate_assignment(assignment, env),
            ExpressionKind::ObjectLiteral(object) => self.evaluate_object(object, env),
            ExpressionKind::Member(member) => self.evaluate_member(member, span, env),
            ExpressionKind::Call(call) => self.evaluate_call(call, span, env),
        };
        self.depth -= 1;
        result
    }

    /// Step one level deeper, failing past the evaluation depth limit
    fn enter(&mut self, span: Span) -> EvaluationResult<()> {
        if self.depth >= self.max_depth {
            return Err(EvaluationError::RecursionLimitExceeded {
                limit: self.max_depth,
                span,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn evaluate_binary(
        &mut self,
        binary: &BinaryExpr,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let left = self.evaluate_expression(&binary.left, env)?;
        let right = self.evaluate_expression(&binary.right, env)?;

        let left = expect_number(&left, binary.left.span)?;
        let right = expect_number(&right, binary.right.span)?;

        // Division and remainder by zero follow IEEE 754: inf or NaN, never an error
        let result = match binary.operator {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
            BinaryOperator::Modulo => left % right,
        };
        Ok(Value::Number(result))
    }

    fn evaluate_unary(
        &mut self,
        unary: &UnaryExpr,
        span: Span,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let operand = self.evaluate_expression(&unary.operand, env)?;
        match unary.operator {
            UnaryOperator::Negate => match operand {
                Value::Number(value) => Ok(Value::Number(-value)),
                other => Err(EvaluationError::type_mismatch(
                    "Number",
                    other.type_name(),
                    span,
                )),
            },
        }
    }

    fn evaluate_assignment(
        &mut self,
        assignment: &AssignmentExpr,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let ExpressionKind::Identifier(target) = &assignment.assignee.kind else {
            return Err(EvaluationError::InvalidAssignmentTarget {
                span: assignment.assignee.span,
            });
        };

        let value = self.evaluate_expression(&assignment.value, env)?;
        env.assign(&target.name, value)
            .map_err(|error| EvaluationError::environment(error, assignment.assignee.span))
    }

    fn evaluate_object(
        &mut self,
        object: &ObjectLiteral,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let mut properties = IndexMap::with_capacity(object.properties.len());
        for property in &object.properties {
            let value = match &property.value {
                Some(value) => self.evaluate_expression(value, env)?,
                None => env
                    .get(&property.key.name)
                    .map_err(|error| EvaluationError::environment(error, property.span))?,
            };
            properties.insert(property.key.name.clone(), value);
        }
        Ok(Value::Object(properties))
    }

    fn evaluate_member(
        &mut self,
        member: &MemberExpr,
        span: Span,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let object = self.evaluate_expression(&member.object, env)?;
        let properties = match object {
            Value::Object(properties) => properties,
            other => {
                return Err(EvaluationError::type_mismatch(
                    "Object",
                    other.type_name(),
                    member.object.span,
                ));
            }
        };

        let key = match &member.property {
            MemberProperty::Named(identifier) => identifier.name.clone(),
            MemberProperty::Computed(key) => {
                let value = self.evaluate_expression(key, env)?;
                property_key(value, key.span)?
            }
        };

        properties
            .get(&key)
            .cloned()
            .ok_or(EvaluationError::PropertyNotFound {
                property: key,
                span,
            })
    }

    fn evaluate_call(
        &mut self,
        call: &CallExpr,
        span: Span,
        env: &Environment,
    ) -> EvaluationResult<Value> {
        let callee = self.evaluate_expression(&call.callee, env)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate_expression(argument, env)?);
        }

        let function = match callee {
            Value::Function(function) => function,
            other => {
                return Err(EvaluationError::NotCallable {
                    found: other.type_name().to_string(),
                    span: call.callee.span,
                });
            }
        };

        self.call_function(&function, arguments, span)
    }

    /// Run `function`'s body in a fresh scope beneath the one it was declared in
    pub fn call_function(
        &mut self,
        function: &FunctionValue,
        arguments: Vec<Value>,
        span: Span,
    ) -> EvaluationResult<Value> {
        if arguments.len() != function.arity() {
            return Err(EvaluationError::ArityMismatch {
                function: function.name.clone(),
                expected: function.arity(),
                found: arguments.len(),
                span,
            });
        }

        if self.call_depth >= self.max_call_depth {
            return Err(EvaluationError::RecursionLimitExceeded {
                limit: self.max_call_depth,
                span,
            });
        }

        log::debug!(
            "call {}({}) at depth {}",
            function.name,
            arguments.len(),
            self.call_depth + 1
        );

        let scope = function.closure.child();
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            scope
                .declare(parameter, argument, false)
                .map_err(|error| EvaluationError::environment(error, span))?;
        }

        self.enter(span)?;
        self.call_depth += 1;
        let result = self.evaluate_body(&function.body, &scope);
        self.call_depth -= 1;
        self.depth -= 1;
        result
    }
}

fn expect_number(value: &Value, span: Span) -> EvaluationResult<f64> {
    match value {
        Value::Number(number) => Ok(*number),
        other => Err(EvaluationError::type_mismatch(
            "Number",
            other.type_name(),
            span,
        )),
    }
}

/// Strings are used as-is; whole finite numbers are written in decimal
fn property_key(value: Value, span: Span) -> EvaluationResult<String> {
    match value {
        Value::String(key) => Ok(key),
        Value::Number(number) if number.is_finite() && number.fract() == 0.0 => {
            Ok(format!("{number}"))
        }
        other => Err(EvaluationError::InvalidPropertyKey {
            found: other.type_name().to_string(),
            span,
        }),
    }
}
