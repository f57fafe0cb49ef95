//! Chained lexical scopes for the Simpl interpreter
//!
//! An `Environment` is a cheap handle onto one scope. Scopes link to their
//! parent, so a function value can keep its declaring scope alive and every
//! call opens a fresh child beneath it.

use crate::value::Value;
use miette::Diagnostic;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised by scope operations
#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("Variable '{name}' is already declared in this scope")]
    #[diagnostic(
        code(simpl::runtime::duplicate_declaration),
        help("Assign to the existing variable instead, or pick another name")
    )]
    DuplicateDeclaration { name: String },

    #[error("Undefined variable: {name}")]
    #[diagnostic(
        code(simpl::runtime::undefined_variable),
        help("Make sure the variable is declared before use")
    )]
    UndefinedVariable { name: String },

    #[error("Cannot reassign constant '{name}'")]
    #[diagnostic(
        code(simpl::runtime::constant_reassignment),
        help("Declare the variable with 'let' if it needs to change")
    )]
    ConstantReassignment { name: String },
}

impl EnvironmentError {
    /// The variable name the error is about
    pub fn name(&self) -> &str {
        match self {
            EnvironmentError::DuplicateDeclaration { name }
            | EnvironmentError::UndefinedVariable { name }
            | EnvironmentError::ConstantReassignment { name } => name,
        }
    }
}

#[derive(Debug)]
struct Binding {
    value: Value,
    constant: bool,
}

struct Scope {
    parent: Option<Environment>,
    bindings: HashMap<String, Binding>,
}

/// Shared handle onto a single scope in the chain
#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

impl Environment {
    /// Create a scope seeded with the constants `true` and `false`
    pub fn new(parent: Option<&Environment>) -> Self {
        let bindings = [("true", true), ("false", false)]
            .into_iter()
            .map(|(name, value)| {
                let binding = Binding {
                    value: Value::Boolean(value),
                    constant: true,
                };
                (name.to_string(), binding)
            })
            .collect();

        Self {
            inner: Rc::new(RefCell::new(Scope {
                parent: parent.cloned(),
                bindings,
            })),
        }
    }

    pub fn root() -> Self {
        Self::new(None)
    }

    /// Open a child scope beneath this one
    pub fn child(&self) -> Self {
        Self::new(Some(self))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.inner.borrow().parent.clone()
    }

    /// Declare `name` in this scope only; parent scopes are not consulted
    pub fn declare(
        &self,
        name: &str,
        value: Value,
        constant: bool,
    ) -> Result<Value, EnvironmentError> {
        let mut scope = self.inner.borrow_mut();
        if scope.bindings.contains_key(name) {
            return Err(EnvironmentError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }

        log::trace!("declare {name} (constant: {constant})");
        scope.bindings.insert(
            name.to_string(),
            Binding {
                value: value.clone(),
                constant,
            },
        );
        Ok(value)
    }

    /// Find the nearest scope, starting here, that binds `name`
    pub fn resolve(&self, name: &str) -> Result<Environment, EnvironmentError> {
        let mut current = self.clone();
        loop {
            if current.contains(name) {
                return Ok(current);
            }
            let parent = current.parent();
            match parent {
                Some(parent) => current = parent,
                None => {
                    return Err(EnvironmentError::UndefinedVariable {
                        name: name.to_string(),
                    });
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<Value, EnvironmentError> {
        let scope = self.resolve(name)?;
        let inner = scope.inner.borrow();
        inner
            .bindings
            .get(name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| EnvironmentError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Overwrite an existing binding; the new binding is never constant
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, EnvironmentError> {
        let scope = self.resolve(name)?;
        let mut inner = scope.inner.borrow_mut();
        match inner.bindings.get_mut(name) {
            Some(binding) if binding.constant => Err(EnvironmentError::ConstantReassignment {
                name: name.to_string(),
            }),
            Some(binding) => {
                binding.value = value.clone();
                binding.constant = false;
                Ok(value)
            }
            None => Err(EnvironmentError::UndefinedVariable {
                name: name.to_string(),
            }),
        }
    }

    /// Whether the binding `name` resolves to is constant
    pub fn is_constant(&self, name: &str) -> Result<bool, EnvironmentError> {
        let scope = self.resolve(name)?;
        let inner = scope.inner.borrow();
        Ok(inner
            .bindings
            .get(name)
            .is_some_and(|binding| binding.constant))
    }

    /// Whether this scope itself binds `name`
    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().bindings.contains_key(name)
    }

    /// Names bound in this scope, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of scopes from here to the root, inclusive
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(scope) = current {
            depth += 1;
            current = scope.parent();
        }
        depth
    }

    /// Whether both handles point at the same scope
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &self.names())
            .finish()
    }
}
