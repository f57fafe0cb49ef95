//! Runtime value representation for the Simpl interpreter.
//!
//! Values are immutable once produced. Objects own their property values and
//! keep them in insertion order; functions share their declaring environment.

use crate::environment::Environment;
use indexmap::IndexMap;
use simpl_parser::Statement;
use std::fmt;
use std::rc::Rc;

/// Runtime values produced by evaluation
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    /// 64-bit floating point number
    Number(f64),
    Boolean(bool),
    String(String),
    /// Property map in insertion order
    Object(IndexMap<String, Value>),
    /// Declared function together with the scope it was declared in
    Function(Rc<FunctionValue>),
}

/// A function declaration closed over its declaring environment
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    pub closure: Environment,
}

impl FunctionValue {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

// The closure is left out: it usually contains this function again.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("body", &self.body.len())
            .finish_non_exhaustive()
    }
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Build an object from `(key, value)` pairs, later keys overwriting earlier ones
    pub fn object<K: Into<String>>(properties: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(
            properties
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
            Value::Function(_) => "Function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// Look up a property on an object value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|properties| properties.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Functions are equal only to themselves
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "{value:?}"),
            Value::Object(properties) if properties.is_empty() => write!(f, "{{}}"),
            Value::Object(properties) => {
                write!(f, "{{ ")?;
                for (index, (key, value)) in properties.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, " }}")
            }
            Value::Function(function) => {
                write!(f, "fn {}({})", function.name, function.parameters.join(", "))
            }
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
