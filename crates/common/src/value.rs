//! Runtime value representation for the Refract engine.
//!
//! Values are what live on the operand stack, in constant pools, and in
//! local slots during execution.

use std::fmt;

use crate::function::Function;

/// Runtime value representation.
///
/// This enum is used by the engine to represent values on the operand
/// stack, in local slot storage, and in constant pools.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// IEEE 754 64-bit float.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Owned string.
    Str(String),
    /// The absent value. Distinct from an unpopulated slot: a slot holding
    /// `Value::None` has been populated with the absent value.
    None,
    /// Ordered product of values.
    Tuple(Vec<Value>),
    /// A callable, native or interpreted.
    Function(Function),
}

// Float values compare bitwise via to_bits(). This keeps Value usable as
// an Eq type; the engine itself never branches on float identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Human-readable name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::None => "none",
            Value::Tuple(_) => "tuple",
            Value::Function(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::None => write!(f, "None"),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Function(func) => write!(f, "<function {}>", func.qualname()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_int() {
        assert_eq!(Value::Int(42), Value::Int(42));
        assert_ne!(Value::Int(42), Value::Int(43));
    }

    #[test]
    fn equality_float_bitwise() {
        assert_eq!(Value::Float(3.14), Value::Float(3.14));
        let nan = f64::NAN;
        assert_eq!(Value::Float(nan), Value::Float(nan));
        // +0.0 and -0.0 have different bit patterns
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn equality_different_types() {
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::None, Value::Int(0));
    }

    #[test]
    fn equality_tuple() {
        let a = Value::Tuple(vec![Value::Int(1), Value::Bool(true)]);
        let b = Value::Tuple(vec![Value::Int(1), Value::Bool(true)]);
        let c = Value::Tuple(vec![Value::Int(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_function_is_by_identity() {
        let f = Function::native("id", |args| Ok(args[0].clone()));
        let g = Function::native("id", |args| Ok(args[0].clone()));
        assert_eq!(Value::Function(f.clone()), Value::Function(f.clone()));
        assert_ne!(Value::Function(f), Value::Function(g));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::Str("hi".into()).to_string(), "\"hi\"");
        assert_eq!(
            Value::Tuple(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "(1, 2)"
        );
        assert_eq!(Value::Tuple(vec![Value::Int(1)]).to_string(), "(1,)");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(0).type_name(), "int");
        assert_eq!(Value::Tuple(vec![]).type_name(), "tuple");
        assert_eq!(Value::None.type_name(), "none");
    }
}
