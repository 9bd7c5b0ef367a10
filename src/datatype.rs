// used to print out readable forms of a data type
use std::fmt;

use lazy_static::lazy_static;
use serde_json::Value;

use crate::descriptor::{numbers_equal, values_equal, Descriptor, Slot, Type};

// ------------- Primitives -------------

/// The three scalar kinds of JSON that have a descriptor of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

impl Primitive {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
    fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Primitive::String, Value::String(_))
                | (Primitive::Number, Value::Number(_))
                | (Primitive::Boolean, Value::Bool(_))
        )
    }
}
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Descriptor for Primitive {
    fn name(&self) -> String {
        self.as_str().to_string()
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        slot.is_some_and(|value| self.matches(value))
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::String(x)), Some(Value::String(y))) => {
                *self == Primitive::String && x == y
            }
            (Some(Value::Number(x)), Some(Value::Number(y))) => {
                *self == Primitive::Number && numbers_equal(x, y)
            }
            (Some(Value::Bool(x)), Some(Value::Bool(y))) => *self == Primitive::Boolean && x == y,
            _ => false,
        }
    }
}

// ------------- Literal -------------

/// Accepts exactly one value, e.g. `null` or `"on"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Descriptor for Literal {
    fn name(&self) -> String {
        self.value.to_string()
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        slot.is_some_and(|value| values_equal(&self.value, value))
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        // a singleton has one member, so two members are always equal
        self.admits(a) && self.admits(b)
    }
}

// ------------- Defined -------------

/// Anything that is present, `null` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defined;

impl Descriptor for Defined {
    fn name(&self) -> String {
        "defined".to_string()
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        slot.is_some()
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => values_equal(x, y),
            _ => false,
        }
    }
}

// ------------- Singletons -------------

lazy_static! {
    static ref STRING: Type = Type::new(Primitive::String);
    static ref NUMBER: Type = Type::new(Primitive::Number);
    static ref BOOLEAN: Type = Type::new(Primitive::Boolean);
    static ref NULL: Type = Type::new(Literal::new(Value::Null));
    static ref DEFINED: Type = Type::new(Defined);
}

pub fn string_type() -> Type {
    STRING.clone()
}
pub fn number_type() -> Type {
    NUMBER.clone()
}
pub fn boolean_type() -> Type {
    BOOLEAN.clone()
}
/// The constant `null`.
pub fn null_type() -> Type {
    NULL.clone()
}
pub fn defined_type() -> Type {
    DEFINED.clone()
}
pub fn literal(value: impl Into<Value>) -> Type {
    Type::new(Literal::new(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_equality_is_kind_specific() {
        let number = Primitive::Number;
        assert!(number.equals(&json!(2), &json!(2.0)));
        assert!(!number.equals(&json!("2"), &json!("2")));
        assert!(Primitive::String.equals(&json!("2"), &json!("2")));
        assert!(!Primitive::Boolean.equals(&json!(true), &json!(false)));
    }

    #[test]
    fn literal_names_are_json() {
        assert_eq!(literal("on").name(), "\"on\"");
        assert_eq!(literal(3).name(), "3");
        assert_eq!(literal(false).name(), "false");
        assert_eq!(null_type().name(), "null");
    }

    #[test]
    fn singletons_are_shared() {
        assert!(string_type().ptr_eq(&string_type()));
        assert!(!literal(1).ptr_eq(&literal(1)));
    }
}
