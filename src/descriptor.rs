//! The capability contract shared by every type descriptor.
//!
//! A descriptor answers three questions about values arriving as
//! [`serde_json::Value`]: what it is called, whether a value belongs to it,
//! and whether two of its members are structurally equal.
//!
//! Values are inspected through a *slot*, an `Option<&Value>`, so that a
//! missing tuple element or record key ("absent") can be told apart from an
//! explicit JSON `null`. Most callers never see slots and use
//! [`Descriptor::is_member`] and [`Descriptor::equals`] instead.

// used to print out readable names
use std::fmt;
// descriptors are shared between composites and threads
use std::ops::Deref;
use std::sync::Arc;

use serde_json::{Number, Value};

/// A possibly absent value: `None` is absent, `Some(&Value::Null)` is null.
pub type Slot<'a> = Option<&'a Value>;

/// How tightly a descriptor's name binds when it is embedded in another name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Union,
    Intersection,
    Atom,
}

pub trait Descriptor: fmt::Debug + Send + Sync {
    /// Human readable name, fixed at construction.
    fn name(&self) -> String;
    /// Membership over a slot. Must be total.
    fn admits(&self, slot: Slot<'_>) -> bool;
    /// Structural equality of two slots that are both members.
    /// Non-members compare unequal unless a child descriptor says otherwise.
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool;

    fn precedence(&self) -> Precedence {
        Precedence::Atom
    }
    fn is_member(&self, value: &Value) -> bool {
        self.admits(Some(value))
    }
    fn equals(&self, a: &Value, b: &Value) -> bool {
        self.equates(Some(a), Some(b))
    }
}

/// Shared, immutable handle to a descriptor.
///
/// Cloning a `Type` is cheap and every clone refers to the same descriptor,
/// so composites can hold their children by value without copying trees.
#[derive(Clone)]
pub struct Type(Arc<dyn Descriptor>);

impl Type {
    pub fn new<D: Descriptor + 'static>(descriptor: D) -> Self {
        Self(Arc::new(descriptor))
    }
    /// Whether both handles point at the same descriptor.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
    /// The name of this type as it should appear inside a composite whose
    /// own binding strength is `outer`.
    pub(crate) fn embedded_name(&self, outer: Precedence) -> String {
        if self.precedence() < outer {
            format!("({})", self.name())
        } else {
            self.name()
        }
    }
}
impl Deref for Type {
    type Target = dyn Descriptor;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.name())
    }
}
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Type").field(&self.0).finish()
    }
}

// ------------- Value equality -------------

/// JSON number equality with `===` semantics: integers compare exactly,
/// anything else compares as IEEE-754 doubles, so `-0.0` equals `0`.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Deep structural equality of two JSON values. Object key order is ignored.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}
