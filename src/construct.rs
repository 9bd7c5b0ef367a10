//! Combinators: descriptors built by wrapping one or more child descriptors.
//!
//! Every combinator owns its children as [`Type`] handles and defines
//! `name`, `admits` and `equates` purely in terms of the children. None of
//! them accept `null` or an absent value on their own; that is what
//! [`nullable`] and [`optional`] are for.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::descriptor::{Descriptor, Precedence, Slot, Type};

lazy_static! {
    // shape keys matching this are written bare, anything else is quoted
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

// ------------- Nullable -------------
#[derive(Debug, Clone)]
pub struct Nullable {
    inner: Type,
}

impl Descriptor for Nullable {
    fn name(&self) -> String {
        format!("{}?", self.inner.embedded_name(Precedence::Atom))
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        matches!(slot, Some(Value::Null)) || self.inner.admits(slot)
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::Null), Some(Value::Null)) => true,
            _ => self.inner.equates(a, b),
        }
    }
}

// ------------- Optional -------------
#[derive(Debug, Clone)]
pub struct Optional {
    inner: Type,
}

impl Descriptor for Optional {
    fn name(&self) -> String {
        format!("Optional<{}>", self.inner.name())
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        slot.is_none() || self.inner.admits(slot)
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (None, None) => true,
            _ => self.inner.equates(a, b),
        }
    }
}

// ------------- Union -------------

/// Accepts a value matching either child.
#[derive(Debug, Clone)]
pub struct Union {
    left: Type,
    right: Type,
}

impl Descriptor for Union {
    fn name(&self) -> String {
        format!(
            "{} | {}",
            self.left.embedded_name(Precedence::Union),
            self.right.embedded_name(Precedence::Union)
        )
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        self.left.admits(slot) || self.right.admits(slot)
    }
    // Only a branch that holds both values may decide. Members of different
    // branches are never equal.
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        if self.left.admits(a) && self.left.admits(b) {
            self.left.equates(a, b)
        } else if self.right.admits(a) && self.right.admits(b) {
            self.right.equates(a, b)
        } else {
            false
        }
    }
    fn precedence(&self) -> Precedence {
        Precedence::Union
    }
}

// ------------- Intersection -------------

/// Accepts a value matching both children, typically two shapes merged
/// into one structural type.
#[derive(Debug, Clone)]
pub struct Intersection {
    left: Type,
    right: Type,
}

impl Descriptor for Intersection {
    fn name(&self) -> String {
        format!(
            "{} & {}",
            self.left.embedded_name(Precedence::Intersection),
            self.right.embedded_name(Precedence::Intersection)
        )
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        self.left.admits(slot) && self.right.admits(slot)
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        self.left.equates(a, b) && self.right.equates(a, b)
    }
    fn precedence(&self) -> Precedence {
        Precedence::Intersection
    }
}

// ------------- Array -------------
#[derive(Debug, Clone)]
pub struct Array {
    element: Type,
}

impl Descriptor for Array {
    fn name(&self) -> String {
        format!("Array<{}>", self.element.name())
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        match slot {
            Some(Value::Array(items)) => items.iter().all(|item| self.element.is_member(item)),
            _ => false,
        }
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::Array(xs)), Some(Value::Array(ys))) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.element.equals(x, y))
            }
            _ => false,
        }
    }
}

// ------------- Map -------------

/// A keyed map with string keys and values of one type.
#[derive(Debug, Clone)]
pub struct Map {
    value: Type,
}

impl Descriptor for Map {
    fn name(&self) -> String {
        format!("Map<{}>", self.value.name())
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        match slot {
            Some(Value::Object(entries)) => entries.values().all(|value| self.value.is_member(value)),
            _ => false,
        }
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::Object(xs)), Some(Value::Object(ys))) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .all(|(key, x)| self.value.equates(Some(x), ys.get(key)))
            }
            _ => false,
        }
    }
}

// ------------- Tuple -------------

/// Fixed positions, each with its own type. Elements past the declared
/// arity are ignored; missing ones are absent.
#[derive(Debug, Clone)]
pub struct Tuple {
    elements: Vec<Type>,
}

impl Tuple {
    pub fn elements(&self) -> &[Type] {
        &self.elements
    }
}

impl Descriptor for Tuple {
    fn name(&self) -> String {
        let names: Vec<String> = self.elements.iter().map(|t| t.name()).collect();
        format!("[{}]", names.join(", "))
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        match slot {
            Some(Value::Array(items)) => self
                .elements
                .iter()
                .enumerate()
                .all(|(i, t)| t.admits(items.get(i))),
            _ => false,
        }
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::Array(xs)), Some(Value::Array(ys))) => self
                .elements
                .iter()
                .enumerate()
                .all(|(i, t)| t.equates(xs.get(i), ys.get(i))),
            _ => false,
        }
    }
}

// ------------- Shape -------------

/// A structural record: declared keys are mandatory unless their type is
/// optional, undeclared keys are ignored.
#[derive(Debug, Clone)]
pub struct Shape {
    fields: Vec<(String, Type)>,
}

impl Shape {
    pub fn fields(&self) -> &[(String, Type)] {
        &self.fields
    }
    pub fn field(&self, key: &str) -> Option<&Type> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, t)| t)
    }
}

/// Whether `text` can be written bare in notation, as a shape key or a
/// type name.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

impl Descriptor for Shape {
    fn name(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(key, t)| format!("{}: {}", render_key(key), t.name()))
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        match slot {
            Some(Value::Object(entries)) => self
                .fields
                .iter()
                .all(|(key, t)| t.admits(entries.get(key))),
            _ => false,
        }
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Some(Value::Object(xs)), Some(Value::Object(ys))) => self
                .fields
                .iter()
                .all(|(key, t)| t.equates(xs.get(key), ys.get(key))),
            _ => false,
        }
    }
}

// ------------- Factories -------------

pub fn nullable(inner: Type) -> Type {
    Type::new(Nullable { inner })
}
pub fn optional(inner: Type) -> Type {
    Type::new(Optional { inner })
}
pub fn union_of(left: Type, right: Type) -> Type {
    Type::new(Union { left, right })
}
pub fn intersection_of(left: Type, right: Type) -> Type {
    Type::new(Intersection { left, right })
}
/// Folds any number of types into nested unions from the right.
/// Returns `None` when there is nothing to fold.
pub fn union_of_all<I: IntoIterator<Item = Type>>(types: I) -> Option<Type> {
    let types: Vec<Type> = types.into_iter().collect();
    types.into_iter().rev().reduce(|right, left| union_of(left, right))
}
pub fn intersection_of_all<I: IntoIterator<Item = Type>>(types: I) -> Option<Type> {
    let types: Vec<Type> = types.into_iter().collect();
    types
        .into_iter()
        .rev()
        .reduce(|right, left| intersection_of(left, right))
}
pub fn array_of(element: Type) -> Type {
    Type::new(Array { element })
}
pub fn map_of(value: Type) -> Type {
    Type::new(Map { value })
}
pub fn tuple_of(elements: Vec<Type>) -> Type {
    Type::new(Tuple { elements })
}
/// Builds a shape in declaration order. A repeated key keeps its first
/// position and takes the last type given for it.
pub fn shape_of<K, I>(fields: I) -> Type
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Type)>,
{
    let mut declared: Vec<(String, Type)> = Vec::new();
    for (key, t) in fields {
        let key = key.into();
        match declared.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = t,
            None => declared.push((key, t)),
        }
    }
    Type::new(Shape { fields: declared })
}
