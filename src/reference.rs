//! Self reference: descriptors that forward to a descriptor which does not
//! exist yet when they are created.
//!
//! Two forms are provided. [`Deferred`] is a single-assignment cell: hand out
//! [`Deferred::reference`] while building a tree, then [`Deferred::bind`] the
//! finished tree. [`reference_of`] wraps a resolver closure and suits
//! `lazy_static` globals that mention themselves.
//!
//! ```
//! use typeshape::{array_of, number_type, shape_of, Deferred};
//! use serde_json::json;
//!
//! let node = Deferred::new("Node");
//! let shape = shape_of([
//!     ("value", number_type()),
//!     ("children", array_of(node.reference())),
//! ]);
//! let tree = node.bind(shape);
//! assert!(tree.is_member(&json!({"value": 1, "children": [{"value": 2, "children": []}]})));
//! assert_eq!(tree.name(), "{value: number, children: Array<Node>}");
//! ```
//!
//! Termination relies on the data being finite; the descriptor graph may be
//! cyclic.
//!
//! Labels become names, so a label should be an identifier for the name to
//! parse back as notation.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::warn;

use crate::construct::is_identifier;
use crate::descriptor::{Descriptor, Slot, Type};

// ------------- Deferred -------------

type Cell = Arc<OnceLock<Type>>;

/// A descriptor to be supplied later.
///
/// References own their target, so any part of a bound tree keeps the whole
/// tree usable. A tree that refers to itself is a reference cycle and is
/// never freed; build recursive types once and share them.
pub struct Deferred {
    label: String,
    cell: Cell,
}

impl Deferred {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if !is_identifier(&label) {
            warn!(%label, "reference label is not an identifier, its name will not parse back");
        }
        Self {
            label,
            cell: Arc::new(OnceLock::new()),
        }
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    /// A descriptor forwarding to whatever gets bound to this cell.
    pub fn reference(&self) -> Type {
        Type::new(Reference {
            label: self.label.clone(),
            cell: Arc::clone(&self.cell),
        })
    }
    /// Assigns the cell and hands `target` back.
    pub fn bind(self, target: Type) -> Type {
        // the cell is private to this value and `bind` consumes it, so it is unset here
        let _ = self.cell.set(target.clone());
        target
    }
}
impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("label", &self.label)
            .field("bound", &self.cell.get().is_some())
            .finish()
    }
}

struct Reference {
    label: String,
    cell: Cell,
}

impl Reference {
    fn target(&self) -> Option<&Type> {
        self.cell.get()
    }
}
impl fmt::Debug for Reference {
    // never print the target, it may contain this reference
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reference")
            .field("label", &self.label)
            .field("resolved", &self.target().is_some())
            .finish()
    }
}

impl Descriptor for Reference {
    fn name(&self) -> String {
        self.label.clone()
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        self.target().is_some_and(|t| t.admits(slot))
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        self.target().is_some_and(|t| t.equates(a, b))
    }
}

// ------------- Resolver -------------

type Resolver = Box<dyn Fn() -> Type + Send + Sync>;

struct Resolved {
    label: String,
    resolve: Resolver,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Resolved").field("label", &self.label).finish()
    }
}

impl Descriptor for Resolved {
    fn name(&self) -> String {
        self.label.clone()
    }
    fn admits(&self, slot: Slot<'_>) -> bool {
        (self.resolve)().admits(slot)
    }
    fn equates(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        (self.resolve)().equates(a, b)
    }
}

/// A descriptor that calls `resolve` on every use and forwards to the
/// result. `resolve` must be cheap and always return the same descriptor.
pub fn reference_of<F>(label: impl Into<String>, resolve: F) -> Type
where
    F: Fn() -> Type + Send + Sync + 'static,
{
    let label = label.into();
    if !is_identifier(&label) {
        warn!(%label, "reference label is not an identifier, its name will not parse back");
    }
    Type::new(Resolved {
        label,
        resolve: Box::new(resolve),
    })
}
