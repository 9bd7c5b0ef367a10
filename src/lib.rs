//! Typeshape – composable runtime type descriptors for untrusted JSON.
//!
//! Typeshape lets a program declare, as ordinary values, the shape it
//! expects data to have when it arrives from somewhere the compiler cannot
//! see: parsed JSON, network payloads, configuration files. The data is then
//! checked (or cast) at the boundary, producing either the value or a
//! [`ValueError`] describing what was rejected.
//!
//! Every descriptor offers three operations:
//! * `name()` – a readable rendering such as `Array<string>`.
//! * `is_member(value)` – a total, deterministic membership test.
//! * `equals(a, b)` – structural equality of two members, delegated to children.
//!
//! ## Modules
//! * [`descriptor`] – The [`Descriptor`] trait and the shared [`Type`] handle.
//! * [`datatype`] – Leaf descriptors: `string`, `number`, `boolean`, literals and `defined`.
//! * [`construct`] – Combinators: nullable, optional, union, intersection,
//!   array, map, tuple and shape.
//! * [`reference`] – Self reference for recursive and forward-declared types.
//! * [`cast`] – [`from_value`] and [`from_serialized_text`], the validation boundary.
//! * [`notation`] – Parses the text produced by `name()` back into descriptors.
//! * [`registry`] – Named, possibly mutually recursive definitions.
//! * [`settings`] – Configuration read with the `config` crate.
//!
//! ## Strictness
//! Containers never accept `null` or absent values unless a child is wrapped
//! with [`nullable`] or [`optional`]. Nothing is coerced: `"1"` is not a number.
//! Absent (a missing tuple element or record key) and `null` are different
//! things; descriptors see values through an `Option<&Value>` slot where
//! `None` is absent.
//!
//! ## Quick Start
//! ```
//! use typeshape::{array_of, from_serialized_text, number_type, optional, shape_of, string_type};
//! use serde_json::json;
//!
//! let user = shape_of([
//!     ("id", number_type()),
//!     ("name", string_type()),
//!     ("tags", optional(array_of(string_type()))),
//! ]);
//! assert_eq!(user.name(), "{id: number, name: string, tags: Optional<Array<string>>}");
//!
//! let value = from_serialized_text(r#"{"id": 1, "name": "Ada"}"#, &user).unwrap();
//! assert_eq!(value, json!({"id": 1, "name": "Ada"}));
//!
//! let err = from_serialized_text(r#"{"id": "1", "name": "Ada"}"#, &user).unwrap_err();
//! assert_eq!(err.expected(), Some(user.name().as_str()));
//! ```
//!
//! ## Concurrency
//! Descriptors are immutable and `Send + Sync`; one tree can serve any number
//! of threads. Validation recurses over the data, so its depth is bounded by
//! the depth of the input; guarding against pathological nesting is up to the
//! caller (JSON text parsed through [`from_serialized_text`] is already limited
//! by `serde_json`'s recursion limit).

pub mod cast;
pub mod construct;
pub mod datatype;
pub mod descriptor;
pub mod error;
pub mod notation;
pub mod reference;
pub mod registry;
pub mod settings;

pub use cast::{from_serialized_text, from_value, from_value_as};
pub use construct::{
    array_of, intersection_of, intersection_of_all, map_of, nullable, optional, shape_of, tuple_of,
    union_of, union_of_all,
};
pub use datatype::{boolean_type, defined_type, literal, null_type, number_type, string_type};
pub use descriptor::{Descriptor, Slot, Type};
pub use error::{Result, TypeshapeError, ValueError, ValueErrorKind};
pub use reference::{reference_of, Deferred};
pub use registry::Registry;
