//! Parser for the descriptor notation, the text a descriptor's `name()`
//! produces. Grammar details live in `notation.pest`.
//!
//! ```
//! use typeshape::notation;
//! use serde_json::json;
//!
//! let t = notation::parse("{id: number, tags: Array<string>, note: Optional<string?>}").unwrap();
//! assert!(t.is_member(&json!({"id": 7, "tags": ["a"], "extra": true})));
//! assert!(!t.is_member(&json!({"id": 7, "tags": [1]})));
//! ```
//!
//! Identifiers that are not built in are handed to a [`Resolve`]
//! implementation, which is how named and recursive types are wired up
//! (see [`crate::registry::Registry`]).

use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;
use serde_json::Value;

use crate::construct::{
    array_of, intersection_of_all, map_of, nullable, optional, shape_of, tuple_of, union_of_all,
};
use crate::datatype::{boolean_type, defined_type, literal, null_type, number_type, string_type};
use crate::descriptor::Type;
use crate::error::{Result, TypeshapeError};

#[derive(Parser)]
#[grammar = "notation.pest"]
struct NotationParser;

/// Supplies descriptors for identifiers that are not built in.
pub trait Resolve {
    /// `guarded` is true when the identifier sits inside an array, map,
    /// tuple or shape, i.e. when recursing through it consumes data.
    fn resolve(&mut self, name: &str, guarded: bool) -> Result<Type>;
}

/// Resolves nothing: every identifier is unknown.
pub struct NoNames;

impl Resolve for NoNames {
    fn resolve(&mut self, name: &str, _guarded: bool) -> Result<Type> {
        Err(TypeshapeError::UnknownType(name.to_string()))
    }
}

/// Parses notation that only uses built-in types.
pub fn parse(text: &str) -> Result<Type> {
    parse_with(text, &mut NoNames)
}

pub fn parse_with<R: Resolve + ?Sized>(text: &str, names: &mut R) -> Result<Type> {
    let mut pairs = NotationParser::parse(Rule::notation, text).map_err(notation_error)?;
    let root = pairs
        .next()
        .and_then(|notation| notation.into_inner().next())
        .ok_or_else(|| malformed("empty notation"))?;
    build(root, names, false)
}

fn notation_error(e: pest::error::Error<Rule>) -> TypeshapeError {
    let (line, col) = match e.line_col {
        LineColLocation::Pos((l, c)) => (l, c),
        LineColLocation::Span((l, c), _) => (l, c),
    };
    TypeshapeError::Notation {
        message: e.variant.message().into_owned(),
        line: Some(line),
        col: Some(col),
    }
}

fn malformed(what: &str) -> TypeshapeError {
    TypeshapeError::Notation { message: format!("malformed {what}"), line: None, col: None }
}

fn build<R: Resolve + ?Sized>(pair: Pair<Rule>, names: &mut R, guarded: bool) -> Result<Type> {
    match pair.as_rule() {
        Rule::union => {
            let members = build_all(pair, names, guarded)?;
            union_of_all(members).ok_or_else(|| malformed("union"))
        }
        Rule::intersection => {
            let members = build_all(pair, names, guarded)?;
            intersection_of_all(members).ok_or_else(|| malformed("intersection"))
        }
        Rule::postfix => {
            let mut inner = pair.into_inner();
            let primary = inner.next().ok_or_else(|| malformed("postfix"))?;
            let mut t = build(primary, names, guarded)?;
            // every remaining pair is a nullable mark
            for _ in inner {
                t = nullable(t);
            }
            Ok(t)
        }
        Rule::array => Ok(array_of(build_single(pair, names, true)?)),
        Rule::map => Ok(map_of(build_single(pair, names, true)?)),
        Rule::optional => Ok(optional(build_single(pair, names, guarded)?)),
        Rule::tuple => Ok(tuple_of(build_all(pair, names, true)?)),
        Rule::shape => {
            let mut fields = Vec::new();
            for field in pair.into_inner() {
                let mut parts = field.into_inner();
                let key = parts.next().ok_or_else(|| malformed("field key"))?;
                let key = match key.as_rule() {
                    Rule::string => decode_string(key.as_str())?,
                    _ => key.as_str().to_string(),
                };
                let t = parts.next().ok_or_else(|| malformed("field type"))?;
                fields.push((key, build(t, names, true)?));
            }
            Ok(shape_of(fields))
        }
        Rule::string => Ok(literal(decode_string(pair.as_str())?)),
        Rule::number => {
            let number: Value = serde_json::from_str(pair.as_str()).map_err(|e| {
                TypeshapeError::Notation {
                    message: format!("invalid number {}: {e}", pair.as_str()),
                    line: Some(pair.line_col().0),
                    col: Some(pair.line_col().1),
                }
            })?;
            Ok(literal(number))
        }
        Rule::boolean_literal => Ok(literal(pair.as_str() == "true")),
        Rule::null_literal => Ok(null_type()),
        Rule::primitive => match pair.as_str() {
            "string" => Ok(string_type()),
            "number" => Ok(number_type()),
            "boolean" => Ok(boolean_type()),
            "defined" => Ok(defined_type()),
            other => Err(malformed(other)),
        },
        Rule::identifier => names.resolve(pair.as_str(), guarded),
        other => Err(malformed(&format!("{other:?}"))),
    }
}

fn build_all<R: Resolve + ?Sized>(
    pair: Pair<Rule>,
    names: &mut R,
    guarded: bool,
) -> Result<Vec<Type>> {
    pair.into_inner().map(|p| build(p, names, guarded)).collect()
}

fn build_single<R: Resolve + ?Sized>(
    pair: Pair<Rule>,
    names: &mut R,
    guarded: bool,
) -> Result<Type> {
    let inner = pair.into_inner().next().ok_or_else(|| malformed("type argument"))?;
    build(inner, names, guarded)
}

fn decode_string(quoted: &str) -> Result<String> {
    serde_json::from_str(quoted).map_err(|e| TypeshapeError::Notation {
        message: format!("invalid string {quoted}: {e}"),
        line: None,
        col: None,
    })
}
