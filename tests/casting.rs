use serde::Deserialize;
use serde_json::json;
use typeshape::{
    array_of, defined_type, from_serialized_text, from_value, from_value_as, number_type, optional,
    shape_of, string_type, Type, ValueErrorKind,
};

fn strings() -> Type {
    array_of(string_type())
}

#[test]
fn accepted_values_come_back_unchanged() {
    let value = from_value(json!(["a", "b"]), &strings()).expect("cast ok");
    assert_eq!(value, json!(["a", "b"]));
}

#[test]
fn membership_failure_carries_value_and_name() {
    let err = from_value(json!(["a", 1]), &strings()).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::Mismatch);
    assert_eq!(err.expected(), Some("Array<string>"));
    assert_eq!(err.value(), &json!(["a", 1]));
    assert_eq!(err.to_string(), "value does not match Array<string>");
}

#[test]
fn parse_failure_is_the_same_error_type() {
    let parse = from_serialized_text("[", &strings()).unwrap_err();
    let mismatch = from_serialized_text("[1]", &strings()).unwrap_err();
    assert_eq!(parse.kind(), ValueErrorKind::Parse);
    assert_eq!(parse.message(), "invalid serialized input");
    assert_eq!(parse.value(), &json!("["));
    assert_eq!(mismatch.kind(), ValueErrorKind::Mismatch);
    assert_ne!(parse.message(), mismatch.message());
}

#[test]
fn only_standard_json_is_accepted() {
    for text in ["[\"a\",]", "// c\n[]", "['a']", "[\"a\"] x", ""] {
        let err = from_serialized_text(text, &strings()).unwrap_err();
        assert_eq!(err.kind(), ValueErrorKind::Parse, "{text:?}");
    }
    assert!(from_serialized_text(" [ \"a\" ] \n", &strings()).is_ok());
}

fn nested(depth: usize) -> String {
    format!("{}{}", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn deep_nesting_has_its_own_message() {
    assert!(from_serialized_text(&nested(100), &defined_type()).is_ok());
    let err = from_serialized_text(&nested(200), &defined_type()).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::Parse);
    assert_eq!(err.message(), "invalid serialized input: nested too deeply");
    assert_eq!(err.value(), &serde_json::Value::String(nested(200)));
    let malformed = from_serialized_text("[[]", &defined_type()).unwrap_err();
    assert_eq!(malformed.message(), "invalid serialized input");
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    #[serde(default)]
    nick: Option<String>,
}

fn user() -> Type {
    shape_of([
        ("id", number_type()),
        ("name", string_type()),
        ("nick", optional(string_type())),
    ])
}

#[test]
fn typed_cast() {
    let u: User = from_value_as(json!({"id": 7, "name": "Ada", "extra": 1}), &user()).unwrap();
    assert_eq!(u, User { id: 7, name: "Ada".into(), nick: None });
}

#[test]
fn typed_cast_reports_membership_first() {
    let err = from_value_as::<User>(json!({"id": "7", "name": "Ada"}), &user()).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::Mismatch);
    let err = from_value_as::<User>(json!({"id": 7.5, "name": "Ada"}), &user()).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::Decode);
    assert_eq!(err.value(), &json!({"id": 7.5, "name": "Ada"}));
}

#[test]
fn errors_convert_into_crate_errors() {
    fn boundary(text: &str) -> typeshape::Result<serde_json::Value> {
        Ok(from_serialized_text(text, &strings())?)
    }
    let err = boundary("{}").unwrap_err();
    assert!(matches!(err, typeshape::TypeshapeError::Value(ref e) if e.kind() == ValueErrorKind::Mismatch));
    assert_eq!(err.to_string(), "value does not match Array<string>");
}
