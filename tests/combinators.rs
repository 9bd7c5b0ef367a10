use serde_json::{json, Value};
use typeshape::{
    array_of, boolean_type, intersection_of, literal, map_of, null_type, nullable, number_type,
    optional, shape_of, string_type, tuple_of, union_of, Type,
};

fn point() -> Type {
    shape_of([("x", number_type()), ("y", number_type())])
}

// ------------- Nullable / Optional -------------

#[test]
fn nullable_adds_null_only() {
    let t = nullable(string_type());
    assert!(t.is_member(&Value::Null));
    assert!(t.is_member(&json!("a")));
    assert!(!t.is_member(&json!(1)));
    assert!(!t.admits(None));
    assert!(t.equals(&Value::Null, &Value::Null));
    assert!(!t.equals(&Value::Null, &json!("a")));
    assert!(t.equals(&json!("a"), &json!("a")));
}

#[test]
fn optional_adds_absent_only() {
    let t = optional(string_type());
    assert!(t.admits(None));
    assert!(t.is_member(&json!("a")));
    assert!(!t.is_member(&Value::Null));
    assert!(t.equates(None, None));
    assert!(!t.equates(None, Some(&json!("a"))));
}

#[test]
fn nullable_and_optional_compose() {
    let t = optional(nullable(number_type()));
    assert!(t.admits(None));
    assert!(t.is_member(&Value::Null));
    assert!(t.is_member(&json!(3)));
    assert_eq!(t.name(), "Optional<number?>");
    let u = nullable(optional(number_type()));
    assert!(u.admits(None));
    assert!(u.is_member(&Value::Null));
    assert_eq!(u.name(), "Optional<number>?");
}

// ------------- Union / Intersection -------------

#[test]
fn union_accepts_either() {
    let t = union_of(string_type(), number_type());
    assert_eq!(t.name(), "string | number");
    assert!(t.is_member(&json!("a")));
    assert!(t.is_member(&json!(1)));
    assert!(!t.is_member(&json!(true)));
    assert!(!t.is_member(&Value::Null));
}

#[test]
fn union_equality_needs_a_common_branch() {
    let t = union_of(string_type(), number_type());
    assert!(t.equals(&json!(1), &json!(1.0)));
    assert!(!t.equals(&json!("1"), &json!(1)));
    assert!(!t.equals(&json!(1), &json!("1")));
    assert!(!t.equals(&json!("a"), &json!("b")));
}

#[test]
fn intersection_merges_shapes() {
    let named = shape_of([("name", string_type())]);
    let aged = shape_of([("age", number_type())]);
    let t = intersection_of(named, aged);
    assert_eq!(t.name(), "{name: string} & {age: number}");
    assert!(t.is_member(&json!({"name": "Ada", "age": 36})));
    assert!(!t.is_member(&json!({"name": "Ada"})));
    assert!(!t.is_member(&json!({"age": 36})));
    assert!(t.equals(&json!({"name": "Ada", "age": 36}), &json!({"age": 36, "name": "Ada"})));
    assert!(!t.equals(&json!({"name": "Ada", "age": 36}), &json!({"name": "Ada", "age": 37})));
}

#[test]
fn names_are_parenthesised_by_precedence() {
    let either = union_of(string_type(), number_type());
    assert_eq!(nullable(either.clone()).name(), "(string | number)?");
    assert_eq!(
        intersection_of(either.clone(), boolean_type()).name(),
        "(string | number) & boolean"
    );
    assert_eq!(
        union_of(intersection_of(point(), point()), null_type()).name(),
        "{x: number, y: number} & {x: number, y: number} | null"
    );
    assert_eq!(array_of(either).name(), "Array<string | number>");
}

// ------------- Array / Map -------------

#[test]
fn arrays_are_homogeneous() {
    let t = array_of(number_type());
    assert_eq!(t.name(), "Array<number>");
    assert!(t.is_member(&json!([])));
    assert!(t.is_member(&json!([1, 2.5, -3])));
    assert!(!t.is_member(&json!([1, "2"])));
    assert!(!t.is_member(&json!([1, null])));
    assert!(!t.is_member(&json!({"0": 1})));
    assert!(!t.is_member(&Value::Null));
}

#[test]
fn array_equality_is_ordered() {
    let t = array_of(number_type());
    assert!(t.equals(&json!([1, 2]), &json!([1.0, 2])));
    assert!(!t.equals(&json!([1, 2]), &json!([2, 1])));
    assert!(!t.equals(&json!([1, 2]), &json!([1, 2, 3])));
    assert!(t.equals(&json!([]), &json!([])));
}

#[test]
fn maps_check_every_value() {
    let t = map_of(boolean_type());
    assert_eq!(t.name(), "Map<boolean>");
    assert!(t.is_member(&json!({})));
    assert!(t.is_member(&json!({"a": true, "b": false})));
    assert!(!t.is_member(&json!({"a": true, "b": null})));
    assert!(!t.is_member(&json!([true])));
    assert!(!t.is_member(&Value::Null));
}

#[test]
fn map_equality_ignores_order_but_not_keys() {
    let t = map_of(number_type());
    assert!(t.equals(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
    assert!(!t.equals(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 2})));
    assert!(!t.equals(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
}

// ------------- Tuple / Shape -------------

#[test]
fn tuples_check_declared_positions() {
    let t = tuple_of(vec![number_type(), string_type()]);
    assert_eq!(t.name(), "[number, string]");
    assert!(t.is_member(&json!([1, "a"])));
    assert!(t.is_member(&json!([1, "a", true])));
    assert!(!t.is_member(&json!([1])));
    assert!(!t.is_member(&json!(["a", 1])));
    assert!(!t.is_member(&json!({"0": 1, "1": "a"})));
}

#[test]
fn tuples_with_optional_tail() {
    let t = tuple_of(vec![number_type(), optional(string_type())]);
    assert!(t.is_member(&json!([1])));
    assert!(t.is_member(&json!([1, "a"])));
    assert!(!t.is_member(&json!([1, null])));
    assert!(t.equals(&json!([1]), &json!([1])));
    assert!(!t.equals(&json!([1]), &json!([1, "a"])));
}

#[test]
fn tuple_equality_ignores_excess_elements() {
    let t = tuple_of(vec![number_type(), string_type()]);
    assert!(t.equals(&json!([1, "a", 1]), &json!([1, "a", 2])));
    assert!(!t.equals(&json!([1, "a"]), &json!([1, "b"])));
}

#[test]
fn shapes_are_open_on_excess_keys() {
    let t = point();
    assert_eq!(t.name(), "{x: number, y: number}");
    assert!(t.is_member(&json!({"x": 1, "y": 2, "z": 3})));
    assert!(!t.is_member(&json!({"x": 1})));
    assert!(!t.is_member(&json!({"x": 1, "y": null})));
    assert!(!t.is_member(&json!([1, 2])));
    assert!(t.equals(&json!({"x": 1, "y": 2, "z": 3}), &json!({"x": 1, "y": 2})));
    assert!(!t.equals(&json!({"x": 1, "y": 2}), &json!({"x": 1, "y": 3})));
}

#[test]
fn shape_keys_can_be_optional_or_nullable() {
    let t = shape_of([
        ("id", number_type()),
        ("note", optional(string_type())),
        ("parent", nullable(number_type())),
    ]);
    assert_eq!(t.name(), "{id: number, note: Optional<string>, parent: number?}");
    assert!(t.is_member(&json!({"id": 1, "parent": null})));
    assert!(t.is_member(&json!({"id": 1, "note": "n", "parent": 2})));
    assert!(!t.is_member(&json!({"id": 1})));
    assert!(!t.is_member(&json!({"id": 1, "note": null, "parent": null})));
    assert!(t.equals(&json!({"id": 1, "parent": null}), &json!({"id": 1, "parent": null})));
    assert!(!t.equals(&json!({"id": 1, "parent": null}), &json!({"id": 1, "note": "n", "parent": null})));
}

#[test]
fn quoted_shape_keys() {
    let t = shape_of([("content-type", literal("json"))]);
    assert_eq!(t.name(), "{\"content-type\": \"json\"}");
    assert!(t.is_member(&json!({"content-type": "json"})));
}

#[test]
fn empty_containers() {
    assert!(array_of(string_type()).is_member(&json!([])));
    assert!(map_of(string_type()).is_member(&json!({})));
    assert!(tuple_of(Vec::new()).is_member(&json!([1, 2])));
    assert!(shape_of(Vec::<(String, Type)>::new()).is_member(&json!({"a": 1})));
}
