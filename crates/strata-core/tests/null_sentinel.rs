//! Integration test: the null sentinel stays distinct from every "empty"
//! value across comparison, JSON conversion and display.

use strata_core::{StrataError, Value, NULL};

#[test]
fn test_sentinel_differs_from_empty_values() {
    let empties = [
        Value::None,
        Value::from(""),
        Value::Int(0),
        Value::Float(0.0),
        Value::Bool(false),
        Value::List(vec![]),
        Value::map(Vec::<(String, Value)>::new()),
    ];
    for empty in &empties {
        assert_ne!(&NULL, empty, "{empty:?}");
        assert!(!empty.is_null());
    }
    assert!(NULL.is_null());
    assert_eq!(NULL, Value::Null);
}

#[test]
fn test_json_documents_never_produce_the_sentinel() {
    let doc: serde_json::Value = serde_json::from_str(r#"{"a": null, "b": [null, 1]}"#).unwrap();
    let value = Value::from_json(doc);
    assert_eq!(
        value,
        Value::map([
            ("a", Value::None),
            ("b", Value::List(vec![Value::None, Value::Int(1)])),
        ])
    );
}

#[test]
fn test_sentinel_entries_are_omitted_from_json() {
    let value = Value::map([("kept", Value::None), ("dropped", NULL), ("n", Value::Int(2))]);
    assert_eq!(value.to_json(), serde_json::json!({"kept": null, "n": 2}));
    assert_eq!(value.to_string(), r#"{"kept":null,"n":2}"#);
}

#[test]
fn test_display_marks_the_sentinel() {
    assert_eq!(NULL.to_string(), "<null>");
    assert_eq!(Value::None.to_string(), "None");
}

#[test]
fn test_structural_errors_render() {
    let err = StrataError::BadIndex {
        node: "items".into(),
        segment: "x".into(),
    };
    assert_eq!(err.to_string(), "invalid index 'x' for node 'items'");
    assert_eq!(
        StrataError::MissingKey("a.b".into()).to_string(),
        "flattened structure is missing 'a.b'"
    );
}
