//! Integration test: the type and validator extension points from the
//! outside of the crate.
//!
//! A user-defined type and user-defined validators are mixed with the
//! built-ins in a nested schema, and the whole tree is driven through
//! deserialize, serialize, flatten/unflatten and get/set.

use std::sync::Arc;

use strata_core::{StrataError, Value};
use strata_schema::types::{Boolean, Int, Mapping, Sequence, Str, Tuple, Unknown};
use strata_schema::validators::{All, Length, Luhn, OneOf, Range};
use strata_schema::{DefaultValue, Invalid, Missing, SchemaNode, SchemaType, Validator};

/// Comma-separated text on the outside, a list of trimmed words inside.
#[derive(Debug)]
struct Csv;

impl SchemaType for Csv {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::List(items) => {
                let words: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                words
                    .map(|w| Value::Str(w.join(",")))
                    .ok_or_else(|| Invalid::new(node, "items must be text"))
            }
            other => Err(Invalid::new(node, format!("\"{other}\" is not a list"))),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        match cstruct {
            Value::Null => Ok(Value::Null),
            Value::Str(s) if s.is_empty() => Ok(Value::Null),
            Value::Str(s) => Ok(Value::List(
                s.split(',').map(|w| Value::from(w.trim())).collect(),
            )),
            other => Err(Invalid::new(node, format!("{other} is not a string"))),
        }
    }
}

/// Rejects lists with repeated entries.
struct Distinct;

impl Validator for Distinct {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let items = value.as_items().unwrap_or_default();
        let unique = Value::set(items.iter().cloned());
        if unique.len() == Some(items.len()) {
            Ok(())
        } else {
            Err(Invalid::new(node, "Entries must be distinct").with_value(value.clone()))
        }
    }
}

fn member() -> SchemaNode {
    SchemaNode::builder(Mapping::new())
        .name("member")
        .child(
            SchemaNode::builder(Str::new())
                .name("name")
                .validator(Length::new(Some(1), Some(20)))
                .build(),
        )
        .child(
            SchemaNode::builder(Int::new())
                .name("age")
                .validator(Range::new(Some(Value::Int(0)), Some(Value::Int(150))))
                .missing(Missing::Drop)
                .default(DefaultValue::Drop)
                .build(),
        )
        .child(
            SchemaNode::builder(Str::new())
                .name("card")
                .validator(Luhn::new())
                .missing(Missing::Drop)
                .default(DefaultValue::Drop)
                .build(),
        )
        .build()
}

fn roster() -> SchemaNode {
    SchemaNode::builder(Mapping::with_unknown(Unknown::Raise))
        .name("roster")
        .child(
            SchemaNode::builder(Csv)
                .name("tags")
                .validator(Distinct)
                .missing(Missing::Value(Value::List(vec![])))
                .build(),
        )
        .child(
            SchemaNode::builder(Sequence::new())
                .name("members")
                .child(member())
                .build(),
        )
        .child(
            SchemaNode::builder(Boolean::new())
                .name("active")
                .missing(Missing::Value(Value::Bool(true)))
                .default(DefaultValue::Value(Value::Bool(true)))
                .build(),
        )
        .child(
            SchemaNode::builder(Tuple::new())
                .name("origin")
                .child(SchemaNode::named("x", Int::new()))
                .child(SchemaNode::named("y", Int::new()))
                .missing(Missing::Drop)
                .default(DefaultValue::Drop)
                .build(),
        )
        .build()
}

fn valid_cstruct() -> Value {
    Value::map([
        ("tags", Value::from("red, blue")),
        (
            "members",
            Value::List(vec![
                Value::map([("name", Value::from("Ada")), ("age", Value::from("36"))]),
                Value::map([
                    ("name", Value::from("Linus")),
                    ("card", Value::from("4111111111111111")),
                ]),
            ]),
        ),
        ("origin", Value::List(vec![Value::from("1"), Value::from("2")])),
    ])
}

#[test]
fn test_nested_deserialize() {
    let app = roster().deserialize(&valid_cstruct()).unwrap();
    let expected = Value::map([
        ("tags", Value::List(vec![Value::from("red"), Value::from("blue")])),
        (
            "members",
            Value::List(vec![
                Value::map([("name", Value::from("Ada")), ("age", Value::Int(36))]),
                Value::map([
                    ("name", Value::from("Linus")),
                    ("card", Value::from("4111111111111111")),
                ]),
            ]),
        ),
        ("active", Value::Bool(true)),
        ("origin", Value::Tuple(vec![Value::Int(1), Value::Int(2)])),
    ]);
    assert_eq!(app, expected);
}

#[test]
fn test_serialize_inverts_deserialize() {
    let schema = roster();
    let app = schema.deserialize(&valid_cstruct()).unwrap();
    let cstruct = schema.serialize(&app).unwrap();
    assert_eq!(cstruct.as_map().and_then(|m| m.get("tags")), Some(&Value::from("red,blue")));
    assert_eq!(schema.deserialize(&cstruct).unwrap(), app);
}

#[test]
fn test_serialize_sentinel_applies_child_defaults() {
    let cstruct = roster().serialize(&Value::Null).unwrap();
    assert_eq!(
        cstruct,
        Value::map([
            ("tags", Value::Null),
            ("members", Value::Null),
            ("active", Value::from("true")),
        ])
    );
}

#[test]
fn test_failures_are_collected_with_paths() {
    let schema = roster();
    let cstruct = Value::map([
        ("tags", Value::from("a,b,a")),
        (
            "members",
            Value::List(vec![
                Value::map([("name", Value::from("")), ("age", Value::from("200"))]),
                Value::map([
                    ("name", Value::from("Bob")),
                    ("card", Value::from("4111111111111112")),
                ]),
            ]),
        ),
        ("origin", Value::List(vec![Value::from("1")])),
    ]);
    let err = schema.deserialize(&cstruct).unwrap_err();
    assert!(err.node().ptr_eq(&schema));
    let rendered = err.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        [
            "roster.tags: Entries must be distinct",
            "roster.members.0.name: Required",
            "roster.members.0.age: 200 is greater than maximum value 150",
            "roster.members.1.card: \"4111111111111112\" is not a valid credit card number",
            "roster.origin: \"[\"1\"]\" has an incorrect number of elements (expected 2, was 1)",
        ]
    );
}

#[test]
fn test_unknown_keys_raise() {
    let mut cstruct = valid_cstruct();
    roster()
        .set_value(&mut cstruct, "extra", Value::from("x"))
        .unwrap();
    let err = roster().deserialize(&cstruct).unwrap_err();
    assert_eq!(
        err.messages(),
        ["Unrecognized keys in mapping: \"{\"extra\":\"x\"}\""]
    );
}

#[test]
fn test_cstruct_children_reports_child_defaults() {
    let schema = roster();
    let children = schema.cstruct_children(&Value::map([("tags", Value::from("a"))]));
    assert_eq!(
        children,
        vec![Value::from("a"), Value::Null, Value::from("true"), Value::Null]
    );
}

#[test]
fn test_flatten_and_unflatten() {
    let schema = roster();
    let app = schema.deserialize(&valid_cstruct()).unwrap();
    let flat = schema.flatten(&app).unwrap();
    assert_eq!(flat.get("roster.members.0.name"), Some(&Value::from("Ada")));
    assert_eq!(flat.get("roster.members.1.card"), Some(&Value::from("4111111111111111")));
    assert_eq!(flat.get("roster.origin.y"), Some(&Value::Int(2)));
    assert_eq!(flat.get("roster.active"), Some(&Value::Bool(true)));
    assert_eq!(flat.get("roster.members.0.card"), Some(&Value::Null));

    let rebuilt = schema.unflatten(&flat).unwrap();
    assert_eq!(schema.get_value(&rebuilt, "members.0.name").unwrap(), Value::from("Ada"));
    assert_eq!(rebuilt.as_map().and_then(|m| m.get("origin")), Some(&Value::Tuple(vec![Value::Int(1), Value::Int(2)])));
    assert_eq!(rebuilt.as_map().and_then(|m| m.get("tags")), app.as_map().and_then(|m| m.get("tags")));
    assert_eq!(rebuilt, app);
}

#[test]
fn test_flatten_round_trips_empty_and_dropped_children() {
    let schema = roster();
    let cstruct = Value::map([("tags", Value::from("solo")), ("members", Value::List(vec![]))]);
    let app = schema.deserialize(&cstruct).unwrap();
    assert!(app.as_map().is_some_and(|m| !m.contains_key("origin")));

    let flat = schema.flatten(&app).unwrap();
    assert_eq!(flat.get("roster.origin"), Some(&Value::Null));
    assert!(!flat.keys().any(|k| k.starts_with("roster.members")));
    assert_eq!(schema.unflatten(&flat).unwrap(), app);
}

#[test]
fn test_get_and_set_value() {
    let schema = roster();
    let mut app = schema.deserialize(&valid_cstruct()).unwrap();
    assert_eq!(schema.get_value(&app, "members.1.name").unwrap(), Value::from("Linus"));
    assert_eq!(schema.get_value(&app, "origin.0").unwrap(), Value::Int(1));

    schema.set_value(&mut app, "members.0.age", Value::Int(37)).unwrap();
    assert_eq!(schema.get_value(&app, "members.0.age").unwrap(), Value::Int(37));

    assert!(matches!(
        schema.get_value(&app, "members.x.name"),
        Err(StrataError::BadIndex { .. })
    ));
    assert!(matches!(
        schema.get_value(&app, "members.9"),
        Err(StrataError::BadIndex { .. })
    ));
    assert!(matches!(
        schema.get_value(&app, "active.deeper"),
        Err(StrataError::NotComposite { .. })
    ));
}

#[test]
fn test_shared_validators_and_composition() {
    let colour: Arc<dyn Validator> = Arc::new(OneOf::new(["red", "green"].map(Value::from)));
    let short: Arc<dyn Validator> = Arc::new(Length::new(None, Some(4)));
    let a = SchemaNode::builder(Str::new())
        .name("a")
        .shared_validator(colour.clone())
        .build();
    let b = SchemaNode::builder(Str::new())
        .name("b")
        .validator(All::new().with_shared(colour).with_shared(short))
        .build();

    assert!(a.deserialize(&Value::from("green")).is_ok());
    assert!(b.deserialize(&Value::from("red")).is_ok());
    let err = b.deserialize(&Value::from("green")).unwrap_err();
    assert_eq!(err.messages(), ["Longer than maximum length 4"]);
    let err = b.deserialize(&Value::from("purple")).unwrap_err();
    assert_eq!(err.messages().len(), 2);
}
