//! Conversion integration tests — exercises the public API end to end.

use pretty_assertions::assert_eq;
use serde_json::json;
use structmap::reflect::{FieldType, Reflect};
use structmap::{describe, Describe, DeserializerConfig, Error, Mapping, StructuralDeserializer};

describe! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct InnerType {
        pub x: i64 => scalar,
    }
}

describe! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Item {
        pub v: i64 => scalar,
    }
}

describe! {
    /// Mixed record used across the tests.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Record {
        pub id: u64 => scalar,
        pub title: String => scalar,
        pub score: f64 => scalar,
        pub active: bool => scalar,
        pub inner: InnerType => nested,
        pub note: Option<InnerType> => optional,
        pub items: Vec<Item> => list_of,
        pub tags: Vec<String> => list,
    }
}

describe! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Category {
        pub name: String => scalar,
        pub children: Vec<Category> => list_of,
    }
}

fn mapping(value: serde_json::Value) -> Mapping {
    match value {
        serde_json::Value::Object(m) => m,
        other => panic!("not a mapping: {other}"),
    }
}

/// Helper: build the mapping and convert it with the default configuration.
fn convert<T: Describe>(value: serde_json::Value) -> structmap::Result<Option<T>> {
    structmap::from_map(Some(&mapping(value)))
}

#[test]
fn test_nested_object() {
    let record: Record = convert(json!({"inner": {"x": 1}})).unwrap().unwrap();
    assert_eq!(record.inner.x, 1);
}

#[test]
fn test_list_of_objects_keeps_order() {
    let record: Record = convert(json!({"items": [{"v": 1}, {"v": 2}]}))
        .unwrap()
        .unwrap();
    assert_eq!(record.items, vec![Item { v: 1 }, Item { v: 2 }]);
}

#[test]
fn test_scalar_list_is_unchanged() {
    let record: Record = convert(json!({"tags": ["a", "b"]})).unwrap().unwrap();
    assert_eq!(record.tags, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_unknown_key_yields_no_instance() {
    let result = convert::<Record>(json!({"id": 1, "bogus": true}));
    match result {
        Err(Error::UnknownField { type_name, field }) => {
            assert_eq!(type_name, "Record");
            assert_eq!(field, "bogus");
        }
        other => panic!("expected UnknownField, got {other:?}"),
    }
}

#[test]
fn test_missing_fields_keep_defaults() {
    let record: Record = convert(json!({"title": "only"})).unwrap().unwrap();
    assert_eq!(
        record,
        Record {
            title: "only".into(),
            ..Record::default()
        }
    );
}

#[test]
fn test_empty_and_absent_are_no_value() {
    assert_eq!(structmap::from_map::<Record>(None).unwrap(), None);
    assert_eq!(convert::<Record>(json!({})).unwrap(), None);
    assert_eq!(structmap::from_json_str::<Record>("{}").unwrap(), None);
    assert_eq!(structmap::from_json_str::<Record>("null").unwrap(), None);
}

#[test]
fn test_no_string_to_number_coercion() {
    let err = convert::<Record>(json!({"id": "17"})).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "{err}");
}

#[test]
fn test_integer_into_float_field() {
    let record: Record = convert(json!({"score": 3})).unwrap().unwrap();
    assert_eq!(record.score, 3.0);
}

#[test]
fn test_recursive_type() {
    let root: Category = convert(json!({
        "name": "root",
        "children": [
            {"name": "a", "children": [{"name": "a1"}]},
            {"name": "b"},
        ],
    }))
    .unwrap()
    .unwrap();

    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].children[0].name, "a1");
    assert!(root.children[1].children.is_empty());
}

#[test]
fn test_deep_nesting_is_bounded() {
    let mut value = json!({"name": "leaf"});
    for i in 0..200 {
        value = json!({"name": format!("level-{i}"), "children": [value]});
    }

    let err = convert::<Category>(value.clone()).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 128, .. }));

    let relaxed =
        StructuralDeserializer::with_config(DeserializerConfig::default().with_max_depth(256));
    let root: Category = relaxed.convert_map(Some(&mapping(value))).unwrap().unwrap();
    assert_eq!(root.name, "level-199");
}

#[test]
fn test_dynamic_convert_reports_runtime_type() {
    let de = StructuralDeserializer::new();
    let instance = de
        .convert(Some(&mapping(json!({"x": 9}))), InnerType::describe())
        .unwrap()
        .unwrap();

    assert_eq!(instance.type_info().name, "InnerType");
    let x = instance.field_ref("x").and_then(|v| v.downcast_ref::<i64>());
    assert_eq!(x, Some(&9));
}

#[test]
fn test_declared_types_are_introspectable() {
    let info = Record::describe();
    let inner = info.field("inner").unwrap();
    assert!(matches!(inner.ty, FieldType::Struct(_)));
    assert_eq!(inner.ty.nested_type().unwrap().name, "InnerType");
}

#[test]
fn test_calls_are_independent() {
    let source = mapping(json!({"title": "t", "items": [{"v": 1}]}));
    let mut first: Record = structmap::from_map(Some(&source)).unwrap().unwrap();
    let second: Record = structmap::from_map(Some(&source)).unwrap().unwrap();
    assert_eq!(first, second);

    first.items.push(Item { v: 2 });
    assert_eq!(second.items.len(), 1);
}

#[test]
fn test_shared_across_threads() {
    structmap::observability::init_tracing();

    let de = StructuralDeserializer::new();
    let results: Vec<Record> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let de = &de;
                scope.spawn(move || {
                    let source = mapping(json!({"id": i, "items": [{"v": i}]}));
                    de.convert_map::<Record>(Some(&source)).unwrap().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, record) in results.iter().enumerate() {
        assert_eq!(record.id, i as u64);
        assert_eq!(record.items, vec![Item { v: i as i64 }]);
    }
}
