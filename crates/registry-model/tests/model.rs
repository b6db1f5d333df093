//! Tests for registry-model types and normalization.

use std::collections::BTreeSet;

use proptest::prelude::*;
use registry_model::{DatasetStatistics, DocumentShape, Record, normalize_records};
use serde_json::{Value, json};

#[test]
fn columnar_example_normalizes_to_mappings() {
    let doc = json!({
        "fields": [{"id": "a"}, {"id": "b"}],
        "records": [[1, "x"], [2, "y"]]
    });
    let records: Vec<Value> = normalize_records(&doc)
        .into_iter()
        .map(|r| Value::Object(r.into_map()))
        .collect();
    assert_eq!(records, vec![json!({"a": 1, "b": "x"}), json!({"a": 2, "b": "y"})]);
}

#[test]
fn normalization_is_repeatable() {
    let doc = json!({"standard": {"data": [{"name": "x"}]}});
    assert_eq!(normalize_records(&doc), normalize_records(&doc));
    assert!(matches!(DocumentShape::detect(&doc), DocumentShape::Nested(_)));
}

#[test]
fn statistics_serialize() {
    let doc = json!({"data": [{"a": 1, "b": null}, {"a": 2}]});
    let stats = DatasetStatistics::from_records(&normalize_records(&doc)).expect("stats");
    insta::assert_json_snapshot!(stats, @r#"
    {
      "total_records": 2,
      "fields": [
        "a",
        "b"
      ]
    }
    "#);
}

#[test]
fn record_round_trips_through_json() {
    let record: Record = serde_json::from_value(json!({"b": 1, "a": "x"})).expect("record");
    assert_eq!(record.field_names(), vec!["b", "a"]);
    let back = serde_json::to_value(&record).expect("serialize");
    assert_eq!(back, json!({"b": 1, "a": "x"}));
}

proptest! {
    #[test]
    fn columnar_yields_one_record_per_row(
        fields in proptest::collection::btree_set("[a-z]{1,6}", 1..6),
        rows in proptest::collection::vec(proptest::collection::vec(any::<i64>(), 0..8), 0..12),
    ) {
        let fields: Vec<String> = fields.into_iter().collect();
        let doc = json!({
            "fields": fields.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
            "records": rows,
        });
        let records = normalize_records(&doc);
        prop_assert_eq!(records.len(), rows.len());
        let allowed: BTreeSet<&str> = fields.iter().map(String::as_str).collect();
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.len(), row.len().min(fields.len()));
            prop_assert!(record.fields().all(|f| allowed.contains(f)));
        }
    }

    #[test]
    fn search_text_joins_non_empty_strings(
        values in proptest::collection::vec(proptest::option::of("[a-z ]{0,8}"), 0..6),
    ) {
        let record: Record = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("f{i}"), v.clone().map_or(Value::Null, Value::String)))
            .collect();
        let expected: Vec<&str> = values
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        prop_assert_eq!(record.search_text(), expected.join(" "));
    }
}
