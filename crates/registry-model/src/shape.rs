//! Record normalization.
//!
//! Data files come in three layouts:
//!
//! ```text
//! nested:   { "standard": { "data": [ {..}, {..} ] } }
//! flat:     { "data": [ {..}, {..} ] }
//! columnar: { "fields": [ {"id": "a"}, {"id": "b"} ], "records": [ [1, "x"], [2, "y"] ] }
//! ```
//!
//! [`DocumentShape::detect`] picks the layout once and [`DocumentShape::records`]
//! turns it into canonical [`Record`]s. Both are pure functions of the document.

use serde_json::Value;

use crate::record::Record;

/// The recognized layout of a raw data document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentShape<'a> {
    /// `standard.data`, already a list of objects.
    Nested(&'a Value),
    /// Top-level `data`, already a list of objects.
    Flat(&'a Value),
    /// Shared field list plus positional rows.
    Columnar {
        fields: Option<&'a Value>,
        records: &'a Value,
    },
    /// Empty, null, or any other layout.
    Unrecognized,
}

impl<'a> DocumentShape<'a> {
    /// Detect the layout, trying nested, flat, then columnar.
    pub fn detect(document: &'a Value) -> Self {
        let Some(object) = document.as_object() else {
            return Self::Unrecognized;
        };
        if let Some(data) = object
            .get("standard")
            .and_then(Value::as_object)
            .and_then(|standard| standard.get("data"))
        {
            return Self::Nested(data);
        }
        if let Some(data) = object.get("data") {
            return Self::Flat(data);
        }
        if let Some(records) = object.get("records") {
            return Self::Columnar {
                fields: object.get("fields"),
                records,
            };
        }
        Self::Unrecognized
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nested(_) => "nested",
            Self::Flat(_) => "flat",
            Self::Columnar { .. } => "columnar",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Build the canonical record list for this layout.
    pub fn records(&self) -> Vec<Record> {
        match *self {
            Self::Nested(data) | Self::Flat(data) => object_records(data),
            Self::Columnar { fields, records } => columnar_records(fields, records),
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Normalize a raw document into canonical records.
///
/// Unknown layouts and empty documents yield an empty list.
pub fn normalize_records(document: &Value) -> Vec<Record> {
    DocumentShape::detect(document).records()
}

fn object_records(data: &Value) -> Vec<Record> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|object| Record::from(object.clone()))
        .collect()
}

fn columnar_records(fields: Option<&Value>, records: &Value) -> Vec<Record> {
    let field_ids = field_ids(fields);
    if field_ids.is_empty() {
        return Vec::new();
    }
    let Some(rows) = records.as_array() else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(Value::as_array)
        .map(|row| {
            field_ids
                .iter()
                .zip(row)
                .map(|(id, value)| (id.clone(), value.clone()))
                .collect()
        })
        .collect()
}

fn field_ids(fields: Option<&Value>) -> Vec<String> {
    let Some(fields) = fields.and_then(Value::as_array) else {
        return Vec::new();
    };
    fields
        .iter()
        .enumerate()
        .map(|(position, field)| match field {
            Value::String(id) => id.clone(),
            Value::Object(object) => match object.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(id @ (Value::Number(_) | Value::Bool(_))) => id.to_string(),
                _ => position.to_string(),
            },
            _ => position.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn as_values(records: Vec<Record>) -> Vec<Value> {
        records
            .into_iter()
            .map(|r| Value::Object(r.into_map()))
            .collect()
    }

    #[test]
    fn detects_nested_before_flat() {
        let doc = json!({"standard": {"data": [{"a": 1}]}, "data": [{"b": 2}]});
        assert_eq!(DocumentShape::detect(&doc).name(), "nested");
        assert_eq!(as_values(normalize_records(&doc)), vec![json!({"a": 1})]);
    }

    #[test]
    fn standard_without_data_falls_back_to_flat() {
        let doc = json!({"standard": {"title": "x"}, "data": [{"b": 2}]});
        assert_eq!(DocumentShape::detect(&doc).name(), "flat");
    }

    #[test]
    fn flat_records_are_unchanged() {
        let doc = json!({"data": [{"a": 1}, {"a": 2}]});
        assert_eq!(
            as_values(normalize_records(&doc)),
            vec![json!({"a": 1}), json!({"a": 2})]
        );
    }

    #[test]
    fn columnar_rows_are_zipped_against_field_ids() {
        let doc = json!({
            "fields": [{"id": "a", "type": "int"}, {"id": "b"}],
            "records": [[1, "x"], [2, "y"]]
        });
        assert_eq!(
            as_values(normalize_records(&doc)),
            vec![json!({"a": 1, "b": "x"}), json!({"a": 2, "b": "y"})]
        );
    }

    #[test]
    fn columnar_without_fields_is_empty() {
        let doc = json!({"fields": [], "records": [[1, "x"], [2, "y"]]});
        assert!(normalize_records(&doc).is_empty());
        let doc = json!({"records": [[1, "x"]]});
        assert!(normalize_records(&doc).is_empty());
    }

    #[test]
    fn columnar_zip_stops_at_shorter_side() {
        let doc = json!({
            "fields": [{"id": "a"}, {"id": "b"}],
            "records": [[1], [2, "y", "extra"]]
        });
        assert_eq!(
            as_values(normalize_records(&doc)),
            vec![json!({"a": 1}), json!({"a": 2, "b": "y"})]
        );
    }

    #[test]
    fn columnar_field_without_id_uses_position() {
        let doc = json!({
            "fields": [{"id": "a"}, {"type": "text"}, {"id": 7}],
            "records": [[1, "x", true]]
        });
        let records = normalize_records(&doc);
        assert_eq!(records[0].field_names(), vec!["a", "1", "7"]);
    }

    #[test]
    fn non_object_items_are_skipped() {
        let doc = json!({"data": [{"a": 1}, "stray", 3, {"a": 2}]});
        assert_eq!(normalize_records(&doc).len(), 2);
    }

    #[test]
    fn unrecognized_documents_are_empty() {
        for doc in [
            Value::Null,
            json!({}),
            json!([{"a": 1}]),
            json!({"rows": [[1]]}),
            json!({"data": {"a": 1}}),
        ] {
            assert!(normalize_records(&doc).is_empty(), "{doc}");
        }
    }
}
