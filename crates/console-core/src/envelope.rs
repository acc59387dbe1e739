//! Response envelope normalization
//!
//! Backends wrap payloads inconsistently. A collection may arrive as a bare
//! array, under `data`, under `result`, under the endpoint name
//! (`{"categorias": [...]}`), or as an object keyed by id whose values are the
//! records. A single record may arrive bare or under the same wrappers.
//! [`classify_collection`] names the variant; callers decide what to do with
//! an unrecognized one.

use serde_json::Value;
use thiserror::Error;

const DATA_KEY: &str = "data";
const RESULT_KEY: &str = "result";

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<'a> {
    Bare(&'a [Value]),
    Data(&'a [Value]),
    Result(&'a [Value]),
    /// Array under the endpoint name
    Named(&'a [Value]),
    /// Object whose values are all records, e.g. `{"1": {...}, "2": {...}}`
    Keyed(Vec<&'a Value>),
}

impl<'a> Envelope<'a> {
    pub fn items(&self) -> Vec<&'a Value> {
        match self {
            Envelope::Bare(items)
            | Envelope::Data(items)
            | Envelope::Result(items)
            | Envelope::Named(items) => {
                let slice: &'a [Value] = *items;
                slice.iter().collect()
            }
            Envelope::Keyed(items) => items.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Bare(_) => "bare",
            Envelope::Data(_) => "data",
            Envelope::Result(_) => "result",
            Envelope::Named(_) => "named",
            Envelope::Keyed(_) => "keyed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Formato de respuesta no reconocido: {0}")]
    Collection(String),
    #[error("Formato de registro no reconocido: {0}")]
    Record(String),
}

/// Short description of a payload for log lines
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).take(5).collect();
            format!("object{{{}}}", keys.join(","))
        }
    }
}

pub fn classify_collection<'a>(payload: &'a Value, named_key: &str) -> Result<Envelope<'a>, ShapeError> {
    match payload {
        Value::Array(items) => Ok(Envelope::Bare(items)),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get(DATA_KEY) {
                return Ok(Envelope::Data(items));
            }
            if let Some(Value::Array(items)) = map.get(RESULT_KEY) {
                return Ok(Envelope::Result(items));
            }
            if let Some(Value::Array(items)) = map.get(named_key) {
                return Ok(Envelope::Named(items));
            }
            if !map.is_empty() && map.values().all(Value::is_object) {
                return Ok(Envelope::Keyed(map.values().collect()));
            }
            Err(ShapeError::Collection(describe(payload)))
        }
        other => Err(ShapeError::Collection(describe(other))),
    }
}

/// Items of a collection payload.
///
/// An unrecognized shape is an error when `strict`; otherwise it is logged
/// under `action` and read as an empty collection.
pub fn collection_items<'a>(
    payload: &'a Value,
    named_key: &str,
    strict: bool,
    action: &str,
) -> Result<Vec<&'a Value>, ShapeError> {
    match classify_collection(payload, named_key) {
        Ok(envelope) => {
            log::debug!("{}: {} envelope", action, envelope.kind());
            Ok(envelope.items())
        }
        Err(shape) if strict => Err(shape),
        Err(shape) => {
            log::error!("{}: {}; returning empty collection", action, shape);
            Ok(Vec::new())
        }
    }
}

/// A success reply that carries nothing: 204, an empty string or `{}`
pub fn is_empty_body(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// The record inside a single-record payload.
///
/// A one-element array is accepted as that element.
pub fn normalize_record<'a>(payload: &'a Value, named_key: &str) -> Result<&'a Value, ShapeError> {
    let unwrap_one = |value: &'a Value| -> Option<&'a Value> {
        match value {
            Value::Object(_) => Some(value),
            Value::Array(items) if items.len() == 1 && items[0].is_object() => Some(&items[0]),
            _ => None,
        }
    };

    match payload {
        Value::Object(map) => {
            for key in [DATA_KEY, RESULT_KEY, named_key] {
                if let Some(inner) = map.get(key) {
                    if let Some(record) = unwrap_one(inner) {
                        return Ok(record);
                    }
                }
            }
            Ok(payload)
        }
        Value::Array(_) => unwrap_one(payload).ok_or_else(|| ShapeError::Record(describe(payload))),
        other => Err(ShapeError::Record(describe(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_each_variant() {
        let bare = json!([{"id": 1}]);
        let data = json!({"data": [{"id": 1}], "total": 1});
        let result = json!({"result": [{"id": 1}]});
        let named = json!({"categorias": [{"id": 1}]});
        let keyed = json!({"a": {"id": 1}, "b": {"id": 2}});

        assert_eq!(classify_collection(&bare, "categorias").unwrap().kind(), "bare");
        assert_eq!(classify_collection(&data, "categorias").unwrap().kind(), "data");
        assert_eq!(classify_collection(&result, "categorias").unwrap().kind(), "result");
        assert_eq!(classify_collection(&named, "categorias").unwrap().kind(), "named");
        let keyed_env = classify_collection(&keyed, "categorias").unwrap();
        assert_eq!(keyed_env.kind(), "keyed");
        assert_eq!(keyed_env.items().len(), 2);
    }

    #[test]
    fn test_data_wins_over_named() {
        let payload = json!({"data": [{"id": 1}], "categorias": [{"id": 2}, {"id": 3}]});
        let items = collection_items(&payload, "categorias", false, "list categorias").unwrap();
        assert_eq!(items, vec![&json!({"id": 1})]);
    }

    #[test]
    fn test_strict_collection_items_fail() {
        let payload = json!({"ok": true});
        assert!(collection_items(&payload, "ventas", false, "list ventas").unwrap().is_empty());
        assert!(matches!(
            collection_items(&payload, "ventas", true, "list ventas"),
            Err(ShapeError::Collection(_))
        ));
    }

    #[test]
    fn test_empty_bodies() {
        assert!(is_empty_body(&json!(null)));
        assert!(is_empty_body(&json!("")));
        assert!(is_empty_body(&json!({})));
        assert!(!is_empty_body(&json!({"id": 1})));
        assert!(!is_empty_body(&json!([])));
    }

    #[test]
    fn test_unrecognized_collections() {
        for payload in [json!(null), json!("ok"), json!({}), json!({"count": 3, "data": null})] {
            assert!(matches!(
                classify_collection(&payload, "ventas"),
                Err(ShapeError::Collection(_))
            ));
        }
    }

    #[test]
    fn test_single_record_object_is_not_keyed() {
        // scalar values mean this is one record, not a map of records
        let payload = json!({"id": 1, "nombre": "A"});
        assert!(classify_collection(&payload, "categorias").is_err());
    }

    #[test]
    fn test_normalize_record_variants() {
        let record = json!({"id": 4});
        assert_eq!(normalize_record(&record, "ventas").unwrap(), &record);
        assert_eq!(normalize_record(&json!({"data": {"id": 4}}), "ventas").unwrap(), &record);
        assert_eq!(normalize_record(&json!({"result": [{"id": 4}]}), "ventas").unwrap(), &record);
        assert_eq!(normalize_record(&json!({"ventas": {"id": 4}}), "ventas").unwrap(), &record);
        assert_eq!(normalize_record(&json!([{"id": 4}]), "ventas").unwrap(), &record);
    }

    #[test]
    fn test_normalize_record_rejects_non_records() {
        assert!(normalize_record(&json!(null), "ventas").is_err());
        assert!(normalize_record(&json!([{"id": 1}, {"id": 2}]), "ventas").is_err());
        assert!(normalize_record(&json!("borrado"), "ventas").is_err());
    }
}
