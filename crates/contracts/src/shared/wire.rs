//! Lenient reader over backend records
//!
//! Backends name the same column differently (`nombre_categoria` vs `nombre`),
//! send numbers as strings, or leave fields out entirely. Every accessor here
//! takes a list of aliases, uses the first one present and non-null, and falls
//! back to a default instead of failing. The frontend key is always one of the
//! aliases, so reading an already-mapped view object keeps its fields.

use serde_json::{Map, Value};

use super::status::EntityStatus;

/// Whether a record is being sent for creation (no id) or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireMode {
    Create,
    Update,
}

pub struct WireRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> WireRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        let fields = self.fields?;
        keys.iter()
            .filter_map(|k| fields.get(*k))
            .find(|v| !v.is_null())
    }

    /// True when any alias is present with a non-null value
    pub fn has_any(&self, keys: &[&str]) -> bool {
        self.first(keys).is_some()
    }

    pub fn text(&self, keys: &[&str]) -> String {
        match self.first(keys) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn int(&self, keys: &[&str]) -> i64 {
        match self.first(keys) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn decimal(&self, keys: &[&str]) -> f64 {
        match self.first(keys) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Status with `Active` as the default for records that do not carry one
    pub fn status(&self, keys: &[&str]) -> EntityStatus {
        self.first(keys)
            .and_then(EntityStatus::from_wire)
            .unwrap_or_default()
    }

    /// A list of strings, given either as a JSON array or a comma separated string
    pub fn text_list(&self, keys: &[&str]) -> Vec<String> {
        match self.first(keys) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}
